//! HTTP client for network-based API calls

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use shared::response::ApiErrorBody;

use crate::{ClientConfig, ClientError, ClientResult, Credential};

/// HTTP client trait
///
/// `credential` is attached as a bearer `Authorization` header when given.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get<T: DeserializeOwned + Send>(
        &self,
        path: &str,
        credential: Option<&Credential>,
    ) -> ClientResult<T>;

    async fn get_with_query<T: DeserializeOwned + Send, Q: Serialize + Sync>(
        &self,
        path: &str,
        query: &Q,
        credential: Option<&Credential>,
    ) -> ClientResult<T>;

    async fn post<T: DeserializeOwned + Send, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
        credential: Option<&Credential>,
    ) -> ClientResult<T>;

    async fn put<T: DeserializeOwned + Send, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
        credential: Option<&Credential>,
    ) -> ClientResult<T>;

    async fn put_empty<T: DeserializeOwned + Send>(
        &self,
        path: &str,
        credential: Option<&Credential>,
    ) -> ClientResult<T>;

    async fn delete<T: DeserializeOwned + Send>(
        &self,
        path: &str,
        credential: Option<&Credential>,
    ) -> ClientResult<T>;
}

/// Network HTTP client
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
}

impl NetworkHttpClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        if config.base_url.trim().is_empty() {
            return Err(ClientError::Config("base URL is empty".into()));
        }
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send<T: DeserializeOwned>(
        &self,
        req: RequestBuilder,
        credential: Option<&Credential>,
    ) -> ClientResult<T> {
        let req = match credential {
            Some(c) => req.header(reqwest::header::AUTHORIZATION, c.bearer()),
            None => req,
        };
        let response = req.send().await?;
        Self::handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "Request rejected by backend");
            // Prefer the backend's own message
            if let Ok(api_err) = serde_json::from_str::<ApiErrorBody>(&text) {
                return Err(ClientError::Api {
                    status: status.as_u16(),
                    message: api_err.message,
                });
            }
            return match status {
                StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized(text)),
                StatusCode::FORBIDDEN => Err(ClientError::Forbidden(text)),
                StatusCode::NOT_FOUND => Err(ClientError::NotFound(text)),
                StatusCode::BAD_REQUEST => Err(ClientError::Validation(text)),
                _ => Err(ClientError::Internal(format!("status {status}: {text}"))),
            };
        }

        // DELETE and some PUT endpoints answer with an empty body
        if text.trim().is_empty() {
            return Ok(serde_json::from_value(Value::Null)?);
        }
        match serde_json::from_str(&text) {
            Ok(value) => Ok(value),
            // Plain-text acknowledgements such as `201 Sale recorded`
            Err(e) => serde_json::from_value(Value::String(text)).map_err(|_| e.into()),
        }
    }
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn get<T: DeserializeOwned + Send>(
        &self,
        path: &str,
        credential: Option<&Credential>,
    ) -> ClientResult<T> {
        tracing::debug!(path, "GET");
        let req = self.client.get(self.url(path));
        self.send(req, credential).await
    }

    async fn get_with_query<T: DeserializeOwned + Send, Q: Serialize + Sync>(
        &self,
        path: &str,
        query: &Q,
        credential: Option<&Credential>,
    ) -> ClientResult<T> {
        tracing::debug!(path, "GET");
        let req = self.client.get(self.url(path)).query(query);
        self.send(req, credential).await
    }

    async fn post<T: DeserializeOwned + Send, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
        credential: Option<&Credential>,
    ) -> ClientResult<T> {
        tracing::debug!(path, "POST");
        let req = self.client.post(self.url(path)).json(body);
        self.send(req, credential).await
    }

    async fn put<T: DeserializeOwned + Send, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
        credential: Option<&Credential>,
    ) -> ClientResult<T> {
        tracing::debug!(path, "PUT");
        let req = self.client.put(self.url(path)).json(body);
        self.send(req, credential).await
    }

    async fn put_empty<T: DeserializeOwned + Send>(
        &self,
        path: &str,
        credential: Option<&Credential>,
    ) -> ClientResult<T> {
        tracing::debug!(path, "PUT");
        let req = self.client.put(self.url(path));
        self.send(req, credential).await
    }

    async fn delete<T: DeserializeOwned + Send>(
        &self,
        path: &str,
        credential: Option<&Credential>,
    ) -> ClientResult<T> {
        tracing::debug!(path, "DELETE");
        let req = self.client.delete(self.url(path));
        self.send(req, credential).await
    }
}
