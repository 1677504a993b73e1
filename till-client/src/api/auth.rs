//! Auth API

use serde::Serialize;
use serde_json::Value;

use super::TillClient;
use crate::{ClientError, ClientResult, Credential, HttpClient};

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Token may sit at the top level or inside `data`
fn extract_token(body: &Value) -> Option<&str> {
    body.get("token")
        .or_else(|| body.get("data").and_then(|d| d.get("token")))
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
}

impl<H: HttpClient> TillClient<H> {
    /// Login with email and password, returning the bearer credential
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<Credential> {
        let body: Value = self
            .http()
            .post("api/auth/login", &LoginRequest { email, password }, None)
            .await?;

        let token = extract_token(&body)
            .ok_or_else(|| ClientError::InvalidResponse("Missing login token".into()))?;

        tracing::info!(email, "Logged in");
        Ok(Credential::new(token)
            .with_email(email)
            .with_issued_at(shared::util::now_millis()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_token() {
        assert_eq!(extract_token(&json!({"token": "t1"})), Some("t1"));
        assert_eq!(extract_token(&json!({"data": {"token": "t2"}})), Some("t2"));
        assert_eq!(extract_token(&json!({"token": ""})), None);
        assert_eq!(extract_token(&json!({"message": "bad"})), None);
    }
}
