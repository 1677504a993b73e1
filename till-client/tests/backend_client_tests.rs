//! Inventory backend client tests against an in-process server.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::{Value, json};

use shared::ErrorCode;
use shared::models::SaleLineItem;
use till_client::{ClientConfig, ClientError, Credential, DateRange, Report, TillClient};

#[derive(Clone, Default)]
struct ServerState {
    posted_sales: Arc<Mutex<Vec<Value>>>,
    last_query: Arc<Mutex<Option<std::collections::HashMap<String, String>>>>,
    deleted_sales: Arc<Mutex<Vec<String>>>,
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        == Some("Bearer test-token")
}

async fn login_handler(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["password"] == "secret" {
        (StatusCode::OK, Json(json!({"token": "test-token"})))
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Invalid email or password"})),
        )
    }
}

async fn products_handler(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"message": "Unauthorized"})));
    }
    (
        StatusCode::OK,
        Json(json!({
            "data": [
                {"id": "p1", "barcode": "111", "name": "cola", "category": "drinks", "quantity": 5, "sellingPrice": 10.0},
                {"_id": "p2", "bracode": "222", "productName": "chips", "qty": 0, "price": "2.50"},
            ]
        })),
    )
}

async fn low_stock_handler(Path(threshold): Path<u32>) -> Json<Value> {
    if threshold <= 1 {
        Json(json!([{"id": "p2", "quantity": 0}]))
    } else {
        Json(json!([]))
    }
}

async fn sales_handler(
    State(state): State<ServerState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"message": "Unauthorized"}))).into_response();
    }
    if body["barcode"] == "999" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "Insufficient stock"})),
        )
            .into_response();
    }
    let plain_text = body["barcode"] == "555";
    state.posted_sales.lock().unwrap().push(body);
    if plain_text {
        return (StatusCode::CREATED, "Sale recorded").into_response();
    }
    (StatusCode::CREATED, Json(json!({"message": "Sale recorded"}))).into_response()
}

async fn delete_sale_handler(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> StatusCode {
    state.deleted_sales.lock().unwrap().push(id);
    StatusCode::NO_CONTENT
}

async fn list_sales_handler() -> Json<Value> {
    Json(json!([
        {"id": "s1", "barcode": "111", "quantity": 2, "sellingPrice": 10.0},
        {"id": "s2", "barcode": "222", "quantity": 1, "sellingPrice": 2.5},
    ]))
}

async fn sales_range_handler(
    State(state): State<ServerState>,
    Query(query): Query<std::collections::HashMap<String, String>>,
) -> Json<Value> {
    *state.last_query.lock().unwrap() = Some(query);
    Json(json!([{"id": "s1", "barcode": "111", "quantity": 2, "sellingPrice": 10.0}]))
}

async fn stock_value_handler() -> Json<Value> {
    Json(json!({"data": {"totalValue": 52.5, "products": 2}}))
}

async fn start_test_server() -> (String, ServerState, tokio::task::JoinHandle<()>) {
    let state = ServerState::default();
    let app = Router::new()
        .route("/api/auth/login", post(login_handler))
        .route("/api/products", get(products_handler))
        .route("/api/products/low-stock/{threshold}", get(low_stock_handler))
        .route("/api/sales", post(sales_handler).get(list_sales_handler))
        .route("/api/sales/date-range", get(sales_range_handler))
        .route("/api/sales/{id}", delete(delete_sale_handler))
        .route("/api/reports/stock-value", get(stock_value_handler))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr: SocketAddr = listener.local_addr().expect("listener addr");
    let base_url = format!("http://{addr}");

    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve test server");
    });

    (base_url, state, handle)
}

fn client(base_url: &str) -> TillClient {
    TillClient::new(&ClientConfig::new(base_url).with_timeout(5)).expect("client")
}

#[tokio::test]
async fn login_returns_bearer_credential() {
    let (base_url, _state, _handle) = start_test_server().await;
    let credential = client(&base_url)
        .login("owner@shop.test", "secret")
        .await
        .expect("login");

    assert_eq!(credential.token, "test-token");
    assert_eq!(credential.email.as_deref(), Some("owner@shop.test"));
}

#[tokio::test]
async fn login_failure_keeps_backend_message() {
    let (base_url, _state, _handle) = start_test_server().await;
    let err = client(&base_url)
        .login("owner@shop.test", "wrong")
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Invalid email or password");
    assert_eq!(err.code(), ErrorCode::NotAuthenticated);
}

#[tokio::test]
async fn list_products_reads_enveloped_listing() {
    let (base_url, _state, _handle) = start_test_server().await;
    let products = client(&base_url)
        .list_products(&Credential::new("test-token"))
        .await
        .expect("products");

    assert_eq!(products.len(), 2);
    assert_eq!(products[1].barcode_text(), "222");
    assert_eq!(products[1].display_name(), "CHIPS");
}

#[tokio::test]
async fn missing_token_is_rejected() {
    let (base_url, _state, _handle) = start_test_server().await;
    let err = client(&base_url)
        .list_products(&Credential::new("other"))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Api { status: 401, .. }));
}

#[tokio::test]
async fn record_sale_posts_line_item() {
    let (base_url, state, _handle) = start_test_server().await;
    let item = SaleLineItem::new("111", 2, Decimal::new(1000, 2));

    client(&base_url)
        .record_sale(&item, &Credential::new("test-token"))
        .await
        .expect("record sale");

    let posted = state.posted_sales.lock().unwrap().clone();
    assert_eq!(posted.len(), 1);
    assert_eq!(posted[0]["barcode"], "111");
    assert_eq!(posted[0]["quantity"], 2);
    assert_eq!(posted[0]["sellingPrice"].as_f64(), Some(10.0));
}

#[tokio::test]
async fn record_sale_accepts_plain_text_created() {
    let (base_url, state, _handle) = start_test_server().await;
    let item = SaleLineItem::new("555", 1, Decimal::ONE);

    client(&base_url)
        .record_sale(&item, &Credential::new("test-token"))
        .await
        .expect("plain-text 201 is a recorded sale");

    assert_eq!(state.posted_sales.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn delete_sale_encodes_id() {
    let (base_url, state, _handle) = start_test_server().await;

    client(&base_url)
        .delete_sale("s/1?x", &Credential::new("test-token"))
        .await
        .expect("delete sale");

    assert_eq!(*state.deleted_sales.lock().unwrap(), vec!["s/1?x".to_string()]);
}

#[tokio::test]
async fn record_sale_surfaces_server_message() {
    let (base_url, _state, _handle) = start_test_server().await;
    let item = SaleLineItem::new("999", 1, Decimal::ONE);

    let err = client(&base_url)
        .record_sale(&item, &Credential::new("test-token"))
        .await
        .unwrap_err();

    assert_eq!(err.server_message(), Some("Insufficient stock"));
}

#[tokio::test]
async fn sales_between_sends_day_bounds() {
    let (base_url, state, _handle) = start_test_server().await;
    let range = DateRange::between(
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        NaiveDate::from_ymd_opt(2025, 3, 2).unwrap(),
    );

    let sales = client(&base_url)
        .sales_between(&range, &Credential::new("test-token"))
        .await
        .expect("sales");
    assert_eq!(sales.len(), 1);

    let query = state.last_query.lock().unwrap().clone().expect("query seen");
    assert_eq!(query["startDate"], "2025-03-01T00:00:00");
    assert_eq!(query["endDate"], "2025-03-02T23:59:59");
}

#[tokio::test]
async fn overview_folds_products_and_sales() {
    let (base_url, _state, _handle) = start_test_server().await;
    let overview = client(&base_url)
        .overview(&Credential::new("test-token"))
        .await
        .expect("overview");

    assert_eq!(overview.total_units, 5);
    assert_eq!(overview.stock_value, Decimal::new(5000, 2));
    assert_eq!(overview.units_sold, 3);
    assert_eq!(overview.out_of_stock, 1);
}

#[tokio::test]
async fn stock_value_report_is_tabulated() {
    let (base_url, _state, _handle) = start_test_server().await;
    let table = client(&base_url)
        .report(Report::StockValue, &Credential::new("test-token"))
        .await
        .expect("report");

    assert_eq!(table.headers.len(), 2);
    assert!(table.headers.iter().any(|h| h == "totalValue"));
    assert_eq!(table.rows.len(), 1);
}

#[tokio::test]
async fn range_report_requires_both_bounds() {
    let (base_url, _state, _handle) = start_test_server().await;
    let err = client(&base_url)
        .report(
            Report::ProfitRange(DateRange::default()),
            &Credential::new("test-token"),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Validation(_)));
}
