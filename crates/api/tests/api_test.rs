//! End-to-end tests over the full router with an in-memory store.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use tranzero_api::{AppState, create_router};
use tranzero_shared::types::Currency;
use tranzero_store::{
    CustomerRepository, LedgerRepository, LogActivityRecorder, MemoryStore,
};

fn app() -> Router {
    let store = Arc::new(MemoryStore::new());
    let activity = Arc::new(LogActivityRecorder::new());
    create_router(AppState {
        customers: CustomerRepository::new(store.clone(), activity.clone()),
        ledger: LedgerRepository::new(store, activity),
        currency: Currency::Usd,
    })
}

fn request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("x-user-id", "u-1")
        .header("x-user-name", "Tester");
    match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health() {
    let response = app()
        .oneshot(request("GET", "/api/v1/health", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "tranzero-api");
}

#[tokio::test]
async fn test_missing_identity_is_unauthorized() {
    let response = app()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/teams/t-1/customers")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await;
    assert_eq!(body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_customer_and_transaction_flow() {
    let app = app();

    // Create a customer.
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/v1/teams/t-1/customers",
            Some(json!({ "name": "Ali Traders", "phone_number": "0300-1234567" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let customer = json_body(response).await;
    let customer_id = customer["id"].as_str().unwrap().to_string();

    // Add a receivable of 100.
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            &format!("/api/v1/teams/t-1/customers/{customer_id}/transactions"),
            Some(json!({ "product_name": "Bricks", "receivable": "100", "payable": "0" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let transaction = json_body(response).await;
    assert_eq!(transaction["status"], "unpaid");
    let transaction_id = transaction["id"].as_str().unwrap().to_string();

    // Pay 40: partial.
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            &format!(
                "/api/v1/teams/t-1/customers/{customer_id}/transactions/{transaction_id}/payments"
            ),
            Some(json!({ "amount": "40" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // Listing reflects the remaining 60 in running totals.
    let response = app
        .clone()
        .oneshot(request("GET", "/api/v1/teams/t-1/customers", None))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body[0]["transactions"][0]["status"], "partial");
    assert_eq!(body[0]["totals"]["total_receivable"], "60");

    // Overpayment is a 400 with a stable error code.
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            &format!(
                "/api/v1/teams/t-1/customers/{customer_id}/transactions/{transaction_id}/payments"
            ),
            Some(json!({ "amount": "100" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "OVERPAYMENT");
}

#[tokio::test]
async fn test_unknown_customer_is_not_found() {
    let response = app()
        .oneshot(request("GET", "/api/v1/teams/t-1/customers/missing", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["error"], "CUSTOMER_NOT_FOUND");
}

#[tokio::test]
async fn test_summary_separates_running_and_outstanding() {
    let app = app();
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/v1/teams/t-1/customers",
            Some(json!({ "name": "Ali Traders" })),
        ))
        .await
        .unwrap();
    let customer = json_body(response).await;
    let customer_id = customer["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(request(
            "POST",
            &format!("/api/v1/teams/t-1/customers/{customer_id}/transactions"),
            Some(json!({ "product_name": "Bricks", "receivable": "100", "payable": "0" })),
        ))
        .await
        .unwrap();
    let transaction = json_body(response).await;
    let transaction_id = transaction["id"].as_str().unwrap().to_string();

    // Partial payment: running drops to 60, outstanding drops to zero.
    app.clone()
        .oneshot(request(
            "POST",
            &format!(
                "/api/v1/teams/t-1/customers/{customer_id}/transactions/{transaction_id}/payments"
            ),
            Some(json!({ "amount": "40" })),
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(request("GET", "/api/v1/teams/t-1/summary", None))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["running"]["total_receivable"], "60");
    assert_eq!(body["outstanding"]["total_receivable"], "0");
}

#[tokio::test]
async fn test_account_status_endpoint() {
    let response = app()
        .oneshot(request(
            "POST",
            "/api/v1/account-status",
            Some(json!({ "receivable": "200", "payable": "50" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["netBalance"], "150");
    assert_eq!(body["accountStatus"], "Credit");
    assert_eq!(body["formattedBalance"], "$150.00");
}

#[tokio::test]
async fn test_account_status_settled_when_totals_cancel() {
    let response = app()
        .oneshot(request(
            "POST",
            "/api/v1/account-status",
            Some(json!({ "receivable": "150", "payable": "150" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["netBalance"], "0");
    assert_eq!(body["accountStatus"], "Settled");
}

#[tokio::test]
async fn test_export_then_import() {
    let app = app();
    let response = app
        .clone()
        .oneshot(request(
            "POST",
            "/api/v1/teams/t-1/customers",
            Some(json!({ "name": "Ali Traders" })),
        ))
        .await
        .unwrap();
    let customer = json_body(response).await;
    let customer_id = customer["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(request("GET", "/api/v1/teams/t-1/export", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .unwrap()
            .to_str()
            .unwrap()
            .contains("tranzero-backup.csv")
    );
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let csv = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(csv.contains(&customer_id));

    // Import the backup into a different team.
    let import = Request::builder()
        .method("POST")
        .uri("/api/v1/teams/t-2/import")
        .header("x-user-id", "u-1")
        .header(header::CONTENT_TYPE, "text/csv")
        .body(Body::from(csv))
        .unwrap();
    let response = app.clone().oneshot(import).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    assert_eq!(body["imported"], 1);

    let response = app
        .clone()
        .oneshot(request(
            "GET",
            &format!("/api/v1/teams/t-2/customers/{customer_id}"),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
