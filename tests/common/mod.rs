use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use serde_json::Value;
use tower::ServiceExt;

use gridmarket_backend::{AppState, routes::api_router};

/// Set up an isolated in-memory test database with the schema applied.
///
/// A single connection keeps the in-memory database alive and shared across
/// all queries in the test.
pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1);
    let db = Database::connect(options).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

/// Build the full application router against a fresh test database
pub async fn build_test_router() -> Router {
    let db = setup_test_db().await.expect("Failed to set up test DB");
    api_router(AppState { db })
}

/// Bearer header value for an authenticated test request
#[allow(dead_code)]
pub fn bearer_token() -> String {
    let token =
        gridmarket_backend::auth::create_access_token("demo").expect("Failed to issue test token");
    format!("Bearer {}", token)
}

/// Fire one request at the router and decode the JSON response (Null for
/// empty bodies).
pub async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    auth: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}

/// Create a contract via the API and return its id
pub async fn create_contract(app: &Router, payload: Value) -> i32 {
    let (status, json) = request(app, "POST", "/api/contracts", None, Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {}", json);
    json["id"].as_i64().unwrap() as i32
}

/// A well-formed contract payload with overridable fields
pub fn contract_payload(overrides: Value) -> Value {
    let mut payload = serde_json::json!({
        "energy_type": "Solar",
        "quantity_mwh": 500,
        "price_per_mwh": 45.50,
        "delivery_start": "2026-03-01",
        "delivery_end": "2026-05-31",
        "location": "California",
        "status": "Available",
    });
    if let (Some(base), Some(extra)) = (payload.as_object_mut(), overrides.as_object()) {
        for (key, value) in extra {
            base.insert(key.clone(), value.clone());
        }
    }
    payload
}
