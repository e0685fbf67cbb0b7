//! End-to-end tests driving the router in-process

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use items_service::prelude::*;
use items_service::models::ItemPatch;
use items_service::repository::{ListOptions, ListPage, RepositoryOperation, RepositoryResult};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    let mut config = Config::default();
    config.storage.table_name = "items-test".to_string();
    config.storage.region = "us-east-1".to_string();
    router(AppState::new(config, InMemoryItemRepository::new()))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    let request = match body {
        Some(body) => request.body(Body::from(body.to_string())).unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn create(app: &Router, body: Value) -> Value {
    let (status, json) = send(app, Method::POST, "/items", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "{json}");
    json["data"].clone()
}

fn assert_error(json: &Value, error_type: &str, code: &str) {
    assert_eq!(json["success"], false);
    assert!(json.get("data").is_none());
    assert_eq!(json["error"]["type"], error_type, "{json}");
    assert_eq!(json["error"]["code"], code, "{json}");
}

#[tokio::test]
async fn create_assigns_id_and_defaults() {
    let app = app();
    let item = create(&app, json!({"name": "Widget", "description": "A useful widget"})).await;

    let id = item["id"].as_str().unwrap();
    assert_eq!(uuid::Uuid::parse_str(id).unwrap().get_version_num(), 4);
    assert_eq!(item["status"], "active");
    assert_eq!(item["created_at"], item["updated_at"]);

    let (status, fetched) = send(&app, Method::GET, &format!("/items/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["success"], true);
    assert_eq!(fetched["data"], item);
}

#[tokio::test]
async fn full_lifecycle() {
    let app = app();
    let item = create(&app, json!({"name": "Widget", "description": "A widget"})).await;
    let uri = format!("/items/{}", item["id"].as_str().unwrap());

    let (status, json) = send(&app, Method::PUT, &uri, Some(json!({"status": "invalid_status"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&json, "validation", "INVALID_VALUE");

    let (status, json) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["message"], "Item deleted successfully");
    assert_eq!(json["data"]["deleted_id"], item["id"]);

    let (status, json) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&json, "not_found", "NOT_FOUND");

    let (status, json) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&json, "not_found", "NOT_FOUND");
}

#[tokio::test]
async fn duplicate_id_conflicts_and_keeps_original() {
    let app = app();
    let first = create(&app, json!({"id": "fixed-id", "name": "First"})).await;

    let (status, json) = send(
        &app,
        Method::POST,
        "/items",
        Some(json!({"id": "fixed-id", "name": "Second"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_error(&json, "conflict", "ALREADY_EXISTS");

    let (_, json) = send(&app, Method::GET, "/items/fixed-id", None).await;
    assert_eq!(json["data"], first);
}

#[tokio::test]
async fn unaddressable_requested_id_is_rejected() {
    let app = app();
    let long_id = "i".repeat(129);
    for id in ["a/b", "tab\tid", long_id.as_str()] {
        let (status, json) = send(
            &app,
            Method::POST,
            "/items",
            Some(json!({"id": id, "name": "Widget"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{id:?}");
        assert_error(&json, "validation", "INVALID_VALUE");
        assert_eq!(json["error"]["details"], "field: id");
    }

    let (_, json) = send(&app, Method::GET, "/items", None).await;
    assert_eq!(json["data"]["count"], 0);

    let item = create(&app, json!({"id": "sku-42.v1", "name": "Widget"})).await;
    let (status, json) = send(&app, Method::GET, "/items/sku-42.v1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"], item);
}

#[tokio::test]
async fn update_status_only_keeps_fields() {
    let app = app();
    let item = create(&app, json!({"name": "Widget", "description": "A widget"})).await;
    let uri = format!("/items/{}", item["id"].as_str().unwrap());

    let (status, json) = send(&app, Method::PUT, &uri, Some(json!({"status": "inactive"}))).await;
    assert_eq!(status, StatusCode::OK);

    let updated = &json["data"];
    assert_eq!(updated["status"], "inactive");
    assert_eq!(updated["name"], "Widget");
    assert_eq!(updated["description"], "A widget");
    assert_eq!(updated["created_at"], item["created_at"]);

    let created_at: chrono::DateTime<chrono::Utc> =
        serde_json::from_value(updated["created_at"].clone()).unwrap();
    let updated_at: chrono::DateTime<chrono::Utc> =
        serde_json::from_value(updated["updated_at"].clone()).unwrap();
    assert!(updated_at > created_at);
}

#[tokio::test]
async fn update_missing_item_is_not_found() {
    let (status, json) = send(&app(), Method::PUT, "/items/nope", Some(json!({"name": "x"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&json, "not_found", "NOT_FOUND");
    assert_eq!(json["error"]["details"], "No item found with ID: nope");
}

#[tokio::test]
async fn create_validation_errors() {
    let app = app();

    let cases = [
        (json!({"name": ""}), "MISSING_FIELD"),
        (json!({"name": "x".repeat(101)}), "VALUE_TOO_LONG"),
        (json!({"name": "ok", "description": "d".repeat(501)}), "VALUE_TOO_LONG"),
        (json!({"name": "ok", "description": "   "}), "MISSING_FIELD"),
    ];
    for (body, code) in cases {
        let (status, json) = send(&app, Method::POST, "/items", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_error(&json, "validation", code);
    }

    let item = create(&app, json!({"name": "x".repeat(100), "description": "d".repeat(500)})).await;
    assert_eq!(item["name"].as_str().unwrap().chars().count(), 100);
}

#[tokio::test]
async fn malformed_json_is_invalid_format() {
    let app = app();
    let request = Request::post("/items")
        .header("content-type", "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_error(&json, "validation", "INVALID_FORMAT");
    assert_eq!(json["error"]["message"], "Invalid JSON format");
}

#[tokio::test]
async fn empty_id_segment_is_missing_field() {
    let app = app();
    for method in [Method::GET, Method::PUT, Method::DELETE] {
        let (status, json) = send(&app, method, "/items/", Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_error(&json, "validation", "MISSING_FIELD");
        assert_eq!(json["error"]["message"], "Item ID is required");
    }
}

#[tokio::test]
async fn list_limits() {
    let app = app();

    for limit in ["0", "101"] {
        let (status, json) = send(&app, Method::GET, &format!("/items?limit={limit}"), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_error(&json, "validation", "INVALID_VALUE");
    }

    let (status, json) = send(&app, Method::GET, "/items?limit=abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&json, "validation", "INVALID_FORMAT");

    let (status, json) = send(&app, Method::GET, "/items", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["count"], 0);
    assert_eq!(json["data"]["has_more"], false);
    assert_eq!(json["data"]["items"], json!([]));
}

#[tokio::test]
async fn list_pages_through_items() {
    let app = app();
    for i in 0..5 {
        create(&app, json!({"id": format!("item-{i}"), "name": format!("Item {i}")})).await;
    }

    let mut seen = Vec::new();
    let mut uri = "/items?limit=2".to_string();
    loop {
        let (status, json) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        let data = &json["data"];
        for item in data["items"].as_array().unwrap() {
            seen.push(item["id"].as_str().unwrap().to_string());
        }
        match data["next_token"].as_str() {
            Some(token) => {
                assert_eq!(data["has_more"], true);
                uri = format!("/items?limit=2&next_token={token}");
            }
            None => break,
        }
    }

    assert_eq!(seen, ["item-0", "item-1", "item-2", "item-3", "item-4"]);
}

#[tokio::test]
async fn invalid_continuation_token() {
    let (status, json) = send(&app(), Method::GET, "/items?next_token=!!!", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&json, "validation", "INVALID_FORMAT");
}

#[tokio::test]
async fn health_endpoints() {
    let app = app();
    for uri in ["/", "/health"] {
        let (status, json) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["status"], "healthy");
        assert_eq!(json["data"]["service"], "items-service");
    }

    let (status, json) = send(&app, Method::GET, "/health/db", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["table"], "items-test");
}

/// Store that fails every call with the same error
struct FailingRepository {
    error: RepositoryError,
}

impl ItemRepository for FailingRepository {
    async fn create(&self, _ctx: &RequestContext, _item: Item) -> RepositoryResult<Item> {
        Err(self.error.clone())
    }

    async fn get(&self, _ctx: &RequestContext, _id: &str) -> RepositoryResult<Item> {
        Err(self.error.clone())
    }

    async fn list(&self, _ctx: &RequestContext, _options: &ListOptions) -> RepositoryResult<ListPage> {
        Err(self.error.clone())
    }

    async fn update(&self, _ctx: &RequestContext, _id: &str, _patch: &ItemPatch) -> RepositoryResult<Item> {
        Err(self.error.clone())
    }

    async fn delete(&self, _ctx: &RequestContext, _id: &str) -> RepositoryResult<()> {
        Err(self.error.clone())
    }

    async fn health_check(&self, _ctx: &RequestContext) -> RepositoryResult<()> {
        Err(self.error.clone())
    }
}

fn failing_app(error: RepositoryError) -> Router {
    router(AppState::new(Config::default(), FailingRepository { error }))
}

#[tokio::test]
async fn storage_failures_map_to_statuses() {
    let app = failing_app(RepositoryError::throughput_exceeded(RepositoryOperation::Get));
    let (status, json) = send(&app, Method::GET, "/items/a", None).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_error(&json, "database", "THROUGHPUT_EXCEEDED");

    let app = failing_app(RepositoryError::connection_failed(
        RepositoryOperation::List,
        "dispatch failure",
    ));
    let (status, json) = send(&app, Method::GET, "/items", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_error(&json, "database", "CONNECTION_ERROR");

    let app = failing_app(RepositoryError::operation_failed(
        RepositoryOperation::Create,
        "internal server error",
    ));
    let (status, json) = send(&app, Method::POST, "/items", Some(json!({"name": "x"}))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_error(&json, "database", "DATABASE_ERROR");
    assert!(!json.to_string().contains("internal server error"));
}

#[tokio::test]
async fn failed_storage_health_is_unavailable() {
    let app = failing_app(RepositoryError::connection_failed(
        RepositoryOperation::HealthCheck,
        "no route to host",
    ));
    let (status, json) = send(&app, Method::GET, "/health/db", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_error(&json, "system", "SERVICE_UNAVAILABLE");

    let (status, _) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn extractor_rejections_use_envelope() {
    let app = app();

    let (status, json) = send(&app, Method::GET, "/items?limit=1&limit=2", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&json, "validation", "INVALID_FORMAT");
    assert_eq!(json["error"]["message"], "Invalid query parameters");

    for method in [Method::GET, Method::PUT, Method::DELETE] {
        let (status, json) = send(&app, method, "/items/%FF", Some(json!({"name": "x"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_error(&json, "validation", "INVALID_FORMAT");
        assert_eq!(json["error"]["message"], "Invalid path parameter");
    }
}

#[tokio::test]
async fn oversized_body_is_payload_too_large() {
    let app = app();
    let name = "x".repeat(3 * 1024 * 1024);

    let (status, json) = send(&app, Method::POST, "/items", Some(json!({"name": name}))).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_error(&json, "validation", "PAYLOAD_TOO_LARGE");

    let (status, json) = send(&app, Method::GET, "/items", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["count"], 0);
}

#[tokio::test]
async fn unmatched_requests_use_envelope() {
    let app = app();

    let (status, json) = send(&app, Method::GET, "/widgets/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&json, "not_found", "NOT_FOUND");
    assert_eq!(json["error"]["message"], "Route not found");
    assert_eq!(json["error"]["details"], "No route for GET /widgets/1");

    let (status, json) = send(&app, Method::PATCH, "/items", Some(json!({}))).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_error(&json, "validation", "METHOD_NOT_ALLOWED");
}
