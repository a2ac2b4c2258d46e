//! Router tests driven through `tower::ServiceExt::oneshot`.

#![expect(clippy::unwrap_used, reason = "test code")]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use catalog_core::{Item, ItemId};
use catalog_storage::JsonFileStore;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

use crate::{AppState, create_router};

fn test_router(items: &[Item]) -> (Router, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("items.json");
    std::fs::write(&path, serde_json::to_vec_pretty(items).unwrap()).unwrap();
    let state = AppState::new(Arc::new(JsonFileStore::new(path)), Duration::from_secs(300));
    (create_router(Arc::new(state)), temp_dir)
}

fn catalog(count: i64) -> Vec<Item> {
    (1..=count)
        .map(|i| Item::new(ItemId::Int(i), &format!("Gadget {i}"), "Electronics", 20.0))
        .collect()
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn list_items_envelope() {
    let (router, _dir) = test_router(&catalog(25));

    let (status, body) = send(&router, get("/api/items?page=3&limit=10")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().unwrap().len(), 5);
    assert_eq!(body["items"][0]["id"], 21);
    assert_eq!(
        body["pagination"],
        json!({
            "currentPage": 3,
            "itemsPerPage": 10,
            "totalItems": 25,
            "totalPages": 3,
            "hasNextPage": false,
            "hasPrevPage": true
        })
    );
}

#[tokio::test]
async fn list_items_search_and_bad_params() {
    let (router, _dir) = test_router(&catalog(12));

    let (status, body) = send(&router, get("/api/items?q=gadget%201&page=abc")).await;

    assert_eq!(status, StatusCode::OK);
    // "Gadget 1", "Gadget 10", "Gadget 11", "Gadget 12"
    assert_eq!(body["pagination"]["totalItems"], 4);
    assert_eq!(body["pagination"]["currentPage"], 1);
}

#[tokio::test]
async fn get_item_by_id() {
    let (router, _dir) = test_router(&catalog(3));

    let (status, body) = send(&router, get("/api/items/2")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Gadget 2");
}

#[tokio::test]
async fn get_missing_item_is_404_with_message() {
    let (router, _dir) = test_router(&catalog(3));

    let (status, body) = send(&router, get("/api/items/abc")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"message": "Item not found"}));
}

#[tokio::test]
async fn create_item_returns_201_and_is_retrievable() {
    let (router, _dir) = test_router(&catalog(1));

    let payload = json!({"name": "Webcam", "category": "Electronics", "price": 59.5});
    let (status, created) = send(&router, post_json("/api/items", &payload)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Webcam");
    assert!(created["id"].is_i64());

    let uri = format!("/api/items/{}", created["id"]);
    let (status, fetched) = send(&router, get(&uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn create_invalid_item_is_400() {
    let (router, _dir) = test_router(&[]);

    let (status, body) =
        send(&router, post_json("/api/items", &json!({"name": "No price", "category": "x"})))
            .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "price is required");
}

#[tokio::test]
async fn stats_report_and_cache_flag() {
    let (router, _dir) = test_router(&catalog(4));

    let (status, first) = send(&router, get("/api/stats")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["total"], 4);
    assert_eq!(first["averagePrice"], 20.0);
    assert_eq!(first["categories"], json!({"Electronics": 4}));
    assert_eq!(first["cached"], false);

    let (_, second) = send(&router, get("/api/stats")).await;
    assert_eq!(second["cached"], true);
    assert_eq!(second["lastUpdated"], first["lastUpdated"]);
}

#[tokio::test]
async fn corrupt_store_is_500_without_details() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("items.json");
    std::fs::write(&path, "not json").unwrap();
    let state = AppState::new(Arc::new(JsonFileStore::new(path)), Duration::from_secs(300));
    let router = create_router(Arc::new(state));

    let (status, body) = send(&router, get("/api/items")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"message": "internal server error"}));
}

#[tokio::test]
async fn health_is_ok() {
    let (router, _dir) = test_router(&[]);
    let response = router.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn loose_records_do_not_break_the_collection() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("items.json");
    let raw = json!([
        {"id": 1, "name": "Desk", "category": "Furniture", "price": 120},
        {"id": 2, "category": "F", "price": 7},
        {"id": 3, "name": "Lamp", "category": "Home", "price": null}
    ]);
    std::fs::write(&path, raw.to_string()).unwrap();
    let state = AppState::new(Arc::new(JsonFileStore::new(path)), Duration::from_secs(300));
    let router = create_router(Arc::new(state));

    let (status, list) = send(&router, get("/api/items")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["pagination"]["totalItems"], 3);

    let (status, found) = send(&router, get("/api/items/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found["name"], "Desk");

    let (status, search) = send(&router, get("/api/items?q=lamp")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(search["items"][0]["price"], 0.0);

    let (status, stats) = send(&router, get("/api/stats")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["total"], 3);
    assert_eq!(stats["averagePrice"], 42.33);
}

#[tokio::test]
async fn list_items_reads_numeric_prefix_of_page() {
    let (router, _dir) = test_router(&catalog(25));

    let (status, body) = send(&router, get("/api/items?page=2abc&limit=10")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["currentPage"], 2);
    assert_eq!(body["items"][0]["id"], 11);
}
