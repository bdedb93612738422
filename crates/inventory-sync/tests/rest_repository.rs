//! RestRepository Integration Tests
//!
//! Runs the store over real HTTP against a wiremock server.

use inventory_sync::{
    default_categories, ApiConfig, InventoryStore, Quantity, RestRepository, SyncError,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn store_for(server: &MockServer) -> InventoryStore<RestRepository> {
    let config = ApiConfig::builder()
        .base_url(server.uri())
        .build()
        .expect("mock server URI should be valid");
    InventoryStore::new(RestRepository::new(config))
}

#[tokio::test]
async fn test_categories_use_title_field() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "1", "title": "Weights" },
            { "id": "2", "title": "Swimming" },
        ])))
        .mount(&server)
        .await;

    let categories = store_for(&server).load_categories().await;

    let names: Vec<_> = categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Weights", "Swimming"]);
}

#[tokio::test]
async fn test_categories_server_error_falls_back_to_defaults() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/categories"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    assert_eq!(store_for(&server).load_categories().await, default_categories());
}

#[tokio::test]
async fn test_inventories_not_found_sets_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/inventories"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!("Not found")))
        .mount(&server)
        .await;
    let store = store_for(&server);

    let items = store.load_inventories().await;

    assert!(items.is_empty());
    assert_eq!(
        store.status().error.as_deref(),
        Some("load inventories failed: HTTP error 404")
    );
}

#[tokio::test]
async fn test_inventories_invalid_json_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/inventories"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;
    let store = store_for(&server);

    assert!(store.load_inventories().await.is_empty());
    assert!(store.status().error.is_some());
}

#[tokio::test]
async fn test_get_by_id_server_error_propagates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/inventories/9"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = store_for(&server).get_by_id("9").await.unwrap_err();

    assert!(matches!(err, SyncError::Status { status: 503, .. }));
    assert_eq!(err.to_string(), "get inventory 9 failed: HTTP error 503");
}

#[tokio::test]
async fn test_create_posts_json_and_appends() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/inventories"))
        .and(header("content-type", "application/json"))
        .and(body_partial_json(json!({ "name": "Bench", "price": "19.99" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "42",
            "name": "Bench",
            "price": "19.99",
            "quantity": 3,
        })))
        .expect(1)
        .mount(&server)
        .await;
    let store = store_for(&server);

    let created = store
        .create(&json!({ "name": "Bench", "price": "19.99", "quantity": 3 }))
        .await
        .expect("create should succeed");

    assert_eq!(created.id, "42");
    assert_eq!(created.price, 19.99);
    assert_eq!(created.quantity, Quantity::Number(3.0));
    assert_eq!(created.count(), &Quantity::Number(3.0));
    assert_eq!(store.items().len(), 1);
}

#[tokio::test]
async fn test_update_puts_to_item_path() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/inventories/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "42",
            "name": "Incline bench",
            "count": 2,
        })))
        .expect(1)
        .mount(&server)
        .await;
    let store = store_for(&server);

    let updated = store
        .update("42", &json!({ "name": "Incline bench", "count": 2 }))
        .await
        .unwrap();

    assert_eq!(updated.quantity, Quantity::Number(2.0));
    assert!(store.items().is_empty());
}

#[tokio::test]
async fn test_delete_removes_after_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/inventories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "42", "name": "Bench" },
            { "id": "43", "name": "Mat" },
        ])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/inventories/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "42" })))
        .expect(1)
        .mount(&server)
        .await;
    let store = store_for(&server);
    store.load_inventories().await;

    assert!(store.delete("42").await.unwrap());

    let ids: Vec<_> = store.items().into_iter().map(|item| item.id).collect();
    assert_eq!(ids, vec!["43".to_string()]);
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let config = ApiConfig::builder()
        .base_url("http://127.0.0.1:1")
        .build()
        .unwrap();
    let store = InventoryStore::new(RestRepository::new(config));

    let err = store.delete("42").await.unwrap_err();

    assert!(matches!(err, SyncError::Network { .. }));
    assert!(store.load_categories().await.len() == 9);
}
