//! Catalog caching: repeat listings served from memory, search bypassing the
//! cache, and invalidation after admin mutations.

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pawcart_client::ProductQuery;
use pawcart_integration_tests::test_client;

fn listing_body() -> serde_json::Value {
    json!({
        "products": [{
            "id": "p-1",
            "title": "Salmon Treats",
            "price": 49900,
            "category": "treats",
            "inventory": 40
        }],
        "page": 1,
        "totalPages": 1
    })
}

#[tokio::test]
async fn repeat_listing_is_served_from_cache() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let query = ProductQuery::default();

    let first = client.list_products(&query).await.expect("first listing");
    let second = client.list_products(&query).await.expect("second listing");

    assert_eq!(first, second);
    assert_eq!(first.products[0].title, "Salmon Treats");
}

#[tokio::test]
async fn search_bypasses_the_cache() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("search", "salmon"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing_body()))
        .expect(2)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let query = ProductQuery {
        search: Some("salmon".to_string()),
        ..ProductQuery::default()
    };

    client.list_products(&query).await.expect("first search");
    client.list_products(&query).await.expect("second search");
}

#[tokio::test]
async fn invalidation_forces_a_fresh_fetch() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing_body()))
        .expect(2)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let query = ProductQuery::default();

    client.list_products(&query).await.expect("initial listing");
    client.invalidate_catalog().await;
    client.list_products(&query).await.expect("listing after invalidation");
}
