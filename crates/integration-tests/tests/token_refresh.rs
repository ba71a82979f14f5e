//! Token refresh behavior: single-flight refresh under concurrent 401s,
//! transparent replay, and failure propagation.

use futures::future::join_all;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pawcart_core::ProductId;
use pawcart_integration_tests::{SERVICE_KEY, test_client};

fn product_body(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": "Rope Tug Toy",
        "price": 29900,
        "category": "toys",
        "inventory": 12
    })
}

#[tokio::test]
async fn concurrent_unauthorized_requests_trigger_exactly_one_refresh() {
    let server = MockServer::start().await;

    // The refresh endpoint must be hit exactly once regardless of how many
    // requests observed the 401.
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .and(header("x-service-key", SERVICE_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessToken": "fresh-token"
        })))
        .expect(1)
        .mount(&server)
        .await;

    // Requests replayed with the refreshed token succeed.
    Mock::given(method("GET"))
        .and(path("/products/p-1"))
        .and(header("authorization", "Bearer fresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(product_body("p-1")))
        .mount(&server)
        .await;

    // Anything else (no token, stale token) is rejected.
    Mock::given(method("GET"))
        .and(path("/products/p-1"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let product_id = ProductId::new("p-1");

    let calls = (0..8).map(|_| {
        let client = client.clone();
        let product_id = product_id.clone();
        tokio::spawn(async move { client.get_product(&product_id).await })
    });

    for result in join_all(calls).await {
        let product = result
            .expect("task should not panic")
            .expect("request should succeed after refresh");
        assert_eq!(product.title, "Rope Tug Toy");
    }

    // Mock expectations (one refresh call) are verified on drop.
}

#[tokio::test]
async fn refreshed_token_is_reused_by_later_requests() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .and(header("x-service-key", SERVICE_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessToken": "fresh-token"
        })))
        .expect(1)
        .mount(&server)
        .await;

    for id in ["p-1", "p-2"] {
        Mock::given(method("GET"))
            .and(path(format!("/products/{id}")))
            .and(header("authorization", "Bearer fresh-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(product_body(id)))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!("/products/{id}")))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
    }

    let client = test_client(&server.uri());

    // First call pays the 401 + refresh cost.
    client
        .get_product(&ProductId::new("p-1"))
        .await
        .expect("first request should succeed");

    // Second call carries the fresh token up front; no second refresh.
    client
        .get_product(&ProductId::new("p-2"))
        .await
        .expect("second request should reuse the token");
}

#[tokio::test]
async fn failed_refresh_surfaces_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products/p-1"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.get_product(&ProductId::new("p-1")).await;

    assert!(matches!(
        result,
        Err(pawcart_client::ApiError::Unauthorized)
    ));
}

#[tokio::test]
async fn bad_credentials_do_not_trigger_a_token_refresh() {
    let server = MockServer::start().await;

    // A credential 401 is final; the service token must stay untouched.
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessToken": "fresh-token"
        })))
        .expect(0)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.login("shopper@example.com", "wrong-password").await;

    assert!(matches!(
        result,
        Err(pawcart_client::ApiError::Unauthorized)
    ));
}

#[tokio::test]
async fn login_returns_the_profile_on_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "cust-1",
            "name": "A Kumar",
            "email": "shopper@example.com",
            "role": "customer"
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let profile = client
        .login("shopper@example.com", "right-password")
        .await
        .expect("login should succeed");

    assert_eq!(profile.id, "cust-1");
    assert_eq!(profile.role, pawcart_client::UserRole::Customer);
}

#[tokio::test]
async fn still_unauthorized_after_refresh_gives_up() {
    let server = MockServer::start().await;

    // The backend refreshes happily but keeps rejecting the request;
    // the client must not loop.
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessToken": "fresh-token"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/products/p-1"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.get_product(&ProductId::new("p-1")).await;

    assert!(matches!(
        result,
        Err(pawcart_client::ApiError::Unauthorized)
    ));
}
