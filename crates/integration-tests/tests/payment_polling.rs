//! Bounded payment-confirmation polling against a mock status endpoint.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pawcart_client::PaymentVerification;
use pawcart_core::OrderId;
use pawcart_integration_tests::test_client;

fn status_body(status: &str) -> serde_json::Value {
    json!({ "paymentStatus": status })
}

#[tokio::test]
async fn poll_confirms_once_status_turns_paid() {
    let server = MockServer::start().await;

    // Two pending probes, then paid. Earlier-mounted mocks win until
    // their response budget is spent.
    Mock::given(method("GET"))
        .and(path("/orders/ord-1/payment-status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_body("pending")))
        .up_to_n_times(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/orders/ord-1/payment-status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_body("paid")))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let outcome = client
        .await_payment_confirmation(
            &OrderId::new("ord-1"),
            Duration::from_millis(10),
            Duration::from_secs(2),
        )
        .await;

    assert_eq!(outcome, PaymentVerification::Confirmed);
}

#[tokio::test]
async fn poll_reports_failed_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/orders/ord-2/payment-status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_body("failed")))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let outcome = client
        .await_payment_confirmation(
            &OrderId::new("ord-2"),
            Duration::from_millis(10),
            Duration::from_secs(2),
        )
        .await;

    assert_eq!(outcome, PaymentVerification::Failed);
}

#[tokio::test]
async fn poll_assumes_success_after_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/orders/ord-3/payment-status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_body("pending")))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let started = std::time::Instant::now();
    let outcome = client
        .await_payment_confirmation(
            &OrderId::new("ord-3"),
            Duration::from_millis(10),
            Duration::from_millis(80),
        )
        .await;

    assert_eq!(outcome, PaymentVerification::AssumedAfterTimeout);
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn probe_errors_do_not_abort_the_poll() {
    let server = MockServer::start().await;

    // One server hiccup, then a terminal status.
    Mock::given(method("GET"))
        .and(path("/orders/ord-4/payment-status"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/orders/ord-4/payment-status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_body("paid")))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let outcome = client
        .await_payment_confirmation(
            &OrderId::new("ord-4"),
            Duration::from_millis(10),
            Duration::from_secs(2),
        )
        .await;

    assert_eq!(outcome, PaymentVerification::Confirmed);
}
