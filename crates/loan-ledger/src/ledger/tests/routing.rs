use super::common::*;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, Method, Request, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::ledger::interest::InterestRate;
use crate::ledger::router::{add_handler, get_handler};
use crate::ledger::ApplicationLedger;

fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).expect("serialize body")))
        .expect("request builds")
}

fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request builds")
}

#[tokio::test]
async fn quote_route_returns_message_and_amounts() {
    let (ledger, store) = build_ledger();
    let router = router_with_ledger(ledger);

    let response = router
        .oneshot(json_request(
            Method::POST,
            "/api/v1/applications/quote",
            json!({ "principal": 1200, "duration": 6 }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload.get("message").and_then(Value::as_str),
        Some("The interest is '12' and the total amount to be paid is '1212'")
    );
    let total = payload
        .get("totalAmount")
        .and_then(Value::as_f64)
        .expect("total present");
    assert!(approx(total, 1212.0));
    assert!(store.is_empty().expect("store readable"));
}

#[tokio::test]
async fn add_route_creates_record_with_receipt() {
    let (ledger, store) = build_ledger();
    let router = router_with_ledger(ledger);

    let response = router
        .oneshot(json_request(
            Method::POST,
            "/api/v1/applications",
            json!({ "principal": 1000, "duration": 12 }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    let application = payload.get("application").expect("record returned");
    let id = application
        .get("id")
        .and_then(Value::as_str)
        .expect("id present");
    assert_eq!(application.get("status"), Some(&json!("pending")));
    assert!(application.get("createdAt").is_some());
    assert!(application.get("updatedAt").is_none());
    assert!(payload
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .contains(id));
    assert_eq!(store.len().expect("store readable"), 1);
}

#[tokio::test]
async fn add_route_rejects_zero_principal() {
    let (ledger, store) = build_ledger();
    let router = router_with_ledger(ledger);

    let response = router
        .oneshot(json_request(
            Method::POST,
            "/api/v1/applications",
            json!({ "principal": 0, "duration": 12 }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert_eq!(payload, json!({ "error": "Invalid payload provided." }));
    assert!(store.is_empty().expect("store readable"));
}

#[tokio::test]
async fn get_route_returns_not_found_for_unknown_id() {
    let (ledger, _) = build_ledger();
    let router = router_with_ledger(ledger);

    let response = router
        .oneshot(empty_request(Method::GET, "/api/v1/applications/unknown"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload,
        json!({ "error": "The application with ID unknown is not found" })
    );
}

#[tokio::test]
async fn update_and_delete_routes_round_out_the_lifecycle() {
    let (ledger, _) = build_ledger();
    let ledger = Arc::new(ledger);
    let created = ledger
        .add_application(request(1000, 12))
        .expect("application stored");
    let uri = format!("/api/v1/applications/{}", created.id);
    let router = crate::ledger::ledger_router(ledger.clone());

    let response = router
        .clone()
        .oneshot(json_request(
            Method::PUT,
            &uri,
            json!({ "principal": 2000, "duration": 24 }),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("id"), Some(&json!(created.id.as_str())));

    let response = router
        .clone()
        .oneshot(empty_request(Method::GET, &uri))
        .await
        .expect("route executes");
    let payload = read_json_body(response).await;
    let interest = payload
        .get("interest")
        .and_then(Value::as_f64)
        .expect("interest present");
    assert!(approx(interest, 80.0));
    assert!(payload.get("updatedAt").is_some());

    let response = router
        .clone()
        .oneshot(empty_request(Method::DELETE, &uri))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .oneshot(empty_request(Method::DELETE, &uri))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_route_returns_records_in_key_order() {
    let (ledger, _) = build_ledger();
    let ledger = Arc::new(ledger);
    for principal in [500, 1500, 2500] {
        ledger
            .add_application(request(principal, 12))
            .expect("application stored");
    }
    let router = crate::ledger::ledger_router(ledger);

    let response = router
        .oneshot(empty_request(Method::GET, "/api/v1/applications"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let ids: Vec<&str> = payload
        .as_array()
        .expect("array payload")
        .iter()
        .filter_map(|record| record.get("id").and_then(Value::as_str))
        .collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids.len(), 3);
    assert_eq!(ids, sorted);
}

#[tokio::test]
async fn get_handler_rejects_empty_id() {
    let (ledger, _) = build_ledger();

    let response = match get_handler(State(Arc::new(ledger)), Path(String::new())).await {
        Ok(_) => panic!("empty id accepted"),
        Err(error) => error.into_response(),
    };
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn add_handler_returns_internal_error_on_store_outage() {
    let ledger = Arc::new(ApplicationLedger::new(
        Arc::new(UnavailableStore),
        Arc::new(SteppingClock::default()),
        InterestRate::default(),
    ));

    let response = match add_handler(State(ledger), Json(request(1000, 12))).await {
        Ok(_) => panic!("store offline but add succeeded"),
        Err(error) => error.into_response(),
    };
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
