use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use railseat_api::{app, AppState};
use railseat_catalog::RouteCatalog;
use railseat_store::default_routes;
use serde_json::{json, Value};
use std::time::Duration;
use tower::ServiceExt;

fn test_app() -> Router {
    let catalog = RouteCatalog::from_seeds(&default_routes(), 20).unwrap();
    app(AppState::new(catalog, 16))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn book(app: &Router, origin: &str, destination: &str, email: &str) -> (StatusCode, Value) {
    send(
        app,
        Method::POST,
        "/v1/bookings",
        Some(json!({
            "origin": origin,
            "destination": destination,
            "user": { "first_name": "John", "last_name": "Doe", "email": email }
        })),
    )
    .await
}

#[tokio::test]
async fn test_health() {
    let app = test_app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_booking_flow() {
    let app = test_app();

    let (status, receipt) = book(&app, "London", "France", "john.doe@example.com").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(receipt["seat"], "A0");
    assert_eq!(receipt["price_paid"], 20.0);
    assert_eq!(receipt["train_id"], "Route1");
    assert_eq!(receipt["user"]["email"], "john.doe@example.com");
    let booking_id = receipt["booking_id"].as_str().unwrap().to_string();

    let (status, shown) = send(
        &app,
        Method::GET,
        &format!("/v1/bookings/{}?email=john.doe@example.com", booking_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(shown, receipt);

    let (status, moved) = send(
        &app,
        Method::PUT,
        &format!("/v1/bookings/{}/seat", booking_id),
        Some(json!({ "email": "john.doe@example.com", "requested_seat": "B3" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(moved["old_seat"], "A0");
    assert_eq!(moved["new_seat"], "B3");

    let chart_uri = "/v1/trains/chart?origin=London&destination=France";
    let (status, chart) = send(&app, Method::GET, chart_uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(chart["chart"], "\nB3 reserved");

    let (status, section) = send(
        &app,
        Method::GET,
        "/v1/trains/sections/SectionB?origin=London&destination=France",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(section["section"], "B");
    assert_eq!(section["seats"][0]["seat"], "B3");
    assert_eq!(section["seats"][0]["user"]["first_name"], "John");

    let (status, removed) = send(
        &app,
        Method::DELETE,
        &format!("/v1/bookings/{}?email=john.doe@example.com", booking_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(removed["seat"], "B3");

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/v1/bookings/{}?email=john.doe@example.com", booking_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_error_statuses() {
    let app = test_app();

    let (status, body) = book(&app, "", "France", "john.doe@example.com").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_argument");

    let (status, body) = book(&app, "London", "Mars", "john.doe@example.com").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "route_not_found");

    let (_, receipt) = book(&app, "CityA", "CityB", "john.doe@example.com").await;
    let booking_id = receipt["booking_id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/v1/bookings/{}?email=mallory@example.com", booking_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "forbidden");

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/v1/bookings/{}/seat", booking_id),
        Some(json!({ "email": "john.doe@example.com", "requested_seat": "A0" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "seat_unavailable");

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/v1/bookings/{}/seat", booking_id),
        Some(json!({ "email": "john.doe@example.com", "requested_seat": "Z9" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let unknown_uri = "/v1/bookings/not-a-booking?email=john.doe@example.com";
    let (status, _) = send(&app, Method::GET, unknown_uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_bodies_are_invalid_arguments() {
    let app = test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/v1/bookings",
        Some(json!({
            "origin": "London",
            "destination": "France",
            "user": { "first_name": "J", "last_name": "D" }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_argument");
    assert!(body["message"].as_str().unwrap().contains("email"), "{body}");

    let (_, receipt) = book(&app, "London", "France", "john.doe@example.com").await;
    let booking_id = receipt["booking_id"].as_str().unwrap().to_string();
    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/v1/bookings/{}/seat", booking_id),
        Some(json!({ "email": "john.doe@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_argument");

    let request = Request::builder()
        .method(Method::POST)
        .uri("/v1/bookings")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "invalid_argument");
}

#[tokio::test]
async fn test_full_train_is_conflict() {
    let app = test_app();
    for i in 0..40 {
        let (status, _) = book(&app, "CityD", "CityE", &format!("user{}@example.com", i)).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = book(&app, "CityD", "CityE", "late@example.com").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "no_seat_available");
}

#[tokio::test]
async fn test_list_trains() {
    let app = test_app();
    book(&app, "CityA", "CityD", "john.doe@example.com").await;

    let (status, trains) = send(&app, Method::GET, "/v1/trains", None).await;
    assert_eq!(status, StatusCode::OK);
    let trains = trains.as_array().unwrap();
    assert_eq!(trains.len(), 10);
    assert_eq!(trains[2]["train_id"], "Route3");
    assert_eq!(trains[2]["free_seats"], 39);
    assert_eq!(trains[2]["capacity"], 40);
}

#[tokio::test]
async fn test_stream_unknown_train() {
    let app = test_app();
    let (status, body) = send(&app, Method::GET, "/v1/trains/Route99/stream", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "train_not_found");
}

#[tokio::test]
async fn test_stream_delivers_seat_events() {
    let app = test_app();

    let request = Request::builder()
        .uri("/v1/trains/Route2/stream")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE].to_str().unwrap(),
        "text/event-stream"
    );
    let mut body = response.into_body();

    // A booking on another train must not show up on this stream.
    book(&app, "London", "France", "other@example.com").await;
    let (_, receipt) = book(&app, "CityA", "CityB", "john.doe@example.com").await;

    let frame = tokio::time::timeout(Duration::from_secs(5), body.frame())
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    let text = String::from_utf8(frame.into_data().unwrap().to_vec()).unwrap();

    assert!(text.contains("event:") && text.contains("seat_booked"), "{text}");
    assert!(text.contains("\"train_id\":\"Route2\""), "{text}");
    assert!(text.contains(receipt["booking_id"].as_str().unwrap()), "{text}");
}
