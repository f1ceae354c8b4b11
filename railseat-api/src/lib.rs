use axum::{
    http::Method,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod bookings;
pub mod error;
pub mod state;
pub mod trains;

pub use error::AppError;
pub use state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::USER_AGENT,
        ]);

    Router::new()
        .route("/health", get(health))
        .route("/v1/bookings", post(bookings::book_ticket))
        .route(
            "/v1/bookings/{booking_id}",
            get(bookings::show_receipt).delete(bookings::remove_user),
        )
        .route("/v1/bookings/{booking_id}/seat", put(bookings::modify_seat))
        .route("/v1/trains", get(trains::list_trains))
        .route("/v1/trains/chart", get(trains::view_train_chart))
        .route("/v1/trains/sections/{section}", get(trains::view_seats_by_section))
        .route("/v1/trains/{train_id}/stream", get(trains::stream_train))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
