use crate::error::{AppError, AppJson, AppQuery};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use railseat_core::{
    BookTicketRequest, BookingReceipt, ModifySeatRequest, ModifySeatResponse, ReceiptRequest,
    RemoveUserRequest, RemoveUserResponse,
};
use serde::Deserialize;

// ============================================================================
// Request Types
// ============================================================================

/// `?email=` identifying the passenger acting on a booking.
#[derive(Debug, Deserialize)]
pub struct OwnerQuery {
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct ChangeSeatRequest {
    pub email: String,
    pub requested_seat: String,
}

// ============================================================================
// Handlers
// ============================================================================

pub async fn book_ticket(
    State(state): State<AppState>,
    AppJson(req): AppJson<BookTicketRequest>,
) -> Result<(StatusCode, Json<BookingReceipt>), AppError> {
    let receipt = state.bookings.book(req)?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

pub async fn show_receipt(
    State(state): State<AppState>,
    Path(booking_id): Path<String>,
    AppQuery(owner): AppQuery<OwnerQuery>,
) -> Result<Json<BookingReceipt>, AppError> {
    let receipt = state.bookings.show_receipt(ReceiptRequest {
        booking_id,
        email: owner.email,
    })?;
    Ok(Json(receipt))
}

pub async fn remove_user(
    State(state): State<AppState>,
    Path(booking_id): Path<String>,
    AppQuery(owner): AppQuery<OwnerQuery>,
) -> Result<Json<RemoveUserResponse>, AppError> {
    let removed = state.bookings.remove_user(RemoveUserRequest {
        booking_id,
        email: owner.email,
    })?;
    Ok(Json(removed))
}

pub async fn modify_seat(
    State(state): State<AppState>,
    Path(booking_id): Path<String>,
    AppJson(req): AppJson<ChangeSeatRequest>,
) -> Result<Json<ModifySeatResponse>, AppError> {
    let moved = state.bookings.modify_seat(ModifySeatRequest {
        booking_id,
        email: req.email,
        requested_seat: req.requested_seat,
    })?;
    Ok(Json(moved))
}
