use railseat_shared::pii::Masked;
use serde::{Deserialize, Serialize};

// ============================================================================
// Identity & Seed Data
// ============================================================================

/// The passenger a reservation is made for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub first_name: String,
    pub last_name: String,
    pub email: Masked<String>,
}

impl User {
    pub fn new(first_name: &str, last_name: &str, email: &str) -> Self {
        Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: Masked::from(email),
        }
    }
}

/// One train as supplied to the route catalog at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSeed {
    pub train_id: String,
    pub origin: String,
    pub destination: String,
    pub unit_price: f64,
}

impl RouteSeed {
    pub fn new(train_id: &str, origin: &str, destination: &str, unit_price: f64) -> Self {
        Self {
            train_id: train_id.to_string(),
            origin: origin.to_string(),
            destination: destination.to_string(),
            unit_price,
        }
    }
}

// ============================================================================
// Booking Operations
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookTicketRequest {
    pub origin: String,
    pub destination: String,
    pub user: User,
}

/// Snapshot of a reservation, returned by Book and ShowReceipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingReceipt {
    pub booking_id: String,
    pub train_id: String,
    pub origin: String,
    pub destination: String,
    pub user: User,
    pub price_paid: f64,
    pub seat: String,
    pub booked_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiptRequest {
    pub booking_id: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveUserRequest {
    pub booking_id: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoveUserResponse {
    pub booking_id: String,
    pub train_id: String,
    pub seat: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModifySeatRequest {
    pub booking_id: String,
    pub email: String,
    pub requested_seat: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifySeatResponse {
    pub booking_id: String,
    pub train_id: String,
    pub old_seat: String,
    pub new_seat: String,
}

// ============================================================================
// Train Views
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainChartRequest {
    pub origin: String,
    pub destination: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainChartResponse {
    pub train_id: String,
    pub origin: String,
    pub destination: String,
    pub chart: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionSeatsRequest {
    pub origin: String,
    pub destination: String,
    pub section: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeatOccupant {
    pub seat: String,
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionSeatsResponse {
    pub train_id: String,
    pub origin: String,
    pub destination: String,
    pub section: String,
    pub seats: Vec<SeatOccupant>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainSummary {
    pub train_id: String,
    pub origin: String,
    pub destination: String,
    pub unit_price: f64,
    pub capacity: usize,
    pub free_seats: usize,
}
