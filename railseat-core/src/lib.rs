pub mod contract;

pub use contract::{
    BookTicketRequest, BookingReceipt, ModifySeatRequest, ModifySeatResponse, ReceiptRequest,
    RemoveUserRequest, RemoveUserResponse, RouteSeed, SeatOccupant, SectionSeatsRequest,
    SectionSeatsResponse, TrainChartRequest, TrainChartResponse, TrainSummary, User,
};

/// Failure kinds surfaced by every booking operation.
///
/// The transport maps each variant to its own status code; none of them is retried by the core.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("No train runs from {origin} to {destination}")]
    RouteNotFound { origin: String, destination: String },

    #[error("No seat available on train {0}")]
    NoSeatAvailable(String),

    #[error("Seat {seat} is not available on train {train_id}")]
    SeatUnavailable { train_id: String, seat: String },

    #[error("Booking not found: {0}")]
    NotFound(String),

    #[error("Booking {0} does not belong to the supplied user")]
    Forbidden(String),

    #[error("Seat chart and reservations disagree: {0}")]
    InternalInconsistency(String),
}

impl BookingError {
    /// Stable machine-readable code, used in transport error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            BookingError::InvalidArgument(_) => "invalid_argument",
            BookingError::RouteNotFound { .. } => "route_not_found",
            BookingError::NoSeatAvailable(_) => "no_seat_available",
            BookingError::SeatUnavailable { .. } => "seat_unavailable",
            BookingError::NotFound(_) => "not_found",
            BookingError::Forbidden(_) => "forbidden",
            BookingError::InternalInconsistency(_) => "internal_inconsistency",
        }
    }
}

pub type BookingResult<T> = Result<T, BookingError>;
