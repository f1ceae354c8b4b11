pub mod directory;
pub mod models;
pub mod service;

pub use directory::{DirectoryError, ReservationDirectory};
pub use models::{BookingId, Reservation, ReservationDraft};
pub use service::BookingService;
