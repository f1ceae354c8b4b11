pub mod models;
pub mod pii;

pub use models::SeatEvent;
pub use pii::Masked;
