use chrono::{DateTime, Utc};
use railseat_catalog::{SeatLabel, TrainRoute};
use railseat_core::{BookingReceipt, User};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Opaque handle to a reservation. Callers only ever echo it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(Uuid);

impl BookingId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for BookingId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BookingId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// A booked seat: one reservation owns exactly one occupied seat on one train.
#[derive(Debug, Clone, PartialEq)]
pub struct Reservation {
    pub booking_id: BookingId,
    pub train_id: String,
    pub origin: String,
    pub destination: String,
    pub price_paid: f64,
    pub seat: SeatLabel,
    pub user: User,
    pub booked_at: DateTime<Utc>,
}

impl Reservation {
    pub fn receipt(&self) -> BookingReceipt {
        BookingReceipt {
            booking_id: self.booking_id.to_string(),
            train_id: self.train_id.clone(),
            origin: self.origin.clone(),
            destination: self.destination.clone(),
            user: self.user.clone(),
            price_paid: self.price_paid,
            seat: self.seat.to_string(),
            booked_at: self.booked_at,
        }
    }

    /// Whether `email` is the address the booking was made with.
    pub fn belongs_to(&self, email: &str) -> bool {
        self.user.email.expose() == email
    }
}

/// Everything a reservation needs except the identifier the directory assigns.
#[derive(Debug, Clone)]
pub struct ReservationDraft {
    pub train_id: String,
    pub origin: String,
    pub destination: String,
    pub price_paid: f64,
    pub seat: SeatLabel,
    pub user: User,
}

impl ReservationDraft {
    /// The passenger pays the train's unit price.
    pub fn for_train(train: &TrainRoute, seat: SeatLabel, user: User) -> Self {
        Self {
            train_id: train.train_id().to_string(),
            origin: train.origin().to_string(),
            destination: train.destination().to_string(),
            price_paid: train.unit_price(),
            seat,
            user,
        }
    }

    pub(crate) fn into_reservation(self, booking_id: BookingId) -> Reservation {
        Reservation {
            booking_id,
            train_id: self.train_id,
            origin: self.origin,
            destination: self.destination,
            price_paid: self.price_paid,
            seat: self.seat,
            user: self.user,
            booked_at: Utc::now(),
        }
    }
}
