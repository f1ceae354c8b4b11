use crate::models::{BookingId, Reservation, ReservationDraft};
use railseat_catalog::SeatLabel;
use railseat_core::BookingError;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Default)]
struct Records {
    by_id: HashMap<BookingId, Reservation>,
    by_seat: HashMap<(String, SeatLabel), BookingId>,
}

/// All live reservations, keyed by booking id, plus a `(train, seat)` index.
///
/// Both maps sit behind one lock so they always change together.
#[derive(Debug, Default)]
pub struct ReservationDirectory {
    records: RwLock<Records>,
}

impl ReservationDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new reservation under a freshly generated booking id.
    pub fn create(&self, draft: ReservationDraft) -> Result<Reservation, DirectoryError> {
        let mut records = self.write()?;

        let key = (draft.train_id.clone(), draft.seat);
        if let Some(holder) = records.by_seat.get(&key) {
            return Err(DirectoryError::SeatConflict {
                train_id: key.0,
                seat: key.1.to_string(),
                holder: holder.to_string(),
            });
        }

        let mut booking_id = BookingId::new();
        while records.by_id.contains_key(&booking_id) {
            booking_id = BookingId::new();
        }

        let reservation = draft.into_reservation(booking_id);
        records.by_seat.insert(key, booking_id);
        records.by_id.insert(booking_id, reservation.clone());
        Ok(reservation)
    }

    /// Look a booking up on behalf of a user. A known booking with another
    /// user's email is `Forbidden`, not `NotFound`.
    pub fn find(&self, booking_id: &BookingId, email: &str) -> Result<Reservation, DirectoryError> {
        let records = self.read()?;
        let reservation = records
            .by_id
            .get(booking_id)
            .ok_or_else(|| DirectoryError::NotFound(booking_id.to_string()))?;

        if !reservation.belongs_to(email) {
            return Err(DirectoryError::Forbidden(booking_id.to_string()));
        }
        Ok(reservation.clone())
    }

    /// Which booking holds a seat, if any.
    pub fn find_by_seat(
        &self,
        train_id: &str,
        seat: SeatLabel,
    ) -> Result<Option<Reservation>, DirectoryError> {
        let records = self.read()?;
        Ok(records
            .by_seat
            .get(&(train_id.to_string(), seat))
            .and_then(|booking_id| records.by_id.get(booking_id))
            .cloned())
    }

    /// Point a booking at a new seat.
    pub fn update(
        &self,
        booking_id: &BookingId,
        new_seat: SeatLabel,
    ) -> Result<Reservation, DirectoryError> {
        let mut guard = self.write()?;
        let records = &mut *guard;

        let reservation = records
            .by_id
            .get_mut(booking_id)
            .ok_or_else(|| DirectoryError::NotFound(booking_id.to_string()))?;

        let new_key = (reservation.train_id.clone(), new_seat);
        if let Some(holder) = records.by_seat.get(&new_key) {
            if holder != booking_id {
                return Err(DirectoryError::SeatConflict {
                    train_id: new_key.0,
                    seat: new_seat.to_string(),
                    holder: holder.to_string(),
                });
            }
        }

        records
            .by_seat
            .remove(&(reservation.train_id.clone(), reservation.seat));
        records.by_seat.insert(new_key, *booking_id);
        reservation.seat = new_seat;
        Ok(reservation.clone())
    }

    pub fn remove(&self, booking_id: &BookingId) -> Result<Reservation, DirectoryError> {
        let mut records = self.write()?;
        let reservation = records
            .by_id
            .remove(booking_id)
            .ok_or_else(|| DirectoryError::NotFound(booking_id.to_string()))?;

        records
            .by_seat
            .remove(&(reservation.train_id.clone(), reservation.seat));
        Ok(reservation)
    }

    /// Reservations on one train, ordered by seat.
    pub fn for_train(&self, train_id: &str) -> Result<Vec<Reservation>, DirectoryError> {
        let records = self.read()?;
        let mut reservations: Vec<Reservation> = records
            .by_id
            .values()
            .filter(|r| r.train_id == train_id)
            .cloned()
            .collect();
        reservations.sort_by_key(|r| r.seat);
        Ok(reservations)
    }

    pub fn len(&self) -> Result<usize, DirectoryError> {
        Ok(self.read()?.by_id.len())
    }

    pub fn is_empty(&self) -> Result<bool, DirectoryError> {
        Ok(self.len()? == 0)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Records>, DirectoryError> {
        self.records.read().map_err(|_| DirectoryError::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Records>, DirectoryError> {
        self.records.write().map_err(|_| DirectoryError::LockPoisoned)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
    #[error("Booking not found: {0}")]
    NotFound(String),

    #[error("Booking {0} belongs to another user")]
    Forbidden(String),

    #[error("Seat {seat} on train {train_id} is already held by booking {holder}")]
    SeatConflict {
        train_id: String,
        seat: String,
        holder: String,
    },

    #[error("Reservation directory lock poisoned")]
    LockPoisoned,
}

impl From<DirectoryError> for BookingError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::NotFound(id) => BookingError::NotFound(id),
            DirectoryError::Forbidden(id) => BookingError::Forbidden(id),
            other => BookingError::InternalInconsistency(other.to_string()),
        }
    }
}
