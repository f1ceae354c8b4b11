use crate::inventory::{InventoryError, SeatInventory};
use railseat_core::{RouteSeed, TrainSummary};
use std::sync::{Mutex, MutexGuard};

/// A train service: its route, unit price and the seat inventory it owns.
///
/// The inventory sits behind the train's own mutex, so bookings on different
/// trains never wait on each other.
#[derive(Debug)]
pub struct TrainRoute {
    train_id: String,
    origin: String,
    destination: String,
    unit_price: f64,
    inventory: Mutex<SeatInventory>,
}

impl TrainRoute {
    pub fn new(seed: &RouteSeed, seats_per_section: usize) -> Self {
        Self {
            train_id: seed.train_id.clone(),
            origin: seed.origin.clone(),
            destination: seed.destination.clone(),
            unit_price: seed.unit_price,
            inventory: Mutex::new(SeatInventory::new(seats_per_section)),
        }
    }

    pub fn train_id(&self) -> &str {
        &self.train_id
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn unit_price(&self) -> f64 {
        self.unit_price
    }

    /// Acquire the train's inventory lock. Hold the guard for the whole
    /// read-check-write sequence of one operation.
    pub fn lock(&self) -> Result<MutexGuard<'_, SeatInventory>, InventoryError> {
        self.inventory.lock().map_err(|_| InventoryError::LockPoisoned)
    }

    pub fn render_chart(&self) -> Result<String, InventoryError> {
        Ok(self.lock()?.render_chart())
    }

    pub fn summary(&self) -> Result<TrainSummary, InventoryError> {
        let inventory = self.lock()?;
        Ok(TrainSummary {
            train_id: self.train_id.clone(),
            origin: self.origin.clone(),
            destination: self.destination.clone(),
            unit_price: self.unit_price,
            capacity: inventory.total_capacity(),
            free_seats: inventory.free_count(),
        })
    }
}
