use crate::seat::{SeatLabel, SeatLabelError, Section};
use railseat_core::BookingError;

/// Occupancy of one train's seats: two sections of equal capacity, one flag per seat.
///
/// All mutation goes through `&mut self`, so a caller holding the train's lock
/// sees every operation as a single step.
#[derive(Debug, Clone)]
pub struct SeatInventory {
    capacity: usize,
    sections: [Vec<bool>; 2],
}

impl SeatInventory {
    /// All seats start free.
    pub fn new(seats_per_section: usize) -> Self {
        Self {
            capacity: seats_per_section,
            sections: [vec![false; seats_per_section], vec![false; seats_per_section]],
        }
    }

    /// Seats per section.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn total_capacity(&self) -> usize {
        self.capacity * Section::ALL.len()
    }

    pub fn occupied_count(&self) -> usize {
        self.sections
            .iter()
            .map(|seats| seats.iter().filter(|taken| **taken).count())
            .sum()
    }

    pub fn free_count(&self) -> usize {
        self.total_capacity() - self.occupied_count()
    }

    /// Parse a raw label against this inventory's bounds.
    pub fn parse_label(&self, raw: &str) -> Result<SeatLabel, InventoryError> {
        Ok(SeatLabel::parse(raw, self.capacity)?)
    }

    pub fn is_occupied(&self, label: SeatLabel) -> Result<bool, InventoryError> {
        self.check_bounds(label)?;
        Ok(self.sections[label.section().slot()][label.index()])
    }

    /// Claim the first free seat, section A before B, lowest index first.
    pub fn allocate(&mut self) -> Result<SeatLabel, InventoryError> {
        for section in Section::ALL {
            let seats = &mut self.sections[section.slot()];
            if let Some(index) = seats.iter().position(|taken| !*taken) {
                seats[index] = true;
                return Ok(SeatLabel::new(section, index));
            }
        }
        Err(InventoryError::NoSeatAvailable)
    }

    /// Occupy one specific seat if it is free.
    pub fn claim(&mut self, label: SeatLabel) -> Result<(), InventoryError> {
        let seat = self.seat_mut(label)?;
        if *seat {
            return Err(InventoryError::SeatUnavailable(label.to_string()));
        }
        *seat = true;
        Ok(())
    }

    /// Free an occupied seat. Freeing a free seat is reported, not ignored.
    pub fn release(&mut self, label: SeatLabel) -> Result<(), InventoryError> {
        let seat = self.seat_mut(label)?;
        if !*seat {
            return Err(InventoryError::SeatAlreadyFree(label.to_string()));
        }
        *seat = false;
        Ok(())
    }

    /// Move an occupant from `old` to `new`.
    ///
    /// `new` must be free and `old` must be occupied; otherwise nothing changes.
    pub fn swap(&mut self, old: SeatLabel, new: SeatLabel) -> Result<(), InventoryError> {
        if self.is_occupied(new)? {
            return Err(InventoryError::SeatUnavailable(new.to_string()));
        }
        if !self.is_occupied(old)? {
            return Err(InventoryError::SeatAlreadyFree(old.to_string()));
        }

        *self.seat_mut(new)? = true;
        *self.seat_mut(old)? = false;
        Ok(())
    }

    /// Occupied seats of one section in ascending index order.
    pub fn occupied(&self, section: Section) -> Vec<SeatLabel> {
        self.sections[section.slot()]
            .iter()
            .enumerate()
            .filter(|(_, taken)| **taken)
            .map(|(index, _)| SeatLabel::new(section, index))
            .collect()
    }

    /// One line per section, `"<Label> reserved"` entries joined by `"; "`.
    /// An all-free section is an empty line.
    pub fn render_chart(&self) -> String {
        Section::ALL
            .iter()
            .map(|section| {
                self.occupied(*section)
                    .iter()
                    .map(|label| format!("{} reserved", label))
                    .collect::<Vec<_>>()
                    .join("; ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn check_bounds(&self, label: SeatLabel) -> Result<(), InventoryError> {
        if label.index() >= self.capacity {
            return Err(SeatLabelError::OutOfRange {
                label: label.to_string(),
                capacity: self.capacity,
            }
            .into());
        }
        Ok(())
    }

    fn seat_mut(&mut self, label: SeatLabel) -> Result<&mut bool, InventoryError> {
        self.check_bounds(label)?;
        Ok(&mut self.sections[label.section().slot()][label.index()])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InventoryError {
    #[error(transparent)]
    InvalidSeatLabel(#[from] SeatLabelError),

    #[error("No seat available")]
    NoSeatAvailable,

    #[error("Seat {0} is already occupied")]
    SeatUnavailable(String),

    #[error("Seat {0} is already free")]
    SeatAlreadyFree(String),

    #[error("Seat inventory lock poisoned")]
    LockPoisoned,
}

impl InventoryError {
    /// Attach the train the failure happened on.
    pub fn for_train(self, train_id: &str) -> BookingError {
        match self {
            InventoryError::InvalidSeatLabel(err) => err.into(),
            InventoryError::NoSeatAvailable => BookingError::NoSeatAvailable(train_id.to_string()),
            InventoryError::SeatUnavailable(seat) => BookingError::SeatUnavailable {
                train_id: train_id.to_string(),
                seat,
            },
            InventoryError::SeatAlreadyFree(seat) => BookingError::InternalInconsistency(format!(
                "seat {} on train {} is booked but free in the chart",
                seat, train_id
            )),
            InventoryError::LockPoisoned => BookingError::InternalInconsistency(format!(
                "seat inventory of train {} is poisoned",
                train_id
            )),
        }
    }
}
