use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Seat occupancy change published after a booking operation commits.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeatEvent {
    SeatBooked {
        train_id: String,
        booking_id: Uuid,
        seat: String,
        occurred_at: i64,
    },
    SeatReleased {
        train_id: String,
        booking_id: Uuid,
        seat: String,
        occurred_at: i64,
    },
    SeatChanged {
        train_id: String,
        booking_id: Uuid,
        old_seat: String,
        new_seat: String,
        occurred_at: i64,
    },
}

impl SeatEvent {
    pub fn train_id(&self) -> &str {
        match self {
            SeatEvent::SeatBooked { train_id, .. }
            | SeatEvent::SeatReleased { train_id, .. }
            | SeatEvent::SeatChanged { train_id, .. } => train_id,
        }
    }

    pub fn booking_id(&self) -> Uuid {
        match self {
            SeatEvent::SeatBooked { booking_id, .. }
            | SeatEvent::SeatReleased { booking_id, .. }
            | SeatEvent::SeatChanged { booking_id, .. } => *booking_id,
        }
    }

    /// SSE event name, e.g. `seat_booked`.
    pub fn name(&self) -> &'static str {
        match self {
            SeatEvent::SeatBooked { .. } => "seat_booked",
            SeatEvent::SeatReleased { .. } => "seat_released",
            SeatEvent::SeatChanged { .. } => "seat_changed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_wire_format() {
        let booking_id = Uuid::new_v4();
        let event = SeatEvent::SeatChanged {
            train_id: "Route1".to_string(),
            booking_id,
            old_seat: "A0".to_string(),
            new_seat: "B3".to_string(),
            occurred_at: 1_700_000_000,
        };

        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "SEAT_CHANGED");
        assert_eq!(value["train_id"], "Route1");
        assert_eq!(value["new_seat"], "B3");
        assert_eq!(event.train_id(), "Route1");
        assert_eq!(event.booking_id(), booking_id);
        assert_eq!(event.name(), "seat_changed");
    }
}
