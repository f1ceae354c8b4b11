use crate::directory::ReservationDirectory;
use crate::models::{BookingId, ReservationDraft};
use chrono::Utc;
use railseat_catalog::{RouteCatalog, SeatLabel, Section, TrainRoute};
use railseat_core::{
    BookTicketRequest, BookingError, BookingReceipt, BookingResult, ModifySeatRequest,
    ModifySeatResponse, ReceiptRequest, RemoveUserRequest, RemoveUserResponse, SeatOccupant,
    SectionSeatsRequest, SectionSeatsResponse, TrainChartRequest, TrainChartResponse, TrainSummary,
};
use railseat_shared::SeatEvent;
use tokio::sync::broadcast;
use tracing::{debug, error, info};

/// The booking operations offered to the transport layer.
///
/// Every mutation takes the train's inventory lock first and keeps it until the
/// reservation directory reflects the change, so for any one train the seat
/// chart and the directory are never seen out of step. The directory never
/// takes a train lock, which keeps the lock order acyclic.
pub struct BookingService {
    catalog: RouteCatalog,
    directory: ReservationDirectory,
    events: Option<broadcast::Sender<SeatEvent>>,
}

impl BookingService {
    pub fn new(catalog: RouteCatalog) -> Self {
        Self {
            catalog,
            directory: ReservationDirectory::new(),
            events: None,
        }
    }

    /// Publish a [`SeatEvent`] after each committed booking, cancellation or seat change.
    pub fn with_events(mut self, events: broadcast::Sender<SeatEvent>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn catalog(&self) -> &RouteCatalog {
        &self.catalog
    }

    pub fn directory(&self) -> &ReservationDirectory {
        &self.directory
    }

    pub fn subscribe(&self) -> Option<broadcast::Receiver<SeatEvent>> {
        self.events.as_ref().map(broadcast::Sender::subscribe)
    }

    /// Book the first free seat on the train serving the requested route.
    pub fn book(&self, req: BookTicketRequest) -> BookingResult<BookingReceipt> {
        self.try_book(req).map_err(surface)
    }

    pub fn show_receipt(&self, req: ReceiptRequest) -> BookingResult<BookingReceipt> {
        let booking_id = parse_booking_id(&req.booking_id)?;
        require("email", &req.email)?;

        let reservation = self.directory.find(&booking_id, &req.email)?;
        Ok(reservation.receipt())
    }

    /// Cancel a booking and free its seat.
    pub fn remove_user(&self, req: RemoveUserRequest) -> BookingResult<RemoveUserResponse> {
        self.try_remove_user(req).map_err(surface)
    }

    /// Move a booking to a specific free seat on the same train.
    pub fn modify_seat(&self, req: ModifySeatRequest) -> BookingResult<ModifySeatResponse> {
        self.try_modify_seat(req).map_err(surface)
    }

    pub fn view_train_chart(&self, req: TrainChartRequest) -> BookingResult<TrainChartResponse> {
        require("origin", &req.origin)?;
        require("destination", &req.destination)?;

        let train = self.catalog.find_route(&req.origin, &req.destination)?;
        let chart = train
            .render_chart()
            .map_err(|e| surface(e.for_train(train.train_id())))?;

        Ok(TrainChartResponse {
            train_id: train.train_id().to_string(),
            origin: train.origin().to_string(),
            destination: train.destination().to_string(),
            chart,
        })
    }

    /// Occupied seats of one section, each with the passenger holding it.
    pub fn view_seats_by_section(
        &self,
        req: SectionSeatsRequest,
    ) -> BookingResult<SectionSeatsResponse> {
        self.try_view_seats_by_section(req).map_err(surface)
    }

    /// Every train with its current free seat count, in seed order.
    pub fn list_trains(&self) -> BookingResult<Vec<TrainSummary>> {
        self.catalog
            .trains()
            .map(|train| train.summary().map_err(|e| surface(e.for_train(train.train_id()))))
            .collect()
    }

    fn try_book(&self, req: BookTicketRequest) -> BookingResult<BookingReceipt> {
        require("origin", &req.origin)?;
        require("destination", &req.destination)?;
        require("first_name", &req.user.first_name)?;
        require("last_name", &req.user.last_name)?;
        require("email", req.user.email.expose())?;

        let train = self.catalog.find_route(&req.origin, &req.destination)?;
        let mut inventory = train.lock().map_err(|e| e.for_train(train.train_id()))?;
        let seat = inventory.allocate().map_err(|e| e.for_train(train.train_id()))?;

        let draft = ReservationDraft::for_train(train, seat, req.user);
        let reservation = match self.directory.create(draft) {
            Ok(reservation) => reservation,
            Err(err) => {
                if let Err(rollback) = inventory.release(seat) {
                    error!(
                        "Failed to roll back seat {} on train {}: {}",
                        seat,
                        train.train_id(),
                        rollback
                    );
                }
                return Err(err.into());
            }
        };
        drop(inventory);

        info!(
            "Booked seat {} on train {} for booking {} ({:?})",
            reservation.seat, reservation.train_id, reservation.booking_id, reservation.user
        );
        self.publish(SeatEvent::SeatBooked {
            train_id: reservation.train_id.clone(),
            booking_id: reservation.booking_id.as_uuid(),
            seat: reservation.seat.to_string(),
            occurred_at: Utc::now().timestamp(),
        });

        Ok(reservation.receipt())
    }

    fn try_remove_user(&self, req: RemoveUserRequest) -> BookingResult<RemoveUserResponse> {
        let booking_id = parse_booking_id(&req.booking_id)?;
        require("email", &req.email)?;

        let reservation = self.directory.find(&booking_id, &req.email)?;
        let train = self.catalog.find_route_by_train_id(&reservation.train_id)?;
        let mut inventory = train.lock().map_err(|e| e.for_train(train.train_id()))?;

        // Re-read under the train lock: a concurrent cancel or seat change may have won.
        let current = self.directory.find(&booking_id, &req.email)?;
        inventory
            .release(current.seat)
            .map_err(|e| e.for_train(train.train_id()))?;

        if let Err(err) = self.directory.remove(&booking_id) {
            if let Err(rollback) = inventory.claim(current.seat) {
                error!(
                    "Failed to roll back seat {} on train {}: {}",
                    current.seat,
                    train.train_id(),
                    rollback
                );
            }
            return Err(err.into());
        }
        drop(inventory);

        info!(
            "Cancelled booking {}, released seat {} on train {}",
            booking_id, current.seat, current.train_id
        );
        self.publish(SeatEvent::SeatReleased {
            train_id: current.train_id.clone(),
            booking_id: booking_id.as_uuid(),
            seat: current.seat.to_string(),
            occurred_at: Utc::now().timestamp(),
        });

        Ok(RemoveUserResponse {
            booking_id: booking_id.to_string(),
            train_id: current.train_id,
            seat: current.seat.to_string(),
        })
    }

    fn try_modify_seat(&self, req: ModifySeatRequest) -> BookingResult<ModifySeatResponse> {
        let booking_id = parse_booking_id(&req.booking_id)?;
        require("email", &req.email)?;
        require("requested_seat", &req.requested_seat)?;

        let reservation = self.directory.find(&booking_id, &req.email)?;
        let train = self.catalog.find_route_by_train_id(&reservation.train_id)?;
        let mut inventory = train.lock().map_err(|e| e.for_train(train.train_id()))?;
        let requested = inventory
            .parse_label(&req.requested_seat)
            .map_err(|e| e.for_train(train.train_id()))?;

        // The seat being given up is always the booking's own, never one named by the caller.
        let current = self.directory.find(&booking_id, &req.email)?;
        self.ensure_holder(train, &current.seat, &booking_id)?;

        inventory
            .swap(current.seat, requested)
            .map_err(|e| e.for_train(train.train_id()))?;

        if let Err(err) = self.directory.update(&booking_id, requested) {
            if let Err(rollback) = inventory.swap(requested, current.seat) {
                error!(
                    "Failed to roll back seat change on train {}: {}",
                    train.train_id(),
                    rollback
                );
            }
            return Err(err.into());
        }
        drop(inventory);

        info!(
            "Moved booking {} on train {} from seat {} to {}",
            booking_id, current.train_id, current.seat, requested
        );
        self.publish(SeatEvent::SeatChanged {
            train_id: current.train_id.clone(),
            booking_id: booking_id.as_uuid(),
            old_seat: current.seat.to_string(),
            new_seat: requested.to_string(),
            occurred_at: Utc::now().timestamp(),
        });

        Ok(ModifySeatResponse {
            booking_id: booking_id.to_string(),
            train_id: current.train_id,
            old_seat: current.seat.to_string(),
            new_seat: requested.to_string(),
        })
    }

    fn try_view_seats_by_section(
        &self,
        req: SectionSeatsRequest,
    ) -> BookingResult<SectionSeatsResponse> {
        require("origin", &req.origin)?;
        require("destination", &req.destination)?;
        let section: Section = req.section.parse()?;

        let train = self.catalog.find_route(&req.origin, &req.destination)?;
        let inventory = train.lock().map_err(|e| e.for_train(train.train_id()))?;

        let mut seats = Vec::new();
        for seat in inventory.occupied(section) {
            let reservation = self
                .directory
                .find_by_seat(train.train_id(), seat)?
                .ok_or_else(|| {
                    BookingError::InternalInconsistency(format!(
                        "seat {} on train {} is occupied without a reservation",
                        seat,
                        train.train_id()
                    ))
                })?;
            seats.push(SeatOccupant {
                seat: seat.to_string(),
                user: reservation.user,
            });
        }
        drop(inventory);

        Ok(SectionSeatsResponse {
            train_id: train.train_id().to_string(),
            origin: train.origin().to_string(),
            destination: train.destination().to_string(),
            section: section.to_string(),
            seats,
        })
    }

    fn ensure_holder(
        &self,
        train: &TrainRoute,
        seat: &SeatLabel,
        booking_id: &BookingId,
    ) -> BookingResult<()> {
        match self.directory.find_by_seat(train.train_id(), *seat)? {
            Some(holder) if holder.booking_id == *booking_id => Ok(()),
            _ => Err(BookingError::InternalInconsistency(format!(
                "seat {} on train {} is not held by booking {}",
                seat,
                train.train_id(),
                booking_id
            ))),
        }
    }

    fn publish(&self, event: SeatEvent) {
        if let Some(events) = &self.events {
            // No subscribers is not an error.
            let _ = events.send(event);
        }
    }
}

fn require(field: &str, value: &str) -> BookingResult<()> {
    if value.trim().is_empty() {
        return Err(BookingError::InvalidArgument(format!("{} must not be empty", field)));
    }
    Ok(())
}

/// Booking ids are opaque: anything that does not parse cannot name a booking.
fn parse_booking_id(raw: &str) -> BookingResult<BookingId> {
    require("booking_id", raw)?;
    raw.parse()
        .map_err(|_| BookingError::NotFound(raw.to_string()))
}

fn surface(err: BookingError) -> BookingError {
    match &err {
        BookingError::InternalInconsistency(detail) => {
            error!("Booking state inconsistent: {}", detail)
        }
        other => debug!("Booking operation rejected: {}", other),
    }
    err
}
