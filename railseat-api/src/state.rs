use railseat_catalog::RouteCatalog;
use railseat_order::BookingService;
use railseat_shared::SeatEvent;
use std::sync::Arc;
use tokio::sync::broadcast;

#[derive(Clone)]
pub struct AppState {
    pub bookings: Arc<BookingService>,
    pub sse_tx: broadcast::Sender<SeatEvent>,
}

impl AppState {
    /// Wire a booking service to a fresh event channel that the SSE handlers subscribe to.
    pub fn new(catalog: RouteCatalog, channel_capacity: usize) -> Self {
        let (sse_tx, _) = broadcast::channel(channel_capacity);
        let bookings = BookingService::new(catalog).with_events(sse_tx.clone());

        Self {
            bookings: Arc::new(bookings),
            sse_tx,
        }
    }
}
