pub mod catalog;
pub mod inventory;
pub mod route;
pub mod seat;

pub use catalog::{CatalogError, RouteCatalog};
pub use inventory::{InventoryError, SeatInventory};
pub use route::TrainRoute;
pub use seat::{SeatLabel, SeatLabelError, Section};
