use crate::route::TrainRoute;
use railseat_core::{BookingError, RouteSeed};
use std::collections::HashMap;
use tracing::warn;

/// Every train known to the service, fixed at startup.
///
/// Lookups go through two indexes built once in [`RouteCatalog::from_seeds`]:
/// by train id and by `(origin, destination)`. When several trains serve the
/// same route pair the first one in seed order wins route lookup; the others
/// stay reachable by train id.
#[derive(Debug)]
pub struct RouteCatalog {
    trains: Vec<TrainRoute>,
    by_train_id: HashMap<String, usize>,
    by_route: HashMap<String, HashMap<String, usize>>,
    seats_per_section: usize,
}

impl RouteCatalog {
    pub fn from_seeds(seeds: &[RouteSeed], seats_per_section: usize) -> Result<Self, CatalogError> {
        if seats_per_section == 0 {
            return Err(CatalogError::ZeroCapacity);
        }

        let mut trains = Vec::with_capacity(seeds.len());
        let mut by_train_id = HashMap::with_capacity(seeds.len());
        let mut by_route: HashMap<String, HashMap<String, usize>> = HashMap::new();

        for (position, seed) in seeds.iter().enumerate() {
            validate_seed(seed)?;

            if by_train_id.insert(seed.train_id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateTrainId(seed.train_id.clone()));
            }

            let destinations = by_route.entry(seed.origin.clone()).or_default();
            if let Some(first) = destinations.get(&seed.destination) {
                warn!(
                    "Train {} duplicates route {} -> {} of train {}; route lookups keep the first",
                    seed.train_id, seed.origin, seed.destination, seeds[*first].train_id
                );
            } else {
                destinations.insert(seed.destination.clone(), position);
            }

            trains.push(TrainRoute::new(seed, seats_per_section));
        }

        Ok(Self {
            trains,
            by_train_id,
            by_route,
            seats_per_section,
        })
    }

    pub fn find_route(&self, origin: &str, destination: &str) -> Result<&TrainRoute, CatalogError> {
        self.by_route
            .get(origin)
            .and_then(|destinations| destinations.get(destination))
            .map(|position| &self.trains[*position])
            .ok_or_else(|| CatalogError::RouteNotFound {
                origin: origin.to_string(),
                destination: destination.to_string(),
            })
    }

    pub fn find_route_by_train_id(&self, train_id: &str) -> Result<&TrainRoute, CatalogError> {
        self.by_train_id
            .get(train_id)
            .map(|position| &self.trains[*position])
            .ok_or_else(|| CatalogError::TrainNotFound(train_id.to_string()))
    }

    pub fn unit_price(&self, origin: &str, destination: &str) -> Result<f64, CatalogError> {
        self.find_route(origin, destination).map(TrainRoute::unit_price)
    }

    /// Trains in seed order.
    pub fn trains(&self) -> impl Iterator<Item = &TrainRoute> {
        self.trains.iter()
    }

    pub fn len(&self) -> usize {
        self.trains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trains.is_empty()
    }

    pub fn seats_per_section(&self) -> usize {
        self.seats_per_section
    }
}

fn validate_seed(seed: &RouteSeed) -> Result<(), CatalogError> {
    let fields = [
        ("train_id", &seed.train_id),
        ("origin", &seed.origin),
        ("destination", &seed.destination),
    ];
    for (field, value) in fields {
        if value.trim().is_empty() {
            return Err(CatalogError::EmptyField {
                train_id: seed.train_id.clone(),
                field,
            });
        }
    }

    if !seed.unit_price.is_finite() || seed.unit_price < 0.0 {
        return Err(CatalogError::InvalidPrice {
            train_id: seed.train_id.clone(),
            price: seed.unit_price,
        });
    }

    Ok(())
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("Route seed for train '{train_id}' has an empty {field}")]
    EmptyField { train_id: String, field: &'static str },

    #[error("Duplicate train id: {0}")]
    DuplicateTrainId(String),

    #[error("Invalid unit price {price} for train {train_id}")]
    InvalidPrice { train_id: String, price: f64 },

    #[error("Seat sections must hold at least one seat")]
    ZeroCapacity,

    #[error("No train runs from {origin} to {destination}")]
    RouteNotFound { origin: String, destination: String },

    #[error("Train not found: {0}")]
    TrainNotFound(String),
}

impl From<CatalogError> for BookingError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::RouteNotFound { origin, destination } => {
                BookingError::RouteNotFound { origin, destination }
            }
            // Reservations only ever reference trains from the catalog.
            CatalogError::TrainNotFound(train_id) => BookingError::InternalInconsistency(format!(
                "reservation references unknown train {}",
                train_id
            )),
            other => BookingError::InvalidArgument(other.to_string()),
        }
    }
}
