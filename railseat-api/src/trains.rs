use crate::error::{AppError, AppQuery};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use futures_util::stream::{Stream, StreamExt};
use railseat_core::{
    SectionSeatsRequest, SectionSeatsResponse, TrainChartRequest, TrainChartResponse, TrainSummary,
};
use serde::Deserialize;
use std::convert::Infallible;
use tokio_stream::wrappers::BroadcastStream;
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
pub struct RouteQuery {
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub destination: String,
}

pub async fn list_trains(
    State(state): State<AppState>,
) -> Result<Json<Vec<TrainSummary>>, AppError> {
    Ok(Json(state.bookings.list_trains()?))
}

pub async fn view_train_chart(
    State(state): State<AppState>,
    AppQuery(route): AppQuery<RouteQuery>,
) -> Result<Json<TrainChartResponse>, AppError> {
    let chart = state.bookings.view_train_chart(TrainChartRequest {
        origin: route.origin,
        destination: route.destination,
    })?;
    Ok(Json(chart))
}

pub async fn view_seats_by_section(
    State(state): State<AppState>,
    Path(section): Path<String>,
    AppQuery(route): AppQuery<RouteQuery>,
) -> Result<Json<SectionSeatsResponse>, AppError> {
    let seats = state.bookings.view_seats_by_section(SectionSeatsRequest {
        origin: route.origin,
        destination: route.destination,
        section,
    })?;
    Ok(Json(seats))
}

/// Live seat events for one train as Server-Sent Events.
pub async fn stream_train(
    State(state): State<AppState>,
    Path(train_id): Path<String>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AppError> {
    if state.bookings.catalog().find_route_by_train_id(&train_id).is_err() {
        return Err(AppError::TrainNotFound(train_id));
    }

    info!("Opening seat stream for train {}", train_id);
    let rx = state.sse_tx.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(move |result| {
        let train_id = train_id.clone();
        async move {
            match result {
                Ok(event) if event.train_id() == train_id => Event::default()
                    .event(event.name())
                    .json_data(&event)
                    .ok()
                    .map(Ok),
                Ok(_) => None,
                Err(err) => {
                    // Lagged receivers skip ahead; the client can re-read the chart.
                    warn!("Seat stream for train {} fell behind: {}", train_id, err);
                    None
                }
            }
        }
    });

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}
