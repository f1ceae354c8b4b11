use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        FromRequest, FromRequestParts,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use railseat_core::BookingError;
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    Booking(BookingError),
    TrainNotFound(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Booking(err) => match err {
                BookingError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
                BookingError::RouteNotFound { .. } | BookingError::NotFound(_) => {
                    StatusCode::NOT_FOUND
                }
                BookingError::Forbidden(_) => StatusCode::FORBIDDEN,
                BookingError::NoSeatAvailable(_) | BookingError::SeatUnavailable { .. } => {
                    StatusCode::CONFLICT
                }
                BookingError::InternalInconsistency(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::TrainNotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::Booking(err) => err.code(),
            AppError::TrainNotFound(_) => "train_not_found",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::Booking(BookingError::InternalInconsistency(detail)) => {
                tracing::error!("Internal Server Error: {}", detail);
                "Internal Server Error".to_string()
            }
            AppError::Booking(err) => err.to_string(),
            AppError::TrainNotFound(train_id) => format!("Train not found: {}", train_id),
        };

        let body = Json(json!({
            "error": self.code(),
            "message": message,
        }));

        (status, body).into_response()
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        Self::Booking(err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Booking(BookingError::InvalidArgument(rejection.body_text()))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Booking(BookingError::InvalidArgument(rejection.body_text()))
    }
}

/// `axum::Json` whose rejections answer with the booking error body.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// `axum::extract::Query` whose rejections answer with the booking error body.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: BookingError) -> StatusCode {
        AppError::from(err).into_response().status()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_of(BookingError::InvalidArgument("origin".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(BookingError::RouteNotFound {
                origin: "A".into(),
                destination: "B".into()
            }),
            StatusCode::NOT_FOUND
        );
        assert_eq!(status_of(BookingError::NotFound("x".into())), StatusCode::NOT_FOUND);
        assert_eq!(status_of(BookingError::Forbidden("x".into())), StatusCode::FORBIDDEN);
        assert_eq!(
            status_of(BookingError::NoSeatAvailable("Route1".into())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(BookingError::SeatUnavailable {
                train_id: "Route1".into(),
                seat: "B1".into()
            }),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(BookingError::InternalInconsistency("x".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::TrainNotFound("Route99".into()).into_response().status(),
            StatusCode::NOT_FOUND
        );
    }
}
