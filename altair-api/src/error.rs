use altair_core::BookingError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    Booking(BookingError),
    Internal(anyhow::Error),
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        AppError::Booking(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

pub fn status_for(err: &BookingError) -> StatusCode {
    match err {
        BookingError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        BookingError::NotFound(_) => StatusCode::NOT_FOUND,
        BookingError::FlightUnavailable => StatusCode::NOT_FOUND,
        BookingError::InsufficientCapacity(_) => StatusCode::CONFLICT,
        BookingError::NoSeatsAvailable => StatusCode::CONFLICT,
        BookingError::Busy(_) => StatusCode::SERVICE_UNAVAILABLE,
        BookingError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Booking(err) => {
                let status = status_for(&err);
                if status == StatusCode::INTERNAL_SERVER_ERROR {
                    tracing::error!("Internal Server Error: {}", err);
                    (status, "Internal Server Error".to_string())
                } else {
                    (status, err.to_string())
                }
            }
            AppError::Internal(err) => {
                tracing::error!("Internal Server Error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
