pub mod booking;
pub mod model;
pub mod repository;

pub use model::{Airport, CabinClass, Flight, FlightAvailability, Seat};

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("{0} not found")]
    NotFound(String),
    #[error("Flight not found or already departed")]
    FlightUnavailable,
    #[error("Not enough free {0} seats on this flight")]
    InsufficientCapacity(model::CabinClass),
    #[error("No free seats of the required class")]
    NoSeatsAvailable,
    #[error("Store is busy, retry later: {0}")]
    Busy(String),
    #[error("Internal store error: {0}")]
    Internal(String),
}

pub type BookingResult<T> = Result<T, BookingError>;
