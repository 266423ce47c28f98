use crate::error::AppError;
use crate::state::AppState;
use altair_core::model::{Aircraft, Airport, Flight, FlightAvailability, Seat};
use altair_core::BookingError;
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use uuid::Uuid;

// Listing behaviour: departures for the next 12 hours, and the next 3
// connections that still have free seats.
const DEPARTURE_WINDOW_HOURS: i64 = 12;
const CONNECTION_LIMIT: i64 = 3;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/airports", get(list_airports))
        .route("/flights/{origin}", get(list_departures))
        .route("/flights/{origin}/{destination}", get(list_connections))
        .route("/availability/{flight_id}", get(flight_availability))
        .route("/aircraft/{serial}", get(aircraft_layout))
}

async fn list_airports(State(state): State<AppState>) -> Result<Json<Vec<Airport>>, AppError> {
    let airports = state.catalog.list_airports().await?;
    Ok(Json(airports))
}

async fn list_departures(
    State(state): State<AppState>,
    Path(origin): Path<String>,
) -> Result<Json<Vec<Flight>>, AppError> {
    state
        .catalog
        .get_airport(&origin)
        .await?
        .ok_or_else(|| BookingError::NotFound("airport".to_string()))?;

    let flights = state
        .catalog
        .departures_within(&origin, DEPARTURE_WINDOW_HOURS)
        .await?;
    Ok(Json(flights))
}

async fn list_connections(
    State(state): State<AppState>,
    Path((origin, destination)): Path<(String, String)>,
) -> Result<Json<Vec<Flight>>, AppError> {
    for code in [&origin, &destination] {
        state
            .catalog
            .get_airport(code)
            .await?
            .ok_or_else(|| BookingError::NotFound("airport".to_string()))?;
    }

    let flights = state
        .catalog
        .connections_with_seats(&origin, &destination, CONNECTION_LIMIT)
        .await?;
    Ok(Json(flights))
}

#[derive(Debug, Serialize)]
struct AircraftLayout {
    #[serde(flatten)]
    aircraft: Aircraft,
    seats: Vec<Seat>,
}

async fn aircraft_layout(
    State(state): State<AppState>,
    Path(serial): Path<String>,
) -> Result<Json<AircraftLayout>, AppError> {
    let aircraft = state
        .catalog
        .get_aircraft(&serial)
        .await?
        .ok_or_else(|| BookingError::NotFound("aircraft".to_string()))?;
    let seats = state.catalog.seat_map(&serial).await?;
    Ok(Json(AircraftLayout { aircraft, seats }))
}

async fn flight_availability(
    State(state): State<AppState>,
    Path(flight_id): Path<Uuid>,
) -> Result<Json<FlightAvailability>, AppError> {
    let availability = state.availability.remaining_capacity(flight_id).await?;
    Ok(Json(availability))
}
