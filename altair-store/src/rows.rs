use altair_core::model::{Aircraft, Airport, Flight, Seat, Ticket};
use chrono::{DateTime, Utc};
use uuid::Uuid;

// Internal structs for type-safe querying.

#[derive(sqlx::FromRow)]
pub struct AirportRow {
    pub code: String,
    pub name: String,
    pub city: String,
    pub country: String,
}

impl From<AirportRow> for Airport {
    fn from(row: AirportRow) -> Self {
        Airport {
            code: row.code,
            name: row.name,
            city: row.city,
            country: row.country,
        }
    }
}

#[derive(sqlx::FromRow)]
pub struct AircraftRow {
    pub serial: String,
    pub model: String,
}

impl From<AircraftRow> for Aircraft {
    fn from(row: AircraftRow) -> Self {
        Aircraft {
            serial: row.serial,
            model: row.model,
        }
    }
}

#[derive(sqlx::FromRow)]
pub struct SeatRow {
    pub aircraft: String,
    pub label: String,
    pub first_class: bool,
}

impl From<SeatRow> for Seat {
    fn from(row: SeatRow) -> Self {
        Seat {
            aircraft: row.aircraft,
            label: row.label,
            first_class: row.first_class,
        }
    }
}

#[derive(sqlx::FromRow)]
pub struct FlightRow {
    pub id: Uuid,
    pub aircraft: String,
    pub departure: DateTime<Utc>,
    pub arrival: DateTime<Utc>,
    pub origin: String,
    pub destination: String,
}

impl From<FlightRow> for Flight {
    fn from(row: FlightRow) -> Self {
        Flight {
            id: row.id,
            aircraft: row.aircraft,
            departure: row.departure,
            arrival: row.arrival,
            origin: row.origin,
            destination: row.destination,
        }
    }
}

#[derive(sqlx::FromRow)]
pub struct TicketRow {
    pub id: Uuid,
    pub flight_id: Uuid,
    pub reservation_code: Uuid,
    pub passenger_name: String,
    pub price: i32,
    pub first_class: bool,
    pub seat_label: Option<String>,
    pub seat_aircraft: Option<String>,
}

impl From<TicketRow> for Ticket {
    fn from(row: TicketRow) -> Self {
        Ticket {
            id: row.id,
            flight_id: row.flight_id,
            reservation_code: row.reservation_code,
            passenger_name: row.passenger_name,
            price: row.price,
            first_class: row.first_class,
            seat_label: row.seat_label,
            seat_aircraft: row.seat_aircraft,
        }
    }
}
