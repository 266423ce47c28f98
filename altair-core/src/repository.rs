use crate::model::{Aircraft, Airport, Flight, FlightAvailability, Seat};
use crate::BookingResult;
use async_trait::async_trait;
use uuid::Uuid;

/// Read-only access to the reference catalog: airports, flights, seat layouts.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn list_airports(&self) -> BookingResult<Vec<Airport>>;

    async fn get_airport(&self, code: &str) -> BookingResult<Option<Airport>>;

    /// Flights leaving `origin` within the next `hours`, ordered by departure.
    async fn departures_within(&self, origin: &str, hours: i64) -> BookingResult<Vec<Flight>>;

    /// Next `limit` future flights from `origin` to `destination` that still
    /// have at least one unsold seat.
    async fn connections_with_seats(
        &self,
        origin: &str,
        destination: &str,
        limit: i64,
    ) -> BookingResult<Vec<Flight>>;

    async fn get_aircraft(&self, serial: &str) -> BookingResult<Option<Aircraft>>;

    async fn seat_map(&self, aircraft_serial: &str) -> BookingResult<Vec<Seat>>;
}

/// Remaining capacity per class for one flight. A value read through this
/// trait is a snapshot for reporting; the write paths re-derive it inside
/// their own transaction.
#[async_trait]
pub trait AvailabilityRepository: Send + Sync {
    async fn remaining_capacity(&self, flight_id: Uuid) -> BookingResult<FlightAvailability>;
}
