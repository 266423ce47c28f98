use crate::error::map_store_err;
use crate::rows::{AircraftRow, AirportRow, FlightRow, SeatRow};
use altair_core::model::{Aircraft, Airport, Flight, Seat};
use altair_core::repository::CatalogRepository;
use altair_core::BookingResult;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresCatalogRepository {
    pool: PgPool,
}

impl PostgresCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogRepository for PostgresCatalogRepository {
    async fn list_airports(&self) -> BookingResult<Vec<Airport>> {
        let rows: Vec<AirportRow> = sqlx::query_as(
            "SELECT code, name, city, country FROM airports ORDER BY code",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_store_err)?;

        Ok(rows.into_iter().map(Airport::from).collect())
    }

    async fn get_airport(&self, code: &str) -> BookingResult<Option<Airport>> {
        let row: Option<AirportRow> = sqlx::query_as(
            "SELECT code, name, city, country FROM airports WHERE code = $1",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_store_err)?;

        Ok(row.map(Airport::from))
    }

    async fn departures_within(&self, origin: &str, hours: i64) -> BookingResult<Vec<Flight>> {
        let rows: Vec<FlightRow> = sqlx::query_as(
            r#"
            SELECT id, aircraft, departure, arrival, origin, destination
            FROM flights
            WHERE origin = $1
              AND departure > NOW()
              AND departure < NOW() + ($2 * INTERVAL '1 hour')
            ORDER BY departure
            "#,
        )
        .bind(origin)
        .bind(hours)
        .fetch_all(&self.pool)
        .await
        .map_err(map_store_err)?;

        tracing::debug!(origin, rows = rows.len(), "listed upcoming departures");
        Ok(rows.into_iter().map(Flight::from).collect())
    }

    async fn connections_with_seats(
        &self,
        origin: &str,
        destination: &str,
        limit: i64,
    ) -> BookingResult<Vec<Flight>> {
        // "Has free seats" here means any class; the per-class split is the
        // availability evaluator's job.
        let rows: Vec<FlightRow> = sqlx::query_as(
            r#"
            SELECT f.id, f.aircraft, f.departure, f.arrival, f.origin, f.destination
            FROM flights f
            WHERE f.origin = $1
              AND f.destination = $2
              AND f.departure > NOW()
              AND (SELECT COUNT(*) FROM seats s WHERE s.aircraft = f.aircraft)
                > (SELECT COUNT(*) FROM tickets t WHERE t.flight_id = f.id)
            ORDER BY f.departure
            LIMIT $3
            "#,
        )
        .bind(origin)
        .bind(destination)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_store_err)?;

        Ok(rows.into_iter().map(Flight::from).collect())
    }

    async fn get_aircraft(&self, serial: &str) -> BookingResult<Option<Aircraft>> {
        let row: Option<AircraftRow> =
            sqlx::query_as("SELECT serial, model FROM aircraft WHERE serial = $1")
                .bind(serial)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_store_err)?;

        Ok(row.map(Aircraft::from))
    }

    async fn seat_map(&self, aircraft_serial: &str) -> BookingResult<Vec<Seat>> {
        let rows: Vec<SeatRow> = sqlx::query_as(
            "SELECT aircraft, label, first_class FROM seats WHERE aircraft = $1 ORDER BY label",
        )
        .bind(aircraft_serial)
        .fetch_all(&self.pool)
        .await
        .map_err(map_store_err)?;

        Ok(rows.into_iter().map(Seat::from).collect())
    }
}
