use crate::error::map_store_err;
use crate::rows::{FlightRow, TicketRow};
use altair_core::booking::{pick_seat, CheckinReceipt};
use altair_core::model::{Flight, Ticket};
use altair_core::{BookingError, BookingResult};
use chrono::Utc;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

/// The check-in write path: bind one free seat of the ticket's class to the
/// ticket, atomically. Locks the same flight row as the purchase engine, so
/// every write that touches one flight's inventory goes through one critical
/// section.
pub struct CheckinEngine {
    pool: PgPool,
}

impl CheckinEngine {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn check_in(&self, ticket_id: Uuid) -> BookingResult<CheckinReceipt> {
        let mut tx = self.pool.begin().await.map_err(map_store_err)?;

        sqlx::query("SET LOCAL lock_timeout = '5s'")
            .execute(&mut *tx)
            .await
            .map_err(map_store_err)?;

        // Locking the ticket row serializes duplicate check-ins of the same
        // ticket: the loser re-reads the committed binding and takes the
        // idempotent path instead of picking a second seat.
        let ticket_row: Option<TicketRow> = sqlx::query_as(
            r#"
            SELECT id, flight_id, reservation_code, passenger_name, price,
                   first_class, seat_label, seat_aircraft
            FROM tickets
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(ticket_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_store_err)?;

        let ticket: Ticket = ticket_row
            .ok_or_else(|| BookingError::NotFound("ticket".to_string()))?
            .into();

        // Repeat check-in is a no-op: the seat assigned the first time stands,
        // there is no rebinding path.
        if let Some(seat_label) = ticket.seat_label {
            return Ok(CheckinReceipt {
                ticket_id,
                seat_label,
            });
        }

        let flight_row: Option<FlightRow> = sqlx::query_as(
            r#"
            SELECT id, aircraft, departure, arrival, origin, destination
            FROM flights
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(ticket.flight_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_store_err)?;

        let flight: Flight = flight_row
            .ok_or(BookingError::FlightUnavailable)?
            .into();
        if flight.has_departed(Utc::now()) {
            return Err(BookingError::FlightUnavailable);
        }

        // Free seats of the ticket's class on this flight's aircraft, observed
        // under the flight lock.
        let free_labels: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT label FROM seats
            WHERE aircraft = $1
              AND first_class = $2
              AND label NOT IN (
                  SELECT seat_label FROM tickets
                  WHERE flight_id = $3 AND seat_label IS NOT NULL
              )
            "#,
        )
        .bind(&flight.aircraft)
        .bind(ticket.first_class)
        .bind(flight.id)
        .fetch_all(&mut *tx)
        .await
        .map_err(map_store_err)?;

        let seat_label = pick_seat(free_labels).ok_or(BookingError::NoSeatsAvailable)?;

        sqlx::query(
            r#"
            UPDATE tickets
            SET seat_label = $1, seat_aircraft = $2
            WHERE id = $3
            "#,
        )
        .bind(&seat_label)
        .bind(&flight.aircraft)
        .bind(ticket_id)
        .execute(&mut *tx)
        .await
        .map_err(map_store_err)?;

        tx.commit().await.map_err(map_store_err)?;

        info!(%ticket_id, flight_id = %flight.id, seat = %seat_label, "check-in committed");

        Ok(CheckinReceipt {
            ticket_id,
            seat_label,
        })
    }
}
