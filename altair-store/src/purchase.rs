use crate::availability::remaining_for_class;
use crate::error::map_store_err;
use crate::rows::FlightRow;
use altair_core::booking::{ensure_capacity, price_band, PurchaseReceipt, PurchaseRequest};
use altair_core::model::{CabinClass, Flight};
use altair_core::{BookingError, BookingResult};
use chrono::Utc;
use rand::Rng;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

/// The purchase write path. One invocation is one transaction: the flight row
/// is locked with `SELECT ... FOR UPDATE` before any capacity read, so two
/// purchases (or a purchase and a check-in) against the same flight serialize,
/// while flights never contend with each other.
pub struct PurchaseEngine {
    pool: PgPool,
}

impl PurchaseEngine {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn purchase(
        &self,
        flight_id: Uuid,
        request: &PurchaseRequest,
    ) -> BookingResult<PurchaseReceipt> {
        // Caller errors never open a transaction.
        request.validate()?;

        let mut tx = self.pool.begin().await.map_err(map_store_err)?;

        // Bound the wait for the flight lock; a timeout rolls back cleanly
        // and surfaces as Busy.
        sqlx::query("SET LOCAL lock_timeout = '5s'")
            .execute(&mut *tx)
            .await
            .map_err(map_store_err)?;

        let flight_row: Option<FlightRow> = sqlx::query_as(
            r#"
            SELECT id, aircraft, departure, arrival, origin, destination
            FROM flights
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(flight_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_store_err)?;

        let flight: Flight = flight_row
            .ok_or(BookingError::FlightUnavailable)?
            .into();
        if flight.has_departed(Utc::now()) {
            return Err(BookingError::FlightUnavailable);
        }

        // Re-derive remaining capacity from committed state observed under
        // the lock. Never from a cached counter.
        let requested = request.seats_requested();
        let remaining_first =
            remaining_for_class(&mut tx, flight.id, &flight.aircraft, CabinClass::First)
                .await
                .map_err(map_store_err)?;
        let remaining_economy =
            remaining_for_class(&mut tx, flight.id, &flight.aircraft, CabinClass::Economy)
                .await
                .map_err(map_store_err)?;
        ensure_capacity(requested, remaining_first, remaining_economy)?;

        let reservation_code = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO reservations (code, payer_tax_id, counter, created_at)
            VALUES ($1, $2, NULL, NOW())
            "#,
        )
        .bind(reservation_code)
        .bind(&request.payer_tax_id)
        .execute(&mut *tx)
        .await
        .map_err(map_store_err)?;

        // Prices are drawn up front: thread_rng must not be held across an
        // await point.
        let prices: Vec<i32> = {
            let mut rng = rand::thread_rng();
            request
                .passengers
                .iter()
                .map(|p| {
                    let (min, max) = price_band(p.class());
                    rng.gen_range(min..=max)
                })
                .collect()
        };

        let mut ticket_ids = Vec::with_capacity(request.passengers.len());
        for (passenger, price) in request.passengers.iter().zip(prices) {
            let ticket_id = Uuid::new_v4();
            sqlx::query(
                r#"
                INSERT INTO tickets
                    (id, flight_id, reservation_code, passenger_name, price, first_class)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(ticket_id)
            .bind(flight.id)
            .bind(reservation_code)
            .bind(&passenger.name)
            .bind(price)
            .bind(passenger.first_class)
            .execute(&mut *tx)
            .await
            .map_err(map_store_err)?;
            ticket_ids.push(ticket_id);
        }

        tx.commit().await.map_err(map_store_err)?;

        info!(
            %flight_id,
            %reservation_code,
            tickets = ticket_ids.len(),
            "purchase committed"
        );

        Ok(PurchaseReceipt {
            reservation_code,
            ticket_ids,
        })
    }
}
