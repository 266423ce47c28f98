use crate::error::map_store_err;
use altair_core::model::{CabinClass, FlightAvailability};
use altair_core::repository::AvailabilityRepository;
use altair_core::{BookingError, BookingResult};
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

/// Seats of one class on the aircraft minus tickets already sold for the
/// flight in that class. Runs inside the caller's transaction so the count is
/// authoritative once the flight row is locked.
pub async fn remaining_for_class(
    tx: &mut Transaction<'_, Postgres>,
    flight_id: Uuid,
    aircraft: &str,
    class: CabinClass,
) -> Result<i64, sqlx::Error> {
    let remaining: i64 = sqlx::query_scalar(
        r#"
        SELECT (SELECT COUNT(*) FROM seats WHERE aircraft = $1 AND first_class = $2)
             - (SELECT COUNT(*) FROM tickets WHERE flight_id = $3 AND first_class = $2)
        "#,
    )
    .bind(aircraft)
    .bind(class.is_first())
    .bind(flight_id)
    .fetch_one(&mut **tx)
    .await?;

    Ok(remaining)
}

pub struct PostgresAvailabilityRepository {
    pool: PgPool,
}

impl PostgresAvailabilityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AvailabilityRepository for PostgresAvailabilityRepository {
    async fn remaining_capacity(&self, flight_id: Uuid) -> BookingResult<FlightAvailability> {
        let row: Option<(i64, i64)> = sqlx::query_as(
            r#"
            SELECT
                (SELECT COUNT(*) FROM seats s
                  WHERE s.aircraft = f.aircraft AND s.first_class)
              - (SELECT COUNT(*) FROM tickets t
                  WHERE t.flight_id = f.id AND t.first_class) AS remaining_first,
                (SELECT COUNT(*) FROM seats s
                  WHERE s.aircraft = f.aircraft AND NOT s.first_class)
              - (SELECT COUNT(*) FROM tickets t
                  WHERE t.flight_id = f.id AND NOT t.first_class) AS remaining_economy
            FROM flights f
            WHERE f.id = $1
            "#,
        )
        .bind(flight_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_store_err)?;

        let (remaining_first, remaining_economy) =
            row.ok_or_else(|| BookingError::NotFound("flight".to_string()))?;

        Ok(FlightAvailability {
            remaining_first,
            remaining_economy,
        })
    }
}
