//! Catalog and availability read-path tests against a live Postgres.
//! Same harness as booking_flow: DATABASE_URL + `-- --ignored`.

use altair_core::repository::{AvailabilityRepository, CatalogRepository};
use altair_core::BookingError;
use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use altair_store::{PostgresAvailabilityRepository, PostgresCatalogRepository};

async fn pool() -> PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must point at a test database");
    let pool = PgPool::connect(&url).await.expect("connect to postgres");
    sqlx::migrate!("../migrations")
        .run(&pool)
        .await
        .expect("run migrations");
    pool
}

async fn seed_route(pool: &PgPool, departure_in: Duration) -> (String, String, String, Uuid) {
    let tag = Uuid::new_v4().simple().to_string()[..8].to_uppercase();
    let origin = format!("O{}", tag);
    let destination = format!("D{}", tag);
    let aircraft = format!("CAT-{}", tag);

    for code in [&origin, &destination] {
        sqlx::query("INSERT INTO airports (code, name, city, country) VALUES ($1, $2, $3, $4)")
            .bind(code)
            .bind(format!("Airport {}", code))
            .bind("Testville")
            .bind("Testland")
            .execute(pool)
            .await
            .unwrap();
    }

    sqlx::query("INSERT INTO aircraft (serial, model) VALUES ($1, 'Test 100')")
        .bind(&aircraft)
        .execute(pool)
        .await
        .unwrap();
    for (label, first_class) in [("1A", true), ("2A", false), ("2B", false)] {
        sqlx::query("INSERT INTO seats (aircraft, label, first_class) VALUES ($1, $2, $3)")
            .bind(&aircraft)
            .bind(label)
            .bind(first_class)
            .execute(pool)
            .await
            .unwrap();
    }

    let flight_id = Uuid::new_v4();
    let departure = Utc::now() + departure_in;
    sqlx::query(
        r#"
        INSERT INTO flights (id, aircraft, departure, arrival, origin, destination)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(flight_id)
    .bind(&aircraft)
    .bind(departure)
    .bind(departure + Duration::hours(2))
    .bind(&origin)
    .bind(&destination)
    .execute(pool)
    .await
    .unwrap();

    (origin, destination, aircraft, flight_id)
}

#[tokio::test]
#[ignore = "requires a postgres instance via DATABASE_URL"]
async fn departure_window_keeps_only_the_next_hours() {
    let pool = pool().await;
    let catalog = PostgresCatalogRepository::new(pool.clone());

    let (origin, _, _, near_id) = seed_route(&pool, Duration::hours(2)).await;
    // A second flight from the same origin, outside the 12 hour window.
    let (far_origin, _, _, _) = seed_route(&pool, Duration::hours(48)).await;

    let near = catalog.departures_within(&origin, 12).await.unwrap();
    assert_eq!(near.len(), 1);
    assert_eq!(near[0].id, near_id);

    let far = catalog.departures_within(&far_origin, 12).await.unwrap();
    assert!(far.is_empty());
}

#[tokio::test]
#[ignore = "requires a postgres instance via DATABASE_URL"]
async fn connections_drop_off_once_the_flight_is_full() {
    let pool = pool().await;
    let catalog = PostgresCatalogRepository::new(pool.clone());
    let (origin, destination, aircraft, flight_id) = seed_route(&pool, Duration::hours(2)).await;

    let open = catalog
        .connections_with_seats(&origin, &destination, 3)
        .await
        .unwrap();
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].id, flight_id);

    // Fill every seat directly; the flight must vanish from the listing.
    let reservation = Uuid::new_v4();
    sqlx::query("INSERT INTO reservations (code, payer_tax_id) VALUES ($1, '123456789')")
        .bind(reservation)
        .execute(&pool)
        .await
        .unwrap();
    for (label, first_class) in [("1A", true), ("2A", false), ("2B", false)] {
        sqlx::query(
            r#"
            INSERT INTO tickets
                (id, flight_id, reservation_code, passenger_name, price, first_class,
                 seat_label, seat_aircraft)
            VALUES ($1, $2, $3, 'Passenger', 200, $4, $5, $6)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(flight_id)
        .bind(reservation)
        .bind(first_class)
        .bind(label)
        .bind(&aircraft)
        .execute(&pool)
        .await
        .unwrap();
    }

    let full = catalog
        .connections_with_seats(&origin, &destination, 3)
        .await
        .unwrap();
    assert!(full.is_empty());
}

#[tokio::test]
#[ignore = "requires a postgres instance via DATABASE_URL"]
async fn seat_map_and_airport_lookup_round_trip() {
    let pool = pool().await;
    let catalog = PostgresCatalogRepository::new(pool.clone());
    let (origin, _, aircraft, _) = seed_route(&pool, Duration::hours(2)).await;

    let airport = catalog.get_airport(&origin).await.unwrap().unwrap();
    assert_eq!(airport.city, "Testville");
    assert!(catalog.get_airport("ZZZ-MISSING").await.unwrap().is_none());

    let plane = catalog.get_aircraft(&aircraft).await.unwrap().unwrap();
    assert_eq!(plane.model, "Test 100");

    let seats = catalog.seat_map(&aircraft).await.unwrap();
    assert_eq!(seats.len(), 3);
    assert_eq!(seats.iter().filter(|s| s.first_class).count(), 1);
    // Ordered by label.
    assert_eq!(seats[0].label, "1A");
}

#[tokio::test]
#[ignore = "requires a postgres instance via DATABASE_URL"]
async fn availability_reports_per_class_and_missing_flights() {
    let pool = pool().await;
    let availability = PostgresAvailabilityRepository::new(pool.clone());
    let (_, _, _, flight_id) = seed_route(&pool, Duration::hours(2)).await;

    let remaining = availability.remaining_capacity(flight_id).await.unwrap();
    assert_eq!(remaining.remaining_first, 1);
    assert_eq!(remaining.remaining_economy, 2);

    let err = availability
        .remaining_capacity(Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, BookingError::NotFound(_)));
}
