use altair_core::BookingError;

// Postgres SQLSTATEs that mean "you lost a race or a lock wait, try again":
// serialization_failure, deadlock_detected, lock_not_available.
const RETRYABLE_SQLSTATES: [&str; 3] = ["40001", "40P01", "55P03"];

/// Map a store-level failure onto the booking error taxonomy. Conflicts and
/// lock timeouts become `Busy` (retryable by the caller); everything else is
/// `Internal`. The surrounding transaction has already rolled back by the
/// time this runs.
pub fn map_store_err(err: sqlx::Error) -> BookingError {
    if let sqlx::Error::Database(ref db_err) = err {
        if let Some(code) = db_err.code() {
            if RETRYABLE_SQLSTATES.contains(&code.as_ref()) {
                return BookingError::Busy(db_err.message().to_string());
            }
        }
    }
    if matches!(err, sqlx::Error::PoolTimedOut) {
        return BookingError::Busy("connection pool exhausted".to_string());
    }
    BookingError::Internal(err.to_string())
}
