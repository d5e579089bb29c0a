//! Translation of `sqlx` failures into [`CoreError`].

use banner_core::error::CoreError;

/// SQLSTATE for unique constraint violations.
const UNIQUE_VIOLATION: &str = "23505";

/// Classify a sqlx error so callers can tell "absent", "duplicate" and
/// "unreachable" apart.
///
/// - `RowNotFound` maps to `NotFound`.
/// - Unique violations on `uq_` constraints map to `Conflict`.
/// - Pool, IO, TLS and protocol failures map to `Unavailable`.
/// - Everything else maps to `Internal`.
pub fn classify(err: sqlx::Error) -> CoreError {
    match err {
        sqlx::Error::RowNotFound => CoreError::not_found("row", "query"),
        sqlx::Error::Database(db_err) => {
            if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return CoreError::Conflict(format!(
                        "Duplicate value violates unique constraint: {constraint}"
                    ));
                }
            }
            CoreError::Internal(format!("Database error: {db_err}"))
        }
        sqlx::Error::Io(e) => CoreError::Unavailable(format!("Database IO error: {e}")),
        sqlx::Error::Tls(e) => CoreError::Unavailable(format!("Database TLS error: {e}")),
        sqlx::Error::Protocol(msg) => {
            CoreError::Unavailable(format!("Database protocol error: {msg}"))
        }
        sqlx::Error::PoolTimedOut => {
            CoreError::Unavailable("Timed out acquiring a database connection".into())
        }
        sqlx::Error::PoolClosed => CoreError::Unavailable("Database pool is closed".into()),
        sqlx::Error::WorkerCrashed => {
            CoreError::Unavailable("Database connection worker crashed".into())
        }
        other => CoreError::Internal(format!("Database error: {other}")),
    }
}
