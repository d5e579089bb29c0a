//! Identifier and time aliases used across stores and wire types.

/// Row identifier; every table keys on `BIGSERIAL`.
pub type DbId = i64;

/// Stored and compared in UTC only.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
