//! Postgres implementations of the `banner-core` store traits.
//!
//! Each repository owns a clone of the pool and maps `sqlx` failures
//! through [`crate::error::classify`].

pub mod cache_store;
pub mod content_repo;
pub mod identity_repo;

pub use cache_store::PgCacheStore;
pub use content_repo::PgContentRepo;
pub use identity_repo::PgIdentityRepo;
