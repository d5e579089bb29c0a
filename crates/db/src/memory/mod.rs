//! In-memory implementations of the store traits.
//!
//! State lives in maps guarded by `tokio::sync::RwLock`. Each operation holds
//! one write lock for its whole duration, which gives the same all-or-nothing
//! behavior as the Postgres transactions. Nothing is durable and nothing is
//! shared across processes; these back local development and the test suites.

pub mod cache;
pub mod content;
pub mod identity;

pub use cache::MemoryCacheStore;
pub use content::MemoryContentRepo;
pub use identity::MemoryIdentityRepo;
