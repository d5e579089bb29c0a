//! Domain core shared by the identity and content services.
//!
//! Holds the types, validation rules, revision-selection policy and storage
//! traits; contains no I/O of its own beyond the startup retry helper.

pub mod banner;
pub mod context;
pub mod cookie;
pub mod error;
pub mod identity;
pub mod resolver;
pub mod retry;
pub mod roles;
pub mod session;
pub mod store;
pub mod types;
pub mod validation;
