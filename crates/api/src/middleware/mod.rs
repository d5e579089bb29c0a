//! Request extractors enforcing the authorization bridge.

pub mod auth;
pub mod rbac;
