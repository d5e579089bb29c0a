//! Identity service library.
//!
//! Owns identities and sessions. Exposes a public HTTP surface for
//! signup/signin/logout and an internal RPC surface the content service
//! uses to resolve session tokens and roles. Both the binary and the
//! integration tests build their routers from here.

pub mod auth;
pub mod background;
pub mod config;
pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
pub mod routes;
pub mod service;
pub mod session;
pub mod state;
