//! Content service library.
//!
//! Serves banners addressed by `(feature, tag)`. Every request is
//! authenticated through the identity service before it reaches
//! [`service::BannerService`]. The binary and the integration tests share
//! the router built here.

pub mod bridge;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod service;
pub mod state;
