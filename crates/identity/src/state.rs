use std::sync::Arc;

use crate::config::ServerConfig;
use crate::service::IdentityService;

/// Shared state for both identity routers via `State<AppState>`.
///
/// Cheaply cloneable.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<IdentityService>,
    pub config: Arc<ServerConfig>,
}
