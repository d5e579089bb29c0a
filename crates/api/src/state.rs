use std::sync::Arc;

use crate::bridge::AuthorizationBridge;
use crate::service::BannerService;

/// Handler state, cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub banners: Arc<BannerService>,
    pub bridge: AuthorizationBridge,
}
