//! Periodic removal of expired session entries.
//!
//! Expired sessions are already invisible to lookups; this keeps the
//! backing store from growing without bound.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::service::IdentityService;

/// Run the purge loop until `cancel` is triggered.
pub async fn run(service: Arc<IdentityService>, every: Duration, cancel: CancellationToken) {
    tracing::info!(interval_secs = every.as_secs(), "Session purge job started");

    let mut interval = tokio::time::interval(every);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Session purge job stopping");
                break;
            }
            _ = interval.tick() => {
                match service.sessions().purge_expired().await {
                    Ok(0) => tracing::debug!("Session purge: nothing expired"),
                    Ok(purged) => tracing::info!(purged, "Session purge: removed expired sessions"),
                    Err(e) => tracing::error!(error = %e, "Session purge failed"),
                }
            }
        }
    }
}
