//! Bounded retry for establishing connections to backing stores at startup.
//!
//! A connection attempt moves through [`ConnectionState`]:
//! `Connecting { attempt }` until it either succeeds (`Connected`) or
//! exhausts [`RetryPolicy::max_attempts`] (`Failed`). This runs once while a
//! component is constructed; request paths never retry.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use crate::error::CoreError;

/// Fixed attempt count and fixed delay between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            delay: Duration::from_secs(2),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting { attempt: u32 },
    Connected,
    Failed,
}

impl ConnectionState {
    pub fn start() -> Self {
        ConnectionState::Connecting { attempt: 1 }
    }

    pub fn on_success(self) -> Self {
        match self {
            ConnectionState::Connecting { .. } => ConnectionState::Connected,
            other => other,
        }
    }

    pub fn on_failure(self, policy: &RetryPolicy) -> Self {
        match self {
            ConnectionState::Connecting { attempt } if attempt < policy.max_attempts.max(1) => {
                ConnectionState::Connecting {
                    attempt: attempt + 1,
                }
            }
            ConnectionState::Connecting { .. } => ConnectionState::Failed,
            other => other,
        }
    }
}

/// Run `connect` until it succeeds or the policy is exhausted.
///
/// `target` names the dependency in logs and in the final error. Exhaustion
/// yields [`CoreError::Unavailable`] carrying the last failure.
pub async fn connect_with_retry<T, E, F, Fut>(
    target: &str,
    policy: &RetryPolicy,
    mut connect: F,
) -> Result<T, CoreError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let mut state = ConnectionState::start();
    let mut last_error = String::new();

    while let ConnectionState::Connecting { attempt } = state {
        match connect().await {
            Ok(value) => {
                state = state.on_success();
                tracing::info!(target_name = target, attempt, ?state, "Connection established");
                return Ok(value);
            }
            Err(e) => {
                last_error = e.to_string();
                state = state.on_failure(policy);
                tracing::warn!(
                    target_name = target,
                    attempt,
                    error = %last_error,
                    "Connection attempt {attempt} failed",
                );
                if matches!(state, ConnectionState::Connecting { .. }) {
                    tokio::time::sleep(policy.delay).await;
                }
            }
        }
    }

    tracing::error!(target_name = target, ?state, "Giving up on connection");
    Err(CoreError::Unavailable(format!(
        "{target}: maximum number of retries reached: {last_error}"
    )))
}
