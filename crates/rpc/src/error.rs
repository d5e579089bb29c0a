use banner_core::error::CoreError;

/// Errors from an identity RPC call.
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// The call never produced a response (connect, timeout, TLS, decode).
    #[error("RPC transport failed: {0}")]
    Transport(String),

    /// The identity service has no record for the key.
    #[error("RPC target not found: {0}")]
    NotFound(String),

    /// The identity service rejected the credential.
    #[error("RPC caller unauthenticated: {0}")]
    Unauthenticated(String),

    /// The identity service answered with an unexpected status.
    #[error("RPC remote error ({status}): {body}")]
    Remote { status: u16, body: String },

    /// The response was well-formed JSON but carried an unusable value.
    #[error("RPC response malformed: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for RpcError {
    fn from(err: reqwest::Error) -> Self {
        RpcError::Transport(err.to_string())
    }
}

impl From<RpcError> for CoreError {
    fn from(err: RpcError) -> Self {
        match err {
            RpcError::Transport(msg) => CoreError::Unavailable(format!("identity service: {msg}")),
            RpcError::NotFound(key) => CoreError::not_found("identity", key),
            RpcError::Unauthenticated(msg) => CoreError::Unauthorized(msg),
            RpcError::Remote { status, body } => {
                CoreError::Internal(format!("identity service returned {status}: {body}"))
            }
            RpcError::Malformed(msg) => CoreError::Internal(msg),
        }
    }
}

impl From<CoreError> for RpcError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotFound { key, .. } => RpcError::NotFound(key),
            CoreError::Unauthorized(msg) => RpcError::Unauthenticated(msg),
            CoreError::Unavailable(msg) => RpcError::Transport(msg),
            other => RpcError::Remote {
                status: 500,
                body: other.to_string(),
            },
        }
    }
}
