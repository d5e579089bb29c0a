//! Bodies returned by the public identity endpoints.

use banner_core::types::Timestamp;
use serde::Serialize;

/// `{ "data": T }` envelope shared by every successful public response.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Payload of a successful signup. The password never echoes back.
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub login: String,
}

/// Payload of a successful signin. The token itself travels only in the
/// `Set-Cookie` header.
#[derive(Debug, Serialize)]
pub struct SigninResponse {
    pub login: String,
    pub expires_at: Timestamp,
}
