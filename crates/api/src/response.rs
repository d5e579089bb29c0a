use banner_core::types::DbId;
use serde::Serialize;

/// `{ "data": T }` envelope around every successful banner response.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Payload of `POST /api/v1/banner`.
#[derive(Debug, Serialize)]
pub struct CreatedBanner {
    pub banner_id: DbId,
}
