//! The `{ "data": ... }` envelope wrapping every successful API body.

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    /// Wrap `data` in the envelope, ready to return from a handler.
    pub fn json(data: T) -> Json<Self> {
        Json(Self { data })
    }
}
