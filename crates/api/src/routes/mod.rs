pub mod reservations;
pub mod tables;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Every response body is wrapped as `{"data": ...}`.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Request bodies arrive as `{"data": ...}`; a missing `data` key is a 400.
#[derive(Debug, Deserialize)]
pub struct RequestBody<T> {
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> RequestBody<T> {
    pub fn into_data(self) -> Result<T, AppError> {
        self.data
            .ok_or_else(|| AppError::BadRequest("data is missing".to_string()))
    }
}
