use thiserror::Error;

pub const MISSING_LAT_LNG: &str = "Missing lat/lng";
pub const INVALID_LAT_LNG: &str = "Invalid lat/lng";

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Caller-supplied coordinates were absent or not numbers.
    #[error("{0}")]
    InvalidInput(String),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("dataset error: {0}")]
    Dataset(String),
}

impl ServiceError {
    pub fn missing_coordinates() -> Self { Self::InvalidInput(MISSING_LAT_LNG.into()) }
    pub fn invalid_coordinates() -> Self { Self::InvalidInput(INVALID_LAT_LNG.into()) }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}
