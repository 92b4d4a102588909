use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::ModelError;

/// Geographic position of a facility, in decimal degrees.
///
/// Serialized as `{"lat": .., "lng": ..}`. Any other keys found in the
/// dataset are carried along untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Location {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng, extra: Map::new() }
    }
}

/// A located hospital record from the static dataset.
///
/// Only `name` and `location` are interpreted. Address, rating and every
/// other field land in `extra` and are echoed back as-is.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    pub name: String,
    pub location: Location,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Facility {
    pub fn new(name: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self { name: name.into(), location: Location::new(lat, lng), extra: Map::new() }
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        validate_name(&self.name)?;
        validate_latitude(self.location.lat)?;
        validate_longitude(self.location.lng)?;
        Ok(())
    }
}

pub fn validate_name(name: &str) -> Result<(), ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::Validation("facility name is empty".into()));
    }
    Ok(())
}

pub fn validate_latitude(lat: f64) -> Result<(), ModelError> {
    if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
        return Err(ModelError::Validation(format!("latitude {lat} outside [-90, 90]")));
    }
    Ok(())
}

pub fn validate_longitude(lng: f64) -> Result<(), ModelError> {
    if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
        return Err(ModelError::Validation(format!("longitude {lng} outside [-180, 180]")));
    }
    Ok(())
}
