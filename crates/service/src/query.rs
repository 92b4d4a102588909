//! Coordinate parsing for incoming queries.
//!
//! Absent or blank values are "missing"; anything else must parse as a
//! finite `f64`. No coordinate ever defaults to zero.

use crate::errors::ServiceError;
use crate::geo::GeoPoint;

fn present(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

/// Parse a single coordinate value.
pub fn parse_coordinate(raw: Option<&str>) -> Result<f64, ServiceError> {
    let value = present(raw).ok_or_else(ServiceError::missing_coordinates)?;
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ServiceError::invalid_coordinates()),
    }
}

/// Parse a `(lat, lng)` pair. Presence of both is checked before either is
/// parsed, so a request lacking `lng` reports "missing" even if `lat` is junk.
pub fn parse_query_point(lat: Option<&str>, lng: Option<&str>) -> Result<GeoPoint, ServiceError> {
    let (lat, lng) = match (present(lat), present(lng)) {
        (Some(lat), Some(lng)) => (lat, lng),
        _ => return Err(ServiceError::missing_coordinates()),
    };
    Ok(GeoPoint::new(parse_coordinate(Some(lat))?, parse_coordinate(Some(lng))?))
}
