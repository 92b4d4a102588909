use std::sync::Arc;

use configs::{ProximityConfig, DEFAULT_RADIUS_KM};
use models::Facility;
use tracing::debug;

use crate::dataset::FacilityDataset;
use crate::errors::ServiceError;
use crate::geo::{self, GeoPoint, EARTH_RADIUS_KM};
use crate::query;

/// Filters the static dataset down to facilities near a query point.
///
/// Stateless apart from the shared, read-only dataset; safe to call from
/// any number of request tasks at once.
#[derive(Debug, Clone)]
pub struct ProximityFilterService {
    dataset: Arc<FacilityDataset>,
    radius_km: f64,
    earth_radius_km: f64,
}

impl ProximityFilterService {
    pub fn new(
        dataset: Arc<FacilityDataset>,
        radius_km: f64,
        earth_radius_km: f64,
    ) -> Result<Self, ServiceError> {
        for (name, v) in [("radius_km", radius_km), ("earth_radius_km", earth_radius_km)] {
            if !(v.is_finite() && v > 0.0) {
                return Err(ServiceError::Config(format!("{name} must be positive, got {v}")));
            }
        }
        Ok(Self { dataset, radius_km, earth_radius_km })
    }

    /// 5 km radius on a 6371 km Earth.
    pub fn with_defaults(dataset: Arc<FacilityDataset>) -> Self {
        Self { dataset, radius_km: DEFAULT_RADIUS_KM, earth_radius_km: EARTH_RADIUS_KM }
    }

    pub fn from_config(
        dataset: Arc<FacilityDataset>,
        cfg: &ProximityConfig,
    ) -> Result<Self, ServiceError> {
        Self::new(dataset, cfg.radius_km, cfg.earth_radius_km)
    }

    pub fn radius_km(&self) -> f64 { self.radius_km }

    pub fn dataset(&self) -> &FacilityDataset { &self.dataset }

    pub fn distance_to(&self, point: GeoPoint, facility: &Facility) -> f64 {
        geo::haversine_km(point, GeoPoint::from(&facility.location), self.earth_radius_km)
    }

    /// Facilities within the radius of `(latitude, longitude)`, in dataset order.
    ///
    /// Non-finite coordinates are rejected before any distance is computed.
    pub fn find_nearby(&self, latitude: f64, longitude: f64) -> Result<Vec<&Facility>, ServiceError> {
        if !(latitude.is_finite() && longitude.is_finite()) {
            return Err(ServiceError::invalid_coordinates());
        }
        Ok(self.nearby_point(GeoPoint::new(latitude, longitude)))
    }

    /// `find_nearby` over raw query-string values.
    pub fn find_nearby_raw(
        &self,
        lat: Option<&str>,
        lng: Option<&str>,
    ) -> Result<Vec<&Facility>, ServiceError> {
        let point = query::parse_query_point(lat, lng)?;
        Ok(self.nearby_point(point))
    }

    fn nearby_point(&self, point: GeoPoint) -> Vec<&Facility> {
        let results: Vec<&Facility> = self
            .dataset
            .iter()
            .filter(|f| geo::within_radius(self.distance_to(point, f), self.radius_km))
            .collect();
        debug!(
            lat = point.lat,
            lng = point.lng,
            radius_km = self.radius_km,
            matched = results.len(),
            scanned = self.dataset.len(),
            "proximity filter"
        );
        results
    }
}
