use std::f64::consts::PI;

use models::Location;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = configs::DEFAULT_EARTH_RADIUS_KM;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<&Location> for GeoPoint {
    fn from(loc: &Location) -> Self {
        Self { lat: loc.lat, lng: loc.lng }
    }
}

#[inline]
fn radians(deg: f64) -> f64 {
    deg * PI / 180.0
}

/// Great-circle distance between `a` and `b` using the haversine formula.
///
/// Operation order is fixed (`deg * PI / 180`, squares as products) so the
/// result is reproducible bit-for-bit across platforms with IEEE-754 libm.
pub fn haversine_km(a: GeoPoint, b: GeoPoint, earth_radius_km: f64) -> f64 {
    let d_lat = radians(b.lat - a.lat);
    let d_lng = radians(b.lng - a.lng);
    let s_lat = (d_lat / 2.0).sin();
    let s_lng = (d_lng / 2.0).sin();
    let h = s_lat * s_lat + radians(a.lat).cos() * radians(b.lat).cos() * s_lng * s_lng;
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    earth_radius_km * c
}

/// `haversine_km` with the mean Earth radius.
pub fn distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    haversine_km(a, b, EARTH_RADIUS_KM)
}

/// Inclusive radius test on the unrounded distance.
pub fn within_radius(distance_km: f64, radius_km: f64) -> bool {
    distance_km <= radius_km
}

#[cfg(test)]
mod tests {
    use super::*;

    const NYC: GeoPoint = GeoPoint { lat: 40.7128, lng: -74.0060 };
    const LA: GeoPoint = GeoPoint { lat: 34.0522, lng: -118.2437 };

    #[test]
    fn identical_points_are_zero_apart() {
        assert_eq!(distance_km(NYC, NYC), 0.0);
        let pole = GeoPoint::new(90.0, 0.0);
        assert_eq!(distance_km(pole, pole), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let pairs = [
            (NYC, LA),
            (GeoPoint::new(-33.8688, 151.2093), GeoPoint::new(51.5074, -0.1278)),
            (GeoPoint::new(0.0, 179.9), GeoPoint::new(0.0, -179.9)),
            (GeoPoint::new(89.9, 10.0), GeoPoint::new(-89.9, -170.0)),
        ];
        for (a, b) in pairs {
            assert_eq!(distance_km(a, b), distance_km(b, a), "{a:?} <-> {b:?}");
        }
    }

    #[test]
    fn new_york_to_los_angeles() {
        let d = distance_km(NYC, LA);
        assert!((3930.0..3940.0).contains(&d), "got {d}");
    }

    #[test]
    fn antipodes_are_half_a_circumference_apart() {
        let d = distance_km(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 180.0));
        assert!((d - PI * EARTH_RADIUS_KM).abs() < 1e-6, "got {d}");
    }

    #[test]
    fn antimeridian_crossing_is_short() {
        let d = distance_km(GeoPoint::new(0.0, 179.99), GeoPoint::new(0.0, -179.99));
        assert!(d < 2.3, "got {d}");
    }

    #[test]
    fn custom_radius_scales_linearly() {
        let d_earth = haversine_km(NYC, LA, EARTH_RADIUS_KM);
        let d_double = haversine_km(NYC, LA, 2.0 * EARTH_RADIUS_KM);
        assert!((d_double - 2.0 * d_earth).abs() < 1e-9);
    }

    #[test]
    fn radius_check_is_inclusive() {
        assert!(within_radius(5.0, 5.0));
        assert!(within_radius(4.999_999_999_999_9, 5.0));
        assert!(!within_radius(5.000_000_000_000_1, 5.0));
        assert!(!within_radius(5.000_000_4, 5.0));
        assert!(!within_radius(5.01, 5.0));
    }
}
