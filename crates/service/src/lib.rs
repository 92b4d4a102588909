//! Service layer for the nearby-hospital lookup.
//! - `geo`: haversine great-circle distance.
//! - `query`: strict parsing of caller-supplied coordinates.
//! - `dataset`: one-shot loading and validation of the static facility file.
//! - `proximity`: the radius filter itself.

pub mod errors;
pub mod geo;
pub mod query;
pub mod dataset;
pub mod proximity;

pub use dataset::FacilityDataset;
pub use errors::ServiceError;
pub use geo::GeoPoint;
pub use proximity::ProximityFilterService;
