use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use models::Facility;
use serde::{Deserialize, Serialize};
use service::errors::INVALID_LAT_LNG;
use tracing::{debug, warn};
use utoipa::IntoParams;

use crate::errors::ApiError;
use crate::observability;
use crate::state::AppState;

/// Raw query parameters. Kept as strings so that "absent" and "not a
/// number" can be told apart.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NearbyParams {
    /// Latitude of the query point, decimal degrees.
    pub lat: Option<String>,
    /// Longitude of the query point, decimal degrees.
    pub lng: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NearbyResponse<'a> {
    pub results: Vec<&'a Facility>,
}

/// Hospitals within the configured radius of `(lat, lng)`, in dataset order.
#[utoipa::path(
    get,
    path = "/nearby-hospitals",
    tag = "nearby",
    params(NearbyParams),
    responses(
        (status = 200, description = "Facilities within the radius", body = crate::openapi::NearbyResponseDoc),
        (status = 400, description = "Missing or malformed coordinates", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn nearby_hospitals(
    State(state): State<AppState>,
    params: Result<Query<NearbyParams>, QueryRejection>,
) -> Response {
    observability::NEARBY_REQUESTS_TOTAL.inc();

    let params = match params {
        Ok(Query(p)) => p,
        Err(rejection) => {
            observability::NEARBY_INVALID_REQUESTS_TOTAL.inc();
            warn!(error = %rejection, "unparseable query string");
            return ApiError::BadRequest(INVALID_LAT_LNG.into()).into_response();
        }
    };

    match state
        .proximity
        .find_nearby_raw(params.lat.as_deref(), params.lng.as_deref())
    {
        Ok(results) => {
            observability::NEARBY_RESULTS_RETURNED.observe(results.len() as f64);
            debug!(matched = results.len(), "nearby lookup served");
            Json(NearbyResponse { results }).into_response()
        }
        Err(e) => {
            observability::NEARBY_INVALID_REQUESTS_TOTAL.inc();
            warn!(lat = ?params.lat, lng = ?params.lng, error = %e, "rejected nearby lookup");
            ApiError::from(e).into_response()
        }
    }
}
