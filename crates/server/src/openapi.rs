use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ErrorResponse { pub error: String }

#[derive(ToSchema)]
pub struct LocationDoc { pub lat: f64, pub lng: f64 }

/// Dataset record as stored; fields beyond `name` and `location` are echoed unchanged.
#[derive(ToSchema)]
pub struct FacilityDoc {
    pub name: String,
    pub location: LocationDoc,
    pub vicinity: Option<String>,
    pub rating: Option<f64>,
}

#[derive(ToSchema)]
pub struct NearbyResponseDoc { pub results: Vec<FacilityDoc> }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::nearby::nearby_hospitals,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorResponse,
            LocationDoc,
            FacilityDoc,
            NearbyResponseDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "nearby")
    )
)]
pub struct ApiDoc;
