use once_cell::sync::Lazy;
use prometheus::{
    register_histogram, register_int_counter, register_int_gauge, Encoder, Histogram, IntCounter,
    IntGauge, TextEncoder,
};

// Prometheus metrics (default registry)
pub static NEARBY_REQUESTS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "nearby_requests_total",
        "Total nearby-hospital lookups received"
    )
    .expect("register nearby_requests_total")
});

pub static NEARBY_INVALID_REQUESTS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "nearby_invalid_requests_total",
        "Lookups rejected for missing or malformed coordinates"
    )
    .expect("register nearby_invalid_requests_total")
});

pub static NEARBY_RESULTS_RETURNED: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "nearby_results_returned",
        "Facilities returned per successful lookup",
        vec![0.0, 1.0, 2.0, 5.0, 10.0, 20.0, 50.0, 100.0]
    )
    .expect("register nearby_results_returned")
});

pub static DATASET_FACILITIES: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!(
        "nearby_dataset_facilities",
        "Facilities in the loaded dataset"
    )
    .expect("register nearby_dataset_facilities")
});

/// Force registration so every series shows up on the first scrape.
pub fn init_metrics() {
    Lazy::force(&NEARBY_REQUESTS_TOTAL);
    Lazy::force(&NEARBY_INVALID_REQUESTS_TOTAL);
    Lazy::force(&NEARBY_RESULTS_RETURNED);
    Lazy::force(&DATASET_FACILITIES);
}

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (
        axum::http::StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}
