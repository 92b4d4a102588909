use std::sync::Arc;

use service::ProximityFilterService;

/// Shared handler state. Everything behind it is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub proximity: Arc<ProximityFilterService>,
}

impl AppState {
    pub fn new(proximity: ProximityFilterService) -> Self {
        Self { proximity: Arc::new(proximity) }
    }
}
