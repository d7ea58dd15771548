use solar_core::RadiationProvider;
use std::sync::Arc;

/// Shared by every handler; holds no mutable state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub provider: Arc<dyn RadiationProvider>,
}

impl AppState {
    pub fn new(provider: Arc<dyn RadiationProvider>) -> Self {
        Self { provider }
    }
}
