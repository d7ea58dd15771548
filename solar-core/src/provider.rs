use async_trait::async_trait;
use std::fmt::Debug;

use crate::{Config, HourlySeries, UpstreamError, provider::openmeteo::OpenMeteoProvider};

pub mod openmeteo;

/// Source of hourly shortwave-radiation forecasts for a coordinate pair.
#[async_trait]
pub trait RadiationProvider: Send + Sync + Debug {
    async fn fetch_hourly_radiation(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<HourlySeries, UpstreamError>;
}

/// Construct the forecast provider described by the `[upstream]` config section.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn RadiationProvider>> {
    let provider = OpenMeteoProvider::new(&config.upstream)?;
    Ok(Box::new(provider))
}
