use crate::{ForecastError, RadiationPayload, RadiationProvider, catalog};

/// Resolve `provincia` in the catalog, fetch its forecast and reshape it for the dashboard.
///
/// Unknown names are rejected before any request is made.
pub async fn radiation_for(
    provider: &dyn RadiationProvider,
    provincia: &str,
) -> Result<RadiationPayload, ForecastError> {
    let province = catalog::lookup(provincia)
        .ok_or_else(|| ForecastError::UnknownProvince(provincia.to_string()))?;

    tracing::debug!(province = province.name, "fetching radiation forecast");

    let series = provider.fetch_hourly_radiation(province.latitude, province.longitude).await?;
    Ok(RadiationPayload::from_series(series)?)
}
