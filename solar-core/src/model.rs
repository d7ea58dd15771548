use serde::{Deserialize, Serialize};

use crate::error::UpstreamError;

/// Hourly block of an Open-Meteo forecast: parallel timestamps and W/m² values.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HourlySeries {
    pub time: Vec<String>,
    pub shortwave_radiation: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadiationInfo {
    pub max: f64,
    pub avg: f64,
    pub date: String,
}

/// What the dashboard receives for a province: hour labels, values and a summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadiationPayload {
    pub hours: Vec<String>,
    pub values: Vec<f64>,
    pub info: RadiationInfo,
}

impl RadiationPayload {
    pub fn from_series(series: HourlySeries) -> Result<Self, UpstreamError> {
        let HourlySeries { time, shortwave_radiation: values } = series;

        if time.len() != values.len() {
            return Err(UpstreamError::LengthMismatch { times: time.len(), values: values.len() });
        }
        if values.is_empty() {
            return Err(UpstreamError::EmptySeries);
        }

        let parts = time
            .iter()
            .map(|raw| raw.split_once('T').ok_or_else(|| UpstreamError::Timestamp(raw.clone())))
            .collect::<Result<Vec<_>, _>>()?;

        let date = parts[0].0.to_string();
        let hours = parts.iter().map(|(_, hour)| hour.to_string()).collect();

        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let avg = round2(values.iter().sum::<f64>() / values.len() as f64);

        Ok(Self { hours, values, info: RadiationInfo { max, avg, date } })
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
