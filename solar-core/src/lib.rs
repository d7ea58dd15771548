//! Core library for the Solar RD dashboard.
//!
//! This crate defines:
//! - The static catalog of Dominican Republic provinces
//! - An abstraction over the hourly radiation forecast source (Open-Meteo)
//! - The reshaped radiation payload and its summary statistics
//! - Configuration handling
//!
//! It is used by `solar-dashboard`, but can also be reused by other binaries or services.

pub mod catalog;
pub mod config;
pub mod error;
pub mod forecast;
pub mod model;
pub mod provider;

pub use catalog::Province;
pub use config::{Config, ServerConfig, UpstreamConfig};
pub use error::{ForecastError, UpstreamError};
pub use forecast::radiation_for;
pub use model::{HourlySeries, RadiationInfo, RadiationPayload};
pub use provider::{RadiationProvider, openmeteo::OpenMeteoProvider};
