//! Core library for the weather risk assessment service.
//!
//! This crate defines:
//! - The assessment request/response contract and its unit semantics
//! - Lenient coercion of raw query parameters
//! - Abstraction over data providers, with a randomized placeholder
//! - The assessment service and its HTTP surface (`GET /assess`)
//! - A client for remote assessment servers
//! - Configuration handling
//!
//! It is used by `weather-risk-cli`, but can also be embedded in other binaries or services.

pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod query;
pub mod risk;
pub mod server;
pub mod service;
pub mod units;

pub use client::AssessmentClient;
pub use config::{ClientConfig, Config, ProviderConfig, ServerConfig};
pub use error::AssessError;
pub use model::{
    AssessmentMeta, AssessmentRequest, AssessmentResponse, CanonicalThresholds, DriverKind,
    DriverMetric, RiskAssessment, Thresholds,
};
pub use provider::{
    DataProvider, DriverReadings, RawMeasurements, RiskEstimate, provider_from_config,
};
pub use query::AssessmentQuery;
pub use risk::{Confidence, RiskCategory};
pub use service::AssessmentService;
pub use units::{PrecipUnit, Quantity, TemperatureUnit, Units, WindUnit};

/// Build a service from configuration: provider choice plus timeout.
pub fn service_from_config(config: &Config) -> AssessmentService {
    AssessmentService::new(provider_from_config(&config.provider))
        .with_timeout(config.provider.timeout())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn configured_service_is_deterministic_with_seed() {
        let cfg = Config::from_toml("[provider]\nseed = 9\ntimeout_ms = 250\n").unwrap();
        let service = service_from_config(&cfg);

        let request = AssessmentQuery::from_pairs([
            ("lat", "37.77"),
            ("lon", "-121.97"),
            ("startDate", "2025-10-04"),
        ])
        .into_request(chrono::NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());

        let a = service.assess(&request).await.unwrap();
        let b = service.assess(&request).await.unwrap();
        assert_eq!(a, b);
    }
}
