use std::{fmt::Debug, sync::Arc};

use async_trait::async_trait;

use crate::{
    ProviderConfig,
    error::AssessError,
    model::{AssessmentRequest, DriverKind},
    provider::mock::MockProvider,
    risk::{Confidence, RiskCategory},
};

pub mod mock;

/// One category's estimate as reported by a provider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskEstimate {
    pub probability: f64,
    pub confidence: Confidence,
}

impl RiskEstimate {
    pub fn new(probability: f64, confidence: Confidence) -> Self {
        Self { probability, confidence }
    }
}

/// Driver readings in canonical units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriverReadings {
    pub max_temp_c: f64,
    pub min_temp_c: f64,
    pub mean_wind_mps: f64,
    pub gusts_mps: f64,
    pub daily_precip_mm: f64,
    pub heat_index_c: f64,
    pub relative_humidity_pct: f64,
}

impl DriverReadings {
    pub fn get(&self, kind: DriverKind) -> f64 {
        match kind {
            DriverKind::MaxTemp => self.max_temp_c,
            DriverKind::MinTemp => self.min_temp_c,
            DriverKind::MeanWind => self.mean_wind_mps,
            DriverKind::Gusts => self.gusts_mps,
            DriverKind::DailyPrecip => self.daily_precip_mm,
            DriverKind::HeatIndex => self.heat_index_c,
            DriverKind::RelativeHumidity => self.relative_humidity_pct,
        }
    }
}

/// Everything a provider knows about one request: an estimate per category
/// (indexed by [`RiskCategory::index`]) and the supporting readings.
#[derive(Debug, Clone, PartialEq)]
pub struct RawMeasurements {
    pub risks: [RiskEstimate; RiskCategory::COUNT],
    pub drivers: DriverReadings,
}

impl RawMeasurements {
    pub fn estimate(&self, category: RiskCategory) -> RiskEstimate {
        self.risks[category.index()]
    }
}

#[async_trait]
pub trait DataProvider: Send + Sync + Debug {
    async fn measure(&self, request: &AssessmentRequest) -> Result<RawMeasurements, AssessError>;
}

/// Construct the data provider described by config.
pub fn provider_from_config(config: &ProviderConfig) -> Arc<dyn DataProvider> {
    let provider = match config.seed {
        Some(seed) => MockProvider::seeded(seed),
        None => MockProvider::new(),
    };
    Arc::new(provider)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_readings() -> DriverReadings {
        DriverReadings {
            max_temp_c: 1.0,
            min_temp_c: 2.0,
            mean_wind_mps: 3.0,
            gusts_mps: 4.0,
            daily_precip_mm: 5.0,
            heat_index_c: 6.0,
            relative_humidity_pct: 7.0,
        }
    }

    #[test]
    fn readings_are_addressed_by_driver_kind() {
        let readings = sample_readings();
        let values: Vec<f64> = DriverKind::all().iter().map(|k| readings.get(*k)).collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
    }

    #[test]
    fn estimate_uses_category_order() {
        let risks = [0.1, 0.2, 0.3, 0.4, 0.5].map(|p| RiskEstimate::new(p, Confidence::High));
        let raw = RawMeasurements { risks, drivers: sample_readings() };
        assert_eq!(raw.estimate(RiskCategory::VeryWet).probability, 0.4);
        assert_eq!(raw.estimate(RiskCategory::VeryHot).probability, 0.1);
    }

    #[tokio::test]
    async fn provider_from_config_honours_seed() {
        let cfg = ProviderConfig { seed: Some(7), ..Default::default() };
        let provider = provider_from_config(&cfg);
        let day = NaiveDate::from_ymd_opt(2025, 10, 4).unwrap();
        let request = AssessmentRequest::new(37.77, -121.97, day);

        let a = provider.measure(&request).await.unwrap();
        let b = provider.measure(&request).await.unwrap();
        assert_eq!(a, b);
    }
}
