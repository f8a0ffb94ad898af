use async_trait::async_trait;
use chrono::Datelike;
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::debug;

use crate::{
    error::AssessError,
    model::AssessmentRequest,
    provider::{DataProvider, DriverReadings, RawMeasurements, RiskEstimate},
    risk::Confidence,
};

/// Placeholder data source producing randomized values in plausible ranges.
///
/// Unseeded, every call draws from OS entropy. Seeded, the generator is keyed
/// on the seed plus the request's coordinates and dates, so equal requests
/// get equal measurements.
#[derive(Debug, Clone, Default)]
pub struct MockProvider {
    seed: Option<u64>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self { seed: None }
    }

    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    fn rng_for(&self, request: &AssessmentRequest) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(request_key(seed, request)),
            None => StdRng::from_entropy(),
        }
    }
}

fn request_key(seed: u64, request: &AssessmentRequest) -> u64 {
    [
        request.lat.to_bits(),
        request.lon.to_bits(),
        request.start_date.num_days_from_ce() as u64,
        request.end_date.num_days_from_ce() as u64,
    ]
    .into_iter()
    .fold(seed, |acc, part| mix(acc ^ part))
}

// splitmix64 finalizer
fn mix(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

#[async_trait]
impl DataProvider for MockProvider {
    async fn measure(&self, request: &AssessmentRequest) -> Result<RawMeasurements, AssessError> {
        let thresholds = request.resolved_thresholds();
        debug!(?thresholds, seeded = self.seed.is_some(), "mock provider drawing measurements");

        let mut rng = self.rng_for(request);

        let risks = [
            RiskEstimate::new(rng.gen_range(0.0..0.5), Confidence::Medium),
            RiskEstimate::new(rng.gen_range(0.0..0.3), Confidence::High),
            RiskEstimate::new(rng.gen_range(0.0..0.4), Confidence::Low),
            RiskEstimate::new(rng.gen_range(0.0..0.3), Confidence::Medium),
            RiskEstimate::new(rng.gen_range(0.0..0.5), Confidence::Medium),
        ];

        let drivers = DriverReadings {
            max_temp_c: rng.gen_range(29.0..40.0),
            min_temp_c: rng.gen_range(10.0..21.0),
            mean_wind_mps: rng.gen_range(3.6..8.1),
            gusts_mps: rng.gen_range(8.9..15.6),
            daily_precip_mm: rng.gen_range(0.0..12.7),
            heat_index_c: rng.gen_range(32.0..40.0),
            relative_humidity_pct: rng.gen_range(40.0..80.0),
        };

        Ok(RawMeasurements { risks, drivers })
    }
}
