use std::{sync::Arc, time::Duration};

use tracing::{debug, warn};

use crate::{
    config::DEFAULT_TIMEOUT_MS,
    error::AssessError,
    model::{
        AssessmentMeta, AssessmentRequest, AssessmentResponse, DISCLAIMER, DriverKind,
        DriverMetric, EXPLANATION, RiskAssessment,
    },
    provider::{DataProvider, RawMeasurements, RiskEstimate},
    risk::{Confidence, RiskCategory},
};

/// Turns requests into assessments using a pluggable [`DataProvider`].
///
/// Holds no per-request state, so one instance can be shared across tasks.
#[derive(Debug, Clone)]
pub struct AssessmentService {
    provider: Arc<dyn DataProvider>,
    timeout: Duration,
}

impl AssessmentService {
    pub fn new(provider: Arc<dyn DataProvider>) -> Self {
        Self { provider, timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS) }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn assess(
        &self,
        request: &AssessmentRequest,
    ) -> Result<AssessmentResponse, AssessError> {
        let request = request.normalized();
        let raw = tokio::time::timeout(self.timeout, self.provider.measure(&request))
            .await
            .map_err(|_| AssessError::UpstreamTimeout(self.timeout))??;

        debug!(provider = ?self.provider, "measurements received");
        build_response(&request, &raw)
    }
}

fn build_response(
    request: &AssessmentRequest,
    raw: &RawMeasurements,
) -> Result<AssessmentResponse, AssessError> {
    let meta = AssessmentMeta {
        location_name: request.display_location(),
        lat: request.lat,
        lon: request.lon,
        start_date: request.start_date,
        end_date: request.end_date,
        units: request.units,
    };

    let risks = RiskCategory::all()
        .iter()
        .map(|category| risk_entry(*category, raw.estimate(*category)))
        .collect();

    let drivers = DriverKind::all()
        .iter()
        .map(|kind| driver_entry(request, *kind, raw.drivers.get(*kind)))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(AssessmentResponse {
        meta,
        risks,
        drivers,
        explanation: EXPLANATION.to_string(),
        disclaimer: DISCLAIMER.to_string(),
    })
}

fn risk_entry(category: RiskCategory, estimate: RiskEstimate) -> RiskAssessment {
    let (probability, confidence) = if estimate.probability.is_finite() {
        (estimate.probability.clamp(0.0, 1.0), estimate.confidence)
    } else {
        warn!(
            %category,
            "provider returned a non-finite probability, reporting 0 at low confidence"
        );
        (0.0, Confidence::Low)
    };

    RiskAssessment { category, label: category.label().to_string(), probability, confidence }
}

fn driver_entry(
    request: &AssessmentRequest,
    kind: DriverKind,
    canonical: f64,
) -> Result<DriverMetric, AssessError> {
    if !canonical.is_finite() {
        let reason = format!("no usable reading for {}", kind.name());
        return Err(AssessError::DataUnavailable(reason));
    }

    let quantity = kind.quantity();
    Ok(DriverMetric {
        name: kind.name().to_string(),
        value: quantity.express(request.units, canonical),
        unit: quantity.label(request.units).to_string(),
    })
}
