use std::time::Duration;

use thiserror::Error;

/// Failures a data provider can report for a single assessment.
///
/// The bundled mock provider never produces these; they exist for providers
/// backed by real data sources.
#[derive(Debug, Error)]
pub enum AssessError {
    #[error("Location could not be resolved: {0}")]
    LocationUnresolved(String),

    #[error("Climate data unavailable: {0}")]
    DataUnavailable(String),

    #[error("Data provider did not answer within {0:?}")]
    UpstreamTimeout(Duration),
}
