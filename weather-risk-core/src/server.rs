//! HTTP surface for the assessment service.
//!
//! - `GET /assess`: run an assessment from query parameters
//! - `GET /health`: liveness check

use std::{future::Future, sync::Arc};

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::{
    error::AssessError, model::AssessmentResponse, query::AssessmentQuery,
    service::AssessmentService,
};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// JSON body returned alongside any non-200 status.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug)]
pub struct ApiError(AssessError);

impl From<AssessError> for ApiError {
    fn from(err: AssessError) -> Self {
        Self(err)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self.0 {
            AssessError::LocationUnresolved(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AssessError::DataUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AssessError::UpstreamTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(ErrorBody { error: self.0.to_string() })).into_response()
    }
}

pub fn router(service: AssessmentService) -> Router {
    Router::new()
        .route("/assess", get(assess))
        .route("/health", get(health))
        .with_state(Arc::new(service))
}

/// GET /assess?lat&lon&startDate&endDate&unitsTemp&unitsWind
///
/// Query parameters are decoded as raw pairs so that no input is rejected by
/// the extractor; coercion happens in [`AssessmentQuery::into_request`].
async fn assess(
    State(service): State<Arc<AssessmentService>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<AssessmentResponse>, ApiError> {
    let request = AssessmentQuery::from_pairs(pairs).into_request(Utc::now().date_naive());

    match service.assess(&request).await {
        Ok(response) => {
            info!(
                location = %response.meta.location_name,
                start = %response.meta.start_date,
                end = %response.meta.end_date,
                units.temp = %response.meta.units.temp,
                units.wind = %response.meta.units.wind,
                "assessment served"
            );
            Ok(Json(response))
        }
        Err(err) => {
            warn!(error = %err, lat = request.lat, lon = request.lon, "assessment failed");
            Err(err.into())
        }
    }
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok".to_string() })
}

/// Serve the router on `listener` until `shutdown` resolves.
pub async fn serve<F>(
    listener: TcpListener,
    service: AssessmentService,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr().context("Failed to read listener address")?;
    info!(%addr, "assessment server listening");

    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown)
        .await
        .context("Assessment server terminated with an error")?;

    info!("assessment server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::{AssessmentRequest, DriverKind},
        provider::{DataProvider, RawMeasurements, mock::MockProvider},
        units::Quantity,
    };
    use async_trait::async_trait;
    use axum::{body::Body, http::Request};
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    fn app() -> Router {
        router(AssessmentService::new(Arc::new(MockProvider::new())))
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn assess_returns_full_contract() {
        let (status, body) = get_json(
            app(),
            "/assess?lat=37.77&lon=-121.97&startDate=2025-10-04&unitsTemp=C&unitsWind=MS",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let meta = &body["meta"];
        assert_eq!(meta["locationName"], "Location at 37.77, -121.97");
        assert_eq!(meta["lat"], 37.77);
        assert_eq!(meta["lon"], -121.97);
        assert_eq!(meta["startDate"], "2025-10-04");
        assert_eq!(meta["endDate"], "2025-10-04");
        assert_eq!(meta["units"]["temp"], "C");
        assert_eq!(meta["units"]["wind"], "MS");

        let risks = body["risks"].as_array().unwrap();
        let types: Vec<_> = risks.iter().map(|r| r["type"].as_str().unwrap()).collect();
        assert_eq!(
            types,
            vec!["very_hot", "very_cold", "very_windy", "very_wet", "very_uncomfortable"]
        );
        for risk in risks {
            let p = risk["probability"].as_f64().unwrap();
            assert!((0.0..=1.0).contains(&p));
            assert!(risk["label"].is_string());
            assert!(risk["confidence"].is_string());
        }

        let drivers = body["drivers"].as_array().unwrap();
        assert_eq!(drivers.len(), 7);
        assert!(drivers.iter().all(|d| d["unit"] != "°F" && d["value"].is_number()));

        assert!(body["explanation"].is_string());
        assert!(body["disclaimer"].is_string());
    }

    #[tokio::test]
    async fn assess_tolerates_garbage_input() {
        let (status, body) = get_json(
            app(),
            "/assess?lat=abc&lon=&startDate=yesterday&unitsTemp=K&unitsWind=knots&lat=5",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["meta"]["lat"], 0.0);
        assert_eq!(body["meta"]["lon"], 0.0);
        assert_eq!(body["meta"]["locationName"], "Location at 0.00, 0.00");
        assert_eq!(body["meta"]["startDate"], body["meta"]["endDate"]);
        assert_eq!(body["meta"]["units"]["temp"], "F");
        assert_eq!(body["meta"]["units"]["wind"], "MPH");
        let drivers = body["drivers"].as_array().unwrap();
        for (kind, driver) in DriverKind::all().iter().zip(drivers) {
            let expected = match kind.quantity() {
                Quantity::Temperature => "°F",
                Quantity::Wind => "MPH",
                Quantity::Precipitation => "in",
                Quantity::Humidity => "%",
            };
            assert_eq!(driver["unit"], expected, "unit of {}", driver["name"]);
        }
    }

    #[tokio::test]
    async fn assess_without_parameters_defaults_to_today() {
        let (status, body) = get_json(app(), "/assess").await;
        assert_eq!(status, StatusCode::OK);
        let today = Utc::now().date_naive().format("%Y-%m-%d").to_string();
        assert_eq!(body["meta"]["startDate"], today.as_str());
        assert_eq!(body["meta"]["endDate"], today.as_str());
    }

    #[tokio::test]
    async fn caller_location_name_is_echoed() {
        let (_, body) =
            get_json(app(), "/assess?lat=32.72&lon=-117.16&locationName=San%20Diego%2C%20CA")
                .await;
        assert_eq!(body["meta"]["locationName"], "San Diego, CA");
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let (status, body) = get_json(app(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[derive(Debug)]
    struct Unavailable;

    #[async_trait]
    impl DataProvider for Unavailable {
        async fn measure(
            &self,
            _request: &AssessmentRequest,
        ) -> Result<RawMeasurements, AssessError> {
            Err(AssessError::DataUnavailable("archive offline".into()))
        }
    }

    #[tokio::test]
    async fn provider_errors_map_to_status_codes() {
        let app = router(AssessmentService::new(Arc::new(Unavailable)));
        let (status, body) = get_json(app, "/assess?lat=1&lon=2").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(body["error"].as_str().unwrap().contains("archive offline"));

        let timeout = ApiError(AssessError::UpstreamTimeout(std::time::Duration::from_secs(1)));
        assert_eq!(timeout.status(), StatusCode::GATEWAY_TIMEOUT);
        let unresolved = ApiError(AssessError::LocationUnresolved("x".into()));
        assert_eq!(unresolved.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
