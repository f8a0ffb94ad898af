use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    risk::{Confidence, RiskCategory},
    units::{Quantity, TemperatureUnit, Units, WindUnit},
};

pub const EXPLANATION: &str = "Probabilities are derived from historical and/or Earth \
    observation data for the selected date window.";
pub const DISCLAIMER: &str = "Prototype for Space Apps; not for operational forecasting.";

/// A fully coerced assessment request. Build from raw query input with
/// [`crate::AssessmentQuery::into_request`].
#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentRequest {
    pub location_name: Option<String>,
    pub lat: f64,
    pub lon: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub units: Units,
    pub thresholds: Thresholds,
}

impl AssessmentRequest {
    /// Single-day request with default units and no thresholds.
    pub fn new(lat: f64, lon: f64, start_date: NaiveDate) -> Self {
        Self {
            location_name: None,
            lat: normalize_coordinate(lat, 90.0),
            lon: normalize_coordinate(lon, 180.0),
            start_date,
            end_date: start_date,
            units: Units::default(),
            thresholds: Thresholds::default(),
        }
    }

    pub fn with_location_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        let trimmed = name.trim();
        self.location_name = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }

    /// Set the end of the window. Dates before `start_date` collapse to it.
    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = end_date.max(self.start_date);
        self
    }

    pub fn with_units(mut self, temp: TemperatureUnit, wind: WindUnit) -> Self {
        self.units = Units::new(temp, wind);
        self
    }

    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Copy with every field invariant re-applied: coordinates finite and in
    /// range, the window ending no earlier than it starts, and a blank
    /// location name dropped. Fields are public, so values set directly can
    /// break these.
    pub fn normalized(&self) -> Self {
        let mut request = self.clone();
        request.lat = normalize_coordinate(self.lat, 90.0);
        request.lon = normalize_coordinate(self.lon, 180.0);
        request.end_date = self.end_date.max(self.start_date);
        request.location_name = self
            .location_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string);
        request
    }

    /// Caller label, or `"Location at {lat}, {lon}"` to two decimals.
    pub fn display_location(&self) -> String {
        match &self.location_name {
            Some(name) => name.clone(),
            None => format!("Location at {:.2}, {:.2}", self.lat, self.lon),
        }
    }

    /// Thresholds in canonical units, with defaults filled in.
    pub fn resolved_thresholds(&self) -> CanonicalThresholds {
        self.thresholds.resolve(self.units)
    }
}

/// Clamp into `[-limit, limit]`, mapping non-finite values and `-0.0` to `0.0`.
pub(crate) fn normalize_coordinate(value: f64, limit: f64) -> f64 {
    if !value.is_finite() || value == 0.0 {
        return 0.0;
    }
    value.clamp(-limit, limit)
}

/// Per-category cutoffs, in the units of the request they came with.
///
/// `hot`, `cold` and `uncomfortable` are temperatures, `windy` is a wind
/// speed and `wet` is a daily precipitation amount.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Thresholds {
    pub hot: Option<f64>,
    pub cold: Option<f64>,
    pub windy: Option<f64>,
    pub wet: Option<f64>,
    pub uncomfortable: Option<f64>,
}

impl Thresholds {
    pub fn resolve(&self, units: Units) -> CanonicalThresholds {
        let defaults = CanonicalThresholds::default();
        let convert = |value: Option<f64>, quantity: Quantity, fallback: f64| {
            value.map_or(fallback, |v| quantity.canonical(units, v))
        };

        CanonicalThresholds {
            hot_c: convert(self.hot, Quantity::Temperature, defaults.hot_c),
            cold_c: convert(self.cold, Quantity::Temperature, defaults.cold_c),
            windy_mps: convert(self.windy, Quantity::Wind, defaults.windy_mps),
            wet_mm: convert(self.wet, Quantity::Precipitation, defaults.wet_mm),
            uncomfortable_c: convert(
                self.uncomfortable,
                Quantity::Temperature,
                defaults.uncomfortable_c,
            ),
        }
    }
}

/// Thresholds as a provider sees them: °C, m/s and mm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanonicalThresholds {
    pub hot_c: f64,
    pub cold_c: f64,
    pub windy_mps: f64,
    pub wet_mm: f64,
    pub uncomfortable_c: f64,
}

impl Default for CanonicalThresholds {
    fn default() -> Self {
        Self { hot_c: 35.0, cold_c: 0.0, windy_mps: 10.0, wet_mm: 10.0, uncomfortable_c: 32.0 }
    }
}

/// Driver metrics, in the order every response lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DriverKind {
    MaxTemp,
    MinTemp,
    MeanWind,
    Gusts,
    DailyPrecip,
    HeatIndex,
    RelativeHumidity,
}

impl DriverKind {
    pub const COUNT: usize = 7;

    pub const fn all() -> &'static [DriverKind; DriverKind::COUNT] {
        &[
            DriverKind::MaxTemp,
            DriverKind::MinTemp,
            DriverKind::MeanWind,
            DriverKind::Gusts,
            DriverKind::DailyPrecip,
            DriverKind::HeatIndex,
            DriverKind::RelativeHumidity,
        ]
    }

    /// Name as it appears in the `drivers[].name` field.
    pub fn name(self) -> &'static str {
        match self {
            DriverKind::MaxTemp => "Max Temp",
            DriverKind::MinTemp => "Min Temp",
            DriverKind::MeanWind => "Mean Wind",
            DriverKind::Gusts => "Gusts",
            DriverKind::DailyPrecip => "Daily Precip",
            DriverKind::HeatIndex => "Heat Index",
            DriverKind::RelativeHumidity => "RH",
        }
    }

    pub fn quantity(self) -> Quantity {
        match self {
            DriverKind::MaxTemp | DriverKind::MinTemp | DriverKind::HeatIndex => {
                Quantity::Temperature
            }
            DriverKind::MeanWind | DriverKind::Gusts => Quantity::Wind,
            DriverKind::DailyPrecip => Quantity::Precipitation,
            DriverKind::RelativeHumidity => Quantity::Humidity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    #[serde(rename = "type")]
    pub category: RiskCategory,
    pub label: String,
    pub probability: f64,
    pub confidence: Confidence,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverMetric {
    pub name: String,
    pub value: f64,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentMeta {
    pub location_name: String,
    pub lat: f64,
    pub lon: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub units: Units,
}

/// Body of a successful `GET /assess`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResponse {
    pub meta: AssessmentMeta,
    pub risks: Vec<RiskAssessment>,
    pub drivers: Vec<DriverMetric>,
    pub explanation: String,
    pub disclaimer: String,
}
