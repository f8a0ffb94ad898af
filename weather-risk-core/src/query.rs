//! Raw `GET /assess` parameters and their lenient coercion.
//!
//! Nothing here fails: malformed coordinates become 0, malformed dates fall
//! back to today (or to the start date for the end of the window), and
//! unknown unit codes fall back to the imperial defaults.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    model::{AssessmentRequest, Thresholds},
    units::{TemperatureUnit, WindUnit},
};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units_temp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units_wind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold_hot: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold_cold: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold_windy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold_wet: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold_uncomfortable: Option<String>,
}

impl AssessmentQuery {
    /// Collect from decoded key/value pairs. The first occurrence of a key
    /// wins; unknown keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "locationName" => &mut query.location_name,
                "lat" => &mut query.lat,
                "lon" => &mut query.lon,
                "startDate" => &mut query.start_date,
                "endDate" => &mut query.end_date,
                "unitsTemp" => &mut query.units_temp,
                "unitsWind" => &mut query.units_wind,
                "thresholdHot" => &mut query.threshold_hot,
                "thresholdCold" => &mut query.threshold_cold,
                "thresholdWindy" => &mut query.threshold_windy,
                "thresholdWet" => &mut query.threshold_wet,
                "thresholdUncomfortable" => &mut query.threshold_uncomfortable,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        query
    }

    pub fn into_request(self, today: NaiveDate) -> AssessmentRequest {
        let lat = coerce_coordinate("lat", self.lat.as_deref());
        let lon = coerce_coordinate("lon", self.lon.as_deref());

        let start_date = match self.start_date.as_deref() {
            None => today,
            Some(raw) => parse_date(raw).unwrap_or_else(|| {
                warn!(value = raw, fallback = %today, "unparsable startDate, using today");
                today
            }),
        };

        let end_date = match self.end_date.as_deref() {
            None => start_date,
            Some(raw) => match parse_date(raw) {
                Some(end) if end < start_date => {
                    warn!(%end, %start_date, "endDate precedes startDate, using startDate");
                    start_date
                }
                Some(end) => end,
                None => {
                    warn!(value = raw, "unparsable endDate, using startDate");
                    start_date
                }
            },
        };

        let temp = coerce_unit("unitsTemp", self.units_temp.as_deref(), TemperatureUnit::parse);
        let wind = coerce_unit("unitsWind", self.units_wind.as_deref(), WindUnit::parse);

        let thresholds = Thresholds {
            hot: coerce_threshold("thresholdHot", self.threshold_hot.as_deref()),
            cold: coerce_threshold("thresholdCold", self.threshold_cold.as_deref()),
            windy: coerce_threshold("thresholdWindy", self.threshold_windy.as_deref()),
            wet: coerce_threshold("thresholdWet", self.threshold_wet.as_deref()),
            uncomfortable: coerce_threshold(
                "thresholdUncomfortable",
                self.threshold_uncomfortable.as_deref(),
            ),
        };

        let mut request = AssessmentRequest::new(lat, lon, start_date)
            .with_end_date(end_date)
            .with_units(temp, wind)
            .with_thresholds(thresholds);
        if let Some(name) = self.location_name {
            request = request.with_location_name(name);
        }
        request
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

fn coerce_coordinate(field: &str, raw: Option<&str>) -> f64 {
    let Some(raw) = raw else { return 0.0 };
    match parse_leading_f64(raw) {
        Some(value) => value,
        None => {
            warn!(field, value = raw, "non-numeric coordinate, using 0");
            0.0
        }
    }
}

fn coerce_unit<U: Default + Copy>(
    field: &str,
    raw: Option<&str>,
    parse: fn(&str) -> Option<U>,
) -> U {
    let Some(raw) = raw else { return U::default() };
    parse(raw).unwrap_or_else(|| {
        warn!(field, value = raw, "unknown unit code, using default");
        U::default()
    })
}

fn coerce_threshold(field: &str, raw: Option<&str>) -> Option<f64> {
    let raw = raw?;
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            warn!(field, value = raw, "ignoring non-numeric threshold");
            None
        }
    }
}

/// Parse the longest numeric prefix of `raw`, ignoring leading whitespace.
/// `"37.77abc"` is 37.77; `"abc"`, `"inf"` and `""` are `None`. A prefix that
/// overflows to infinity, like `"1e400"`, is `None` rather than a shorter
/// number.
fn parse_leading_f64(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let span = s
        .bytes()
        .take_while(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
        .count();

    (1..=span)
        .rev()
        .find_map(|end| s[..end].parse::<f64>().ok())
        .filter(|v| v.is_finite())
}
