//! Unit families and the pure conversions between canonical and requested units.
//!
//! Providers report in canonical units (°C, m/s, mm, %). Everything that
//! leaves the service goes through the functions here, keyed by the unit
//! enumerations, so there is a single place where a value can pick up the
//! wrong family.

use serde::{Deserialize, Serialize};

const MPS_PER_MPH: f64 = 0.44704;
const MM_PER_INCH: f64 = 25.4;

/// Absent or unknown query values resolve to Fahrenheit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TemperatureUnit {
    #[serde(rename = "C")]
    Celsius,
    #[default]
    #[serde(rename = "F")]
    Fahrenheit,
}

impl TemperatureUnit {
    /// Query/wire code, `"C"` or `"F"`.
    pub fn as_str(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "C",
            TemperatureUnit::Fahrenheit => "F",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }

    /// Case-insensitive parse of the query code. Unknown codes are `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "C" => Some(TemperatureUnit::Celsius),
            "F" => Some(TemperatureUnit::Fahrenheit),
            _ => None,
        }
    }

    pub fn express(self, celsius: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => celsius,
            TemperatureUnit::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
        }
    }

    pub fn canonical(self, value: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => value,
            TemperatureUnit::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
        }
    }
}

impl std::fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WindUnit {
    #[serde(rename = "MS")]
    MetersPerSecond,
    #[default]
    #[serde(rename = "MPH")]
    MilesPerHour,
}

impl WindUnit {
    /// Query/wire code, `"MS"` or `"MPH"`.
    pub fn as_str(self) -> &'static str {
        match self {
            WindUnit::MetersPerSecond => "MS",
            WindUnit::MilesPerHour => "MPH",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WindUnit::MetersPerSecond => "m/s",
            WindUnit::MilesPerHour => "MPH",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "MS" => Some(WindUnit::MetersPerSecond),
            "MPH" => Some(WindUnit::MilesPerHour),
            _ => None,
        }
    }

    pub fn express(self, mps: f64) -> f64 {
        match self {
            WindUnit::MetersPerSecond => mps,
            WindUnit::MilesPerHour => mps / MPS_PER_MPH,
        }
    }

    pub fn canonical(self, value: f64) -> f64 {
        match self {
            WindUnit::MetersPerSecond => value,
            WindUnit::MilesPerHour => value * MPS_PER_MPH,
        }
    }
}

impl std::fmt::Display for WindUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Precipitation has no query parameter of its own; it follows the
/// temperature family (imperial when Fahrenheit is requested).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrecipUnit {
    Millimeter,
    Inch,
}

impl PrecipUnit {
    pub fn for_temperature(temp: TemperatureUnit) -> Self {
        match temp {
            TemperatureUnit::Fahrenheit => PrecipUnit::Inch,
            TemperatureUnit::Celsius => PrecipUnit::Millimeter,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PrecipUnit::Millimeter => "mm",
            PrecipUnit::Inch => "in",
        }
    }

    pub fn express(self, mm: f64) -> f64 {
        match self {
            PrecipUnit::Millimeter => mm,
            PrecipUnit::Inch => mm / MM_PER_INCH,
        }
    }

    pub fn canonical(self, value: f64) -> f64 {
        match self {
            PrecipUnit::Millimeter => value,
            PrecipUnit::Inch => value * MM_PER_INCH,
        }
    }
}

pub const HUMIDITY_LABEL: &str = "%";

/// Physical quantity family. Decides which requested unit a value follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantity {
    Temperature,
    Wind,
    Precipitation,
    Humidity,
}

impl Quantity {
    /// Convert a canonical value (°C, m/s, mm, %) into the requested units.
    pub fn express(self, units: Units, canonical: f64) -> f64 {
        match self {
            Quantity::Temperature => units.temp.express(canonical),
            Quantity::Wind => units.wind.express(canonical),
            Quantity::Precipitation => units.precip().express(canonical),
            Quantity::Humidity => canonical,
        }
    }

    /// Inverse of [`Quantity::express`].
    pub fn canonical(self, units: Units, value: f64) -> f64 {
        match self {
            Quantity::Temperature => units.temp.canonical(value),
            Quantity::Wind => units.wind.canonical(value),
            Quantity::Precipitation => units.precip().canonical(value),
            Quantity::Humidity => value,
        }
    }

    pub fn label(self, units: Units) -> &'static str {
        match self {
            Quantity::Temperature => units.temp.label(),
            Quantity::Wind => units.wind.label(),
            Quantity::Precipitation => units.precip().label(),
            Quantity::Humidity => HUMIDITY_LABEL,
        }
    }
}

/// The unit preferences of a request, echoed back in the response meta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Units {
    pub temp: TemperatureUnit,
    pub wind: WindUnit,
}

impl Units {
    pub fn new(temp: TemperatureUnit, wind: WindUnit) -> Self {
        Self { temp, wind }
    }

    pub fn precip(self) -> PrecipUnit {
        PrecipUnit::for_temperature(self.temp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn temperature_conversion_known_points() {
        let f = TemperatureUnit::Fahrenheit;
        assert!(close(f.express(0.0), 32.0));
        assert!(close(f.express(100.0), 212.0));
        assert!(close(f.express(-40.0), -40.0));
        assert!(close(f.canonical(98.6), 37.0));
        assert!(close(TemperatureUnit::Celsius.express(21.5), 21.5));
    }

    #[test]
    fn wind_and_precip_conversions_invert() {
        let mph = WindUnit::MilesPerHour;
        assert!(close(mph.canonical(mph.express(7.3)), 7.3));
        assert!(close(mph.express(MPS_PER_MPH), 1.0));

        let inch = PrecipUnit::Inch;
        assert!(close(inch.express(25.4), 1.0));
        assert!(close(inch.canonical(inch.express(12.7)), 12.7));
    }

    #[test]
    fn parse_is_case_insensitive_and_rejects_unknown() {
        assert_eq!(TemperatureUnit::parse("c"), Some(TemperatureUnit::Celsius));
        assert_eq!(TemperatureUnit::parse(" F "), Some(TemperatureUnit::Fahrenheit));
        assert_eq!(TemperatureUnit::parse("K"), None);
        assert_eq!(WindUnit::parse("mph"), Some(WindUnit::MilesPerHour));
        assert_eq!(WindUnit::parse("Ms"), Some(WindUnit::MetersPerSecond));
        assert_eq!(WindUnit::parse("knots"), None);
    }

    #[test]
    fn precip_follows_temperature_family() {
        let imperial_temp = Units::new(TemperatureUnit::Fahrenheit, WindUnit::MetersPerSecond);
        let metric_temp = Units::new(TemperatureUnit::Celsius, WindUnit::MilesPerHour);
        assert_eq!(imperial_temp.precip(), PrecipUnit::Inch);
        assert_eq!(metric_temp.precip(), PrecipUnit::Millimeter);
    }

    #[test]
    fn quantity_labels_never_mix_families() {
        let metric = Units::new(TemperatureUnit::Celsius, WindUnit::MetersPerSecond);
        let imperial = Units::new(TemperatureUnit::Fahrenheit, WindUnit::MilesPerHour);

        assert_eq!(Quantity::Temperature.label(metric), "°C");
        assert_eq!(Quantity::Wind.label(metric), "m/s");
        assert_eq!(Quantity::Precipitation.label(metric), "mm");
        assert_eq!(Quantity::Temperature.label(imperial), "°F");
        assert_eq!(Quantity::Wind.label(imperial), "MPH");
        assert_eq!(Quantity::Precipitation.label(imperial), "in");
        assert_eq!(Quantity::Humidity.label(imperial), "%");
    }

    #[test]
    fn quantity_express_and_canonical_invert() {
        let imperial = Units::new(TemperatureUnit::Fahrenheit, WindUnit::MilesPerHour);
        let all =
            [Quantity::Temperature, Quantity::Wind, Quantity::Precipitation, Quantity::Humidity];
        for q in all {
            let back = q.canonical(imperial, q.express(imperial, 12.5));
            assert!(close(back, 12.5), "{q:?} did not invert: {back}");
        }
    }

    #[test]
    fn defaults_are_imperial() {
        let units = Units::default();
        assert_eq!(units.temp, TemperatureUnit::Fahrenheit);
        assert_eq!(units.wind, WindUnit::MilesPerHour);
    }

    #[test]
    fn units_serialize_as_query_codes() {
        let units = Units::new(TemperatureUnit::Celsius, WindUnit::MetersPerSecond);
        let json = serde_json::to_string(&units).unwrap();
        assert_eq!(json, r#"{"temp":"C","wind":"MS"}"#);
    }
}
