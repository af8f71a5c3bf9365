use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unit system used both for provider queries and for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    /// Value of the provider's `units` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    pub fn temp_symbol(&self) -> &'static str {
        match self {
            Units::Metric => "°C",
            Units::Imperial => "°F",
        }
    }

    /// Unit the provider reports wind speed in for this system.
    pub fn wind_symbol(&self) -> &'static str {
        match self {
            Units::Metric => "m/s",
            Units::Imperial => "mph",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Units {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "metric" => Ok(Units::Metric),
            "imperial" => Ok(Units::Imperial),
            _ => Err(anyhow::anyhow!(
                "Unknown unit system '{value}'. Supported units: metric, imperial."
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// What the user asked to look up: a free-text city name or a coordinate
/// pair. City text is forwarded to the provider as-is.
#[derive(Debug, Clone, PartialEq)]
pub enum Place {
    City(String),
    Coords(Coordinates),
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Place::City(name) => f.write_str(name),
            Place::Coords(c) => write!(f, "{:.4},{:.4}", c.lat, c.lon),
        }
    }
}

/// Point-in-time weather snapshot for a location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub city: String,
    pub country: String,
    pub coords: Coordinates,
    pub observed_at: DateTime<Utc>,
    /// Shift of the location's timezone from UTC, in seconds.
    pub utc_offset_secs: i32,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity_pct: u8,
    pub wind_speed: f64,
    pub pressure_hpa: u32,
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
    /// The provider omits visibility for some stations.
    pub visibility_m: Option<u32>,
    pub description: String,
    pub icon: String,
}

/// One forecast day, sampled at noon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub at: DateTime<Utc>,
    pub temperature: f64,
    pub description: String,
    pub icon: String,
}

/// Everything one lookup produces. Replaced wholesale on the next lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReport {
    pub units: Units,
    pub current: CurrentConditions,
    /// Empty when the forecast fetch failed; the current block still renders.
    pub daily: Vec<ForecastEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn units_as_str_roundtrip() {
        for units in [Units::Metric, Units::Imperial] {
            let parsed = Units::try_from(units.as_str()).expect("roundtrip should succeed");
            assert_eq!(units, parsed);
        }
    }

    #[test]
    fn unknown_units_error() {
        let err = Units::try_from("kelvin").unwrap_err();
        assert!(err.to_string().contains("Unknown unit system"));
    }

    #[test]
    fn units_parse_is_case_insensitive() {
        assert_eq!(Units::try_from("Imperial").unwrap(), Units::Imperial);
        assert_eq!(Units::try_from("METRIC").unwrap(), Units::Metric);
    }

    #[test]
    fn place_display() {
        let city = Place::City("Kyiv".to_owned());
        assert_eq!(city.to_string(), "Kyiv");

        let coords = Place::Coords(Coordinates { lat: 50.45466, lon: 30.5238 });
        assert_eq!(coords.to_string(), "50.4547,30.5238");
    }
}
