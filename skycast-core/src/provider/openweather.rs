use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{
    error::WeatherError,
    model::{Coordinates, CurrentConditions, ForecastEntry, Place, Units},
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Forecast entries carry a `dt_txt` like "2024-01-15 12:00:00"; the noon
/// ones stand in for their day.
const NOON_MARKER: &str = "12:00:00";

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_owned())
    }

    /// Point the client at a different endpoint, e.g. a mock server in tests.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url,
            http: Client::new(),
        }
    }

    fn query_params(&self, place: &Place, units: Units) -> Vec<(&'static str, String)> {
        let mut params = match place {
            Place::City(name) => vec![("q", name.clone())],
            Place::Coords(c) => {
                vec![("lat", c.lat.to_string()), ("lon", c.lon.to_string())]
            }
        };
        params.push(("appid", self.api_key.clone()));
        params.push(("units", units.as_str().to_owned()));
        params
    }

    async fn fetch_current(
        &self,
        place: &Place,
        units: Units,
    ) -> Result<CurrentConditions, WeatherError> {
        let url = format!("{}/weather", self.base_url);

        debug!(%url, %place, units = units.as_str(), "requesting current conditions");

        let res = self
            .http
            .get(&url)
            .query(&self.query_params(place, units))
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            debug!(%status, body = %truncate_body(&body), "current conditions request rejected");
            return Err(WeatherError::CityNotFound);
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body)?;

        Ok(current_from_wire(parsed))
    }

    async fn fetch_forecast(
        &self,
        place: &Place,
        units: Units,
    ) -> Result<Vec<ForecastEntry>, WeatherError> {
        let url = format!("{}/forecast", self.base_url);

        debug!(%url, %place, units = units.as_str(), "requesting 5-day forecast");

        let res = self
            .http
            .get(&url)
            .query(&self.query_params(place, units))
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            debug!(%status, body = %truncate_body(&body), "forecast request rejected");
            return Err(WeatherError::Status(status));
        }

        let parsed: OwForecastResponse = serde_json::from_str(&body)?;

        Ok(daily_noon_entries(parsed.list))
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn current(
        &self,
        place: &Place,
        units: Units,
    ) -> Result<CurrentConditions, WeatherError> {
        self.fetch_current(place, units).await
    }

    async fn forecast(
        &self,
        place: &Place,
        units: Units,
    ) -> Result<Vec<ForecastEntry>, WeatherError> {
        self.fetch_forecast(place, units).await
    }
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: Option<String>,
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    /// Timezone shift from UTC in seconds.
    timezone: i32,
    coord: OwCoord,
    visibility: Option<u32>,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    sys: OwSys,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    dt_txt: String,
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

fn current_from_wire(parsed: OwCurrentResponse) -> CurrentConditions {
    let (description, icon) = description_and_icon(&parsed.weather);

    CurrentConditions {
        city: parsed.name,
        country: parsed.sys.country.unwrap_or_default(),
        coords: Coordinates { lat: parsed.coord.lat, lon: parsed.coord.lon },
        observed_at: unix_to_utc(parsed.dt).unwrap_or_else(Utc::now),
        utc_offset_secs: parsed.timezone,
        temperature: parsed.main.temp,
        feels_like: parsed.main.feels_like,
        humidity_pct: parsed.main.humidity,
        wind_speed: parsed.wind.speed,
        pressure_hpa: parsed.main.pressure,
        sunrise: unix_to_utc(parsed.sys.sunrise).unwrap_or_else(Utc::now),
        sunset: unix_to_utc(parsed.sys.sunset).unwrap_or_else(Utc::now),
        visibility_m: parsed.visibility,
        description,
        icon,
    }
}

fn entry_from_wire(entry: OwForecastEntry) -> ForecastEntry {
    let (description, icon) = description_and_icon(&entry.weather);

    ForecastEntry {
        at: unix_to_utc(entry.dt).unwrap_or_else(Utc::now),
        temperature: entry.main.temp,
        description,
        icon,
    }
}

/// Reduce the provider's 3-hour list to its noon samples: at most one entry
/// per calendar day, in provider (chronological) order.
fn daily_noon_entries(list: Vec<OwForecastEntry>) -> Vec<ForecastEntry> {
    list.into_iter()
        .filter(|entry| entry.dt_txt.contains(NOON_MARKER))
        .map(entry_from_wire)
        .collect()
}

fn description_and_icon(weather: &[OwWeather]) -> (String, String) {
    weather
        .first()
        .map(|w| (w.description.clone(), w.icon.clone()))
        .unwrap_or_else(|| ("Unknown".to_owned(), String::new()))
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        format!("{}...", &body[..MAX])
    } else {
        body.to_string()
    }
}
