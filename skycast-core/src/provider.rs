use crate::{
    Config,
    error::WeatherError,
    model::{CurrentConditions, ForecastEntry, Place, Units},
    provider::openweather::OpenWeatherClient,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Read-only weather source: a current-conditions snapshot and a daily
/// forecast for the same place and unit system.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(
        &self,
        place: &Place,
        units: Units,
    ) -> Result<CurrentConditions, WeatherError>;

    async fn forecast(
        &self,
        place: &Place,
        units: Units,
    ) -> Result<Vec<ForecastEntry>, WeatherError>;
}

/// Construct the OpenWeather client from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<OpenWeatherClient> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured.\n\
             Hint: run `skycast configure` and enter your OpenWeather API key."
        )
    })?;

    Ok(OpenWeatherClient::new(api_key.to_owned()))
}
