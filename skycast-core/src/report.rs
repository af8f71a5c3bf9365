//! Sequencing of the two provider fetches into a single report.

use tracing::debug;

use crate::{
    error::WeatherError,
    model::{Place, Units, WeatherReport},
    provider::WeatherProvider,
};

/// Fetch current conditions, then the daily forecast, for `place`.
///
/// Current conditions are mandatory: any failure aborts the lookup before the
/// forecast is requested. The forecast is best-effort: a failure there leaves
/// the daily list empty.
pub async fn fetch_report(
    provider: &dyn WeatherProvider,
    place: &Place,
    units: Units,
) -> Result<WeatherReport, WeatherError> {
    if let Place::City(name) = place {
        if name.trim().is_empty() {
            return Err(WeatherError::EmptyCity);
        }
    }

    let current = provider.current(place, units).await?;

    let daily = match provider.forecast(place, units).await {
        Ok(entries) => entries,
        Err(err) => {
            debug!(error = %err, "forecast fetch failed; omitting daily entries");
            Vec::new()
        }
    };

    Ok(WeatherReport { units, current, daily })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Coordinates, CurrentConditions, ForecastEntry};
    use chrono::{DateTime, Utc};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Default)]
    struct StubProvider {
        fail_current: bool,
        fail_forecast: bool,
        current_calls: AtomicUsize,
        forecast_calls: AtomicUsize,
    }

    fn ts(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).expect("valid test timestamp")
    }

    fn sample_current() -> CurrentConditions {
        CurrentConditions {
            city: "London".to_owned(),
            country: "GB".to_owned(),
            coords: Coordinates { lat: 51.5085, lon: -0.1257 },
            observed_at: ts(1_722_855_600),
            utc_offset_secs: 3600,
            temperature: 18.3,
            feels_like: 17.9,
            humidity_pct: 72,
            wind_speed: 4.1,
            pressure_hpa: 1012,
            sunrise: ts(1_722_830_722),
            sunset: ts(1_722_884_749),
            visibility_m: Some(10_000),
            description: "light rain".to_owned(),
            icon: "10d".to_owned(),
        }
    }

    fn sample_entry() -> ForecastEntry {
        ForecastEntry {
            at: ts(1_722_942_000),
            temperature: 19.6,
            description: "few clouds".to_owned(),
            icon: "02d".to_owned(),
        }
    }

    #[async_trait::async_trait]
    impl WeatherProvider for StubProvider {
        async fn current(
            &self,
            _place: &Place,
            _units: Units,
        ) -> Result<CurrentConditions, WeatherError> {
            self.current_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_current {
                Err(WeatherError::CityNotFound)
            } else {
                Ok(sample_current())
            }
        }

        async fn forecast(
            &self,
            _place: &Place,
            _units: Units,
        ) -> Result<Vec<ForecastEntry>, WeatherError> {
            self.forecast_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_forecast {
                Err(WeatherError::Status(reqwest::StatusCode::INTERNAL_SERVER_ERROR))
            } else {
                Ok(vec![sample_entry()])
            }
        }
    }

    #[tokio::test]
    async fn empty_city_performs_no_requests() {
        let provider = StubProvider::default();

        let err = fetch_report(&provider, &Place::City("   ".to_owned()), Units::Metric)
            .await
            .unwrap_err();

        assert!(matches!(err, WeatherError::EmptyCity));
        assert_eq!(provider.current_calls.load(Ordering::SeqCst), 0);
        assert_eq!(provider.forecast_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn successful_lookup_builds_full_report() {
        let provider = StubProvider::default();

        let report = fetch_report(&provider, &Place::City("London".to_owned()), Units::Metric)
            .await
            .expect("lookup must succeed");

        assert_eq!(report.units, Units::Metric);
        assert_eq!(report.current.city, "London");
        assert_eq!(report.daily.len(), 1);
        assert_eq!(provider.current_calls.load(Ordering::SeqCst), 1);
        assert_eq!(provider.forecast_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn current_failure_aborts_before_forecast() {
        let provider = StubProvider { fail_current: true, ..StubProvider::default() };

        let err = fetch_report(&provider, &Place::City("Nowheresville".to_owned()), Units::Metric)
            .await
            .unwrap_err();

        assert!(matches!(err, WeatherError::CityNotFound));
        assert_eq!(err.to_string(), "City not found");
        assert_eq!(provider.forecast_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn forecast_failure_yields_empty_daily() {
        let provider = StubProvider { fail_forecast: true, ..StubProvider::default() };

        let report = fetch_report(
            &provider,
            &Place::Coords(Coordinates { lat: 51.5085, lon: -0.1257 }),
            Units::Imperial,
        )
        .await
        .expect("lookup must still succeed");

        assert!(report.daily.is_empty());
        assert_eq!(report.units, Units::Imperial);
    }
}
