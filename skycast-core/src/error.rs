use thiserror::Error;

/// Errors surfaced by a weather lookup.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The provider rejected the queried location.
    #[error("City not found")]
    CityNotFound,

    /// The submitted city text was empty; no request was made.
    #[error("No city to look up")]
    EmptyCity,

    #[error("Failed to reach the weather service: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Failed to decode the weather service response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Non-success status on a request where it does not mean "not found".
    #[error("Weather service returned HTTP {0}")]
    Status(reqwest::StatusCode),
}

/// Error surfaced by the geolocation lookup. Details go to the log; the
/// user-facing message is fixed.
#[derive(Debug, Error)]
pub enum LocateError {
    #[error("Unable to retrieve your location")]
    Unavailable,
}
