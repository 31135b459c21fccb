//! Error types for the fetch pipeline.
//!
//! Every variant renders to the message shown in the error dialog, so the
//! `Display` text is what the user reads.

/// Location lookup failed (IP inference or name geocoding)
#[derive(thiserror::Error, Debug)]
pub enum ResolutionError {
    #[error("Failed to geocode city: request failed: {0}")]
    Request(#[source] reqwest::Error),
    #[error("Failed to geocode city: service returned {0}")]
    Status(reqwest::StatusCode),
    #[error("Failed to geocode city: unreadable response: {0}")]
    Decode(String),
    #[error("Failed to geocode city: no match for '{0}'")]
    NotFound(String),
    #[error("Failed to geocode city: no coordinates in response")]
    MissingCoordinates,
    #[error("Failed to geocode city: could not infer a city from this network")]
    MissingCity,
}

/// No timezone could be determined for a coordinate pair
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum TimezoneError {
    #[error("Invalid coordinates: {lat}, {lon}")]
    InvalidCoordinates { lat: f64, lon: f64 },
    #[error("No timezone found for {lat:.4}, {lon:.4}")]
    NotFound { lat: f64, lon: f64 },
    #[error("Unknown timezone '{0}'")]
    Unknown(String),
}

/// Weather provider failure
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("Weather request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Weather service returned {0}")]
    Status(reqwest::StatusCode),
    #[error("Weather response unreadable: {0}")]
    Decode(String),
    #[error("Weather service returned no current conditions for '{0}'")]
    NoConditions(String),
}

/// Any failure of a search action
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
    #[error(transparent)]
    Timezone(#[from] TimezoneError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
}
