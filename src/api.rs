//! Clients for the location and weather services

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;

use crate::config::Endpoints;
use crate::error::{FetchError, ResolutionError};
use crate::state::{ConditionKind, DailyForecast, Location, WeatherSnapshot};

/// Nominatim rejects requests without an identifying agent
pub const USER_AGENT: &str = concat!("skycast/", env!("CARGO_PKG_VERSION"));

fn http_client(timeout: Option<Duration>) -> reqwest::Result<Client> {
    let mut builder = Client::builder().user_agent(USER_AGENT);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build()
}

// ============================================================================
// Location services
// ============================================================================

/// ipinfo-style response; `loc` is "lat,lon"
#[derive(Debug, Deserialize)]
struct IpInfoResponse {
    city: Option<String>,
    loc: Option<String>,
}

/// One Nominatim search hit. Coordinates come back as strings.
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: Option<String>,
    lon: Option<String>,
}

fn parse_pair(lat: &str, lon: &str) -> Result<(f64, f64), ResolutionError> {
    let lat = lat
        .trim()
        .parse::<f64>()
        .map_err(|_| ResolutionError::MissingCoordinates)?;
    let lon = lon
        .trim()
        .parse::<f64>()
        .map_err(|_| ResolutionError::MissingCoordinates)?;
    Ok((lat, lon))
}

fn location_from_ip(body: IpInfoResponse) -> Result<Location, ResolutionError> {
    let (lat, lon) = body
        .loc
        .as_deref()
        .and_then(|loc| loc.split_once(','))
        .ok_or(ResolutionError::MissingCoordinates)
        .and_then(|(lat, lon)| parse_pair(lat, lon))?;
    let name = body
        .city
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .ok_or(ResolutionError::MissingCity)?;
    Ok(Location { name, lat, lon })
}

fn location_from_search(city: &str, places: Vec<NominatimPlace>) -> Result<Location, ResolutionError> {
    let place = places
        .into_iter()
        .next()
        .ok_or_else(|| ResolutionError::NotFound(city.to_string()))?;
    let (lat, lon) = match (place.lat, place.lon) {
        (Some(lat), Some(lon)) => parse_pair(&lat, &lon)?,
        _ => return Err(ResolutionError::MissingCoordinates),
    };
    Ok(Location {
        name: city.to_string(),
        lat,
        lon,
    })
}

/// HTTP access to the external services
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    endpoints: Endpoints,
}

impl ApiClient {
    pub fn new(endpoints: Endpoints) -> reqwest::Result<Self> {
        Ok(Self {
            http: http_client(endpoints.timeout)?,
            endpoints,
        })
    }

    /// Infer the caller's city from their network address
    pub async fn locate_by_ip(&self) -> Result<Location, ResolutionError> {
        tracing::debug!(url = %self.endpoints.ip_url, "ip lookup");
        let response = self
            .http
            .get(&self.endpoints.ip_url)
            .send()
            .await
            .map_err(ResolutionError::Request)?;
        if !response.status().is_success() {
            return Err(ResolutionError::Status(response.status()));
        }
        let body: IpInfoResponse = response
            .json()
            .await
            .map_err(|e| ResolutionError::Decode(e.to_string()))?;
        location_from_ip(body)
    }

    /// Resolve a city name to coordinates with OpenStreetMap Nominatim
    pub async fn geocode_city(&self, city: &str) -> Result<Location, ResolutionError> {
        let url = format!(
            "{}/search?q={}&format=jsonv2&limit=1",
            self.endpoints.geocode_url.trim_end_matches('/'),
            urlencoding::encode(city)
        );
        tracing::debug!(%url, "geocode");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(ResolutionError::Request)?;
        if !response.status().is_success() {
            return Err(ResolutionError::Status(response.status()));
        }
        let places: Vec<NominatimPlace> = response
            .json()
            .await
            .map_err(|e| ResolutionError::Decode(e.to_string()))?;
        location_from_search(city, places)
    }

    /// Open a provider session. Dropping it releases the connection.
    pub fn open_weather_session(&self) -> Result<WeatherSession, FetchError> {
        let http = http_client(self.endpoints.timeout)?;
        tracing::debug!(url = %self.endpoints.weather_url, "weather session opened");
        Ok(WeatherSession {
            http,
            base_url: self.endpoints.weather_url.trim_end_matches('/').to_string(),
        })
    }
}

// ============================================================================
// Weather provider (wttr.in j1 format)
// ============================================================================

#[derive(Debug, Deserialize)]
struct WttrResponse {
    #[serde(default)]
    current_condition: Vec<WttrCurrent>,
    #[serde(default)]
    weather: Vec<WttrDay>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WttrCurrent {
    #[serde(rename = "temp_C")]
    temp_c: String,
    weather_code: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WttrDay {
    date: String,
    #[serde(rename = "avgtempC")]
    avg_temp_c: String,
}

fn parse_number<T: std::str::FromStr>(field: &str, value: &str) -> Result<T, FetchError> {
    value
        .trim()
        .parse()
        .map_err(|_| FetchError::Decode(format!("{field}: '{value}' is not a number")))
}

fn snapshot_from(city: &str, body: WttrResponse) -> Result<WeatherSnapshot, FetchError> {
    let current = body
        .current_condition
        .into_iter()
        .next()
        .ok_or_else(|| FetchError::NoConditions(city.to_string()))?;

    let daily = body
        .weather
        .into_iter()
        .map(|day| {
            let date = NaiveDate::parse_from_str(&day.date, "%Y-%m-%d")
                .map_err(|e| FetchError::Decode(format!("date '{}': {}", day.date, e)))?;
            Ok(DailyForecast {
                date,
                temperature: parse_number("avgtempC", &day.avg_temp_c)?,
            })
        })
        .collect::<Result<Vec<_>, FetchError>>()?;

    Ok(WeatherSnapshot {
        temperature: parse_number("temp_C", &current.temp_c)?,
        condition: ConditionKind::from_code(parse_number("weatherCode", &current.weather_code)?),
        daily,
    })
}

/// A provider connection scoped to one fetch
#[derive(Debug)]
pub struct WeatherSession {
    http: Client,
    base_url: String,
}

impl WeatherSession {
    /// Current conditions and daily forecast for a city, metric units
    pub async fn current(&self, city: &str) -> Result<WeatherSnapshot, FetchError> {
        let url = format!(
            "{}/{}?format=j1&m",
            self.base_url,
            urlencoding::encode(city)
        );
        tracing::debug!(%url, "weather request");

        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }
        let body: WttrResponse = response
            .json()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))?;
        snapshot_from(city, body)
    }
}

impl Drop for WeatherSession {
    fn drop(&mut self) {
        tracing::debug!(url = %self.base_url, "weather session closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_from_ip() {
        let body: IpInfoResponse = serde_json::from_str(
            r#"{"ip":"1.2.3.4","city":"Berlin","country":"DE","loc":"52.5244,13.4105"}"#,
        )
        .unwrap();
        let loc = location_from_ip(body).unwrap();
        assert_eq!(loc.name, "Berlin");
        assert_eq!(loc.lat, 52.5244);
        assert_eq!(loc.lon, 13.4105);
    }

    #[test]
    fn test_location_from_ip_without_loc() {
        let body: IpInfoResponse = serde_json::from_str(r#"{"city":"Berlin"}"#).unwrap();
        assert!(matches!(
            location_from_ip(body),
            Err(ResolutionError::MissingCoordinates)
        ));
    }

    #[test]
    fn test_location_from_ip_without_city() {
        let body: IpInfoResponse = serde_json::from_str(r#"{"loc":"1.0,2.0","city":""}"#).unwrap();
        assert!(matches!(
            location_from_ip(body),
            Err(ResolutionError::MissingCity)
        ));
    }

    #[test]
    fn test_location_from_search_keeps_typed_name() {
        let places: Vec<NominatimPlace> = serde_json::from_str(
            r#"[{"lat":"48.8588897","lon":"2.3200410","display_name":"Paris, France"}]"#,
        )
        .unwrap();
        let loc = location_from_search("Paris", places).unwrap();
        assert_eq!(loc.name, "Paris");
        assert!((loc.lat - 48.8588897).abs() < 1e-9);
    }

    #[test]
    fn test_location_from_search_empty() {
        assert!(matches!(
            location_from_search("Nowhere", Vec::new()),
            Err(ResolutionError::NotFound(city)) if city == "Nowhere"
        ));
    }

    #[test]
    fn test_snapshot_from_wttr() {
        let body: WttrResponse = serde_json::from_str(
            r#"{
                "current_condition": [{"temp_C": "18", "weatherCode": "119"}],
                "weather": [
                    {"date": "2024-05-01", "avgtempC": "16"},
                    {"date": "2024-05-02", "avgtempC": "-2"}
                ]
            }"#,
        )
        .unwrap();
        let snapshot = snapshot_from("Paris", body).unwrap();
        assert_eq!(snapshot.temperature, 18);
        assert_eq!(snapshot.condition, ConditionKind::Cloudy);
        assert_eq!(snapshot.daily.len(), 2);
        assert_eq!(snapshot.daily[1].temperature, -2);
        assert_eq!(snapshot.daily[0].date.to_string(), "2024-05-01");
    }

    #[test]
    fn test_snapshot_without_conditions() {
        let body: WttrResponse = serde_json::from_str(r#"{"weather": []}"#).unwrap();
        assert!(matches!(
            snapshot_from("Paris", body),
            Err(FetchError::NoConditions(_))
        ));
    }

    #[test]
    fn test_snapshot_bad_number() {
        let body: WttrResponse = serde_json::from_str(
            r#"{"current_condition": [{"temp_C": "warm", "weatherCode": "113"}]}"#,
        )
        .unwrap();
        assert!(matches!(
            snapshot_from("Paris", body),
            Err(FetchError::Decode(_))
        ));
    }
}
