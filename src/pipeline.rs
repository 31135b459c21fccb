//! The search pipeline: location, then timezone, then weather.
//!
//! Each stage is an async function returning a `Result`; the effect handler
//! turns the outcome into a result action. Nothing here touches UI state.

use chrono::Utc;

use crate::api::ApiClient;
use crate::background::Background;
use crate::error::{PipelineError, ResolutionError};
use crate::state::{Location, Report, ResolvedLocation};
use crate::timezone;

/// Stage 1: IP inference when `query` is `None`, name geocoding otherwise
pub async fn resolve_location(
    client: &ApiClient,
    query: Option<&str>,
) -> Result<ResolvedLocation, ResolutionError> {
    let resolved = match query.map(str::trim).filter(|q| !q.is_empty()) {
        Some(city) => ResolvedLocation {
            location: client.geocode_city(city).await?,
            inferred: false,
        },
        None => ResolvedLocation {
            location: client.locate_by_ip().await?,
            inferred: true,
        },
    };
    tracing::info!(
        city = %resolved.location.name,
        lat = resolved.location.lat,
        lon = resolved.location.lon,
        inferred = resolved.inferred,
        "location resolved"
    );
    Ok(resolved)
}

/// Stages 2 and 3: timezone and local time, then the weather snapshot
pub async fn build_report(client: &ApiClient, location: Location) -> Result<Report, PipelineError> {
    let tz = timezone::timezone_at(location.lat, location.lon)?;
    let local_time = timezone::format_local_time(tz, Utc::now());

    let session = client.open_weather_session()?;
    let weather = session.current(&location.name).await;
    drop(session);
    let weather = weather?;

    tracing::info!(
        city = %location.name,
        timezone = tz.name(),
        temperature = weather.temperature,
        condition = weather.condition.description(),
        background = Background::for_condition(weather.condition).asset(),
        days = weather.daily.len(),
        "report loaded"
    );

    Ok(Report {
        location,
        timezone: tz.name().to_string(),
        local_time,
        weather,
    })
}

/// All stages in order
pub async fn run(client: &ApiClient, query: Option<&str>) -> Result<Report, PipelineError> {
    let resolved = resolve_location(client, query).await?;
    build_report(client, resolved.location).await
}
