//! Timezone lookup from coordinates

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tzf_rs::DefaultFinder;

use crate::error::TimezoneError;

/// The polygon table is large; build it once per process.
fn finder() -> &'static DefaultFinder {
    static FINDER: OnceLock<DefaultFinder> = OnceLock::new();
    FINDER.get_or_init(DefaultFinder::new)
}

/// IANA timezone for a coordinate pair
pub fn timezone_at(lat: f64, lon: f64) -> Result<Tz, TimezoneError> {
    let in_range = (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon);
    if !in_range {
        return Err(TimezoneError::InvalidCoordinates { lat, lon });
    }

    let name = finder().get_tz_name(lon, lat);
    if name.is_empty() {
        return Err(TimezoneError::NotFound { lat, lon });
    }
    name.parse::<Tz>()
        .map_err(|_| TimezoneError::Unknown(name.to_string()))
}

/// Wall-clock `HH:MM:SS` of `instant` in `tz`
pub fn format_local_time(tz: Tz, instant: DateTime<Utc>) -> String {
    instant.with_timezone(&tz).format("%H:%M:%S").to_string()
}
