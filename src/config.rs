//! Command-line configuration

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tui_dispatch_debug::DebugCliArgs;

pub const DEFAULT_IP_URL: &str = "https://ipinfo.io/json";
pub const DEFAULT_GEOCODE_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_WEATHER_URL: &str = "https://wttr.in";

/// Weather window - local time, current weather and forecast for a city
#[derive(Parser, Debug)]
#[command(name = "skycast")]
#[command(about = "Look up a city's local time and weather in a terminal window")]
pub struct Args {
    /// City to show on startup (default: inferred from your network address)
    #[arg(long, short)]
    pub city: Option<String>,

    /// IP geolocation endpoint (ipinfo-compatible JSON)
    #[arg(long, default_value = DEFAULT_IP_URL)]
    pub ip_url: String,

    /// Nominatim base URL used for city geocoding
    #[arg(long, default_value = DEFAULT_GEOCODE_URL)]
    pub geocode_url: String,

    /// wttr.in-compatible weather base URL
    #[arg(long, default_value = DEFAULT_WEATHER_URL)]
    pub weather_url: String,

    /// HTTP timeout in seconds (no timeout when omitted)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: Option<u64>,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    #[command(flatten)]
    pub debug: DebugCliArgs,
}

impl Args {
    pub fn endpoints(&self) -> Endpoints {
        Endpoints {
            ip_url: self.ip_url.clone(),
            geocode_url: self.geocode_url.clone(),
            weather_url: self.weather_url.clone(),
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }
}

/// Where the external services live
#[derive(Clone, Debug, PartialEq)]
pub struct Endpoints {
    pub ip_url: String,
    pub geocode_url: String,
    pub weather_url: String,
    pub timeout: Option<Duration>,
}

impl Endpoints {
    /// Point every service at one base URL (mock servers)
    pub fn all_at(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            ip_url: format!("{base}/json"),
            geocode_url: base.to_string(),
            weather_url: base.to_string(),
            timeout: None,
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            ip_url: DEFAULT_IP_URL.to_string(),
            geocode_url: DEFAULT_GEOCODE_URL.to_string(),
            weather_url: DEFAULT_WEATHER_URL.to_string(),
            timeout: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["skycast"]);
        assert_eq!(args.city, None);
        assert_eq!(args.endpoints(), Endpoints::default());
    }

    #[test]
    fn test_overrides() {
        let args = Args::parse_from([
            "skycast",
            "--city",
            "Paris",
            "--weather-url",
            "http://localhost:9000",
            "--timeout-secs",
            "5",
        ]);
        assert_eq!(args.city.as_deref(), Some("Paris"));
        let endpoints = args.endpoints();
        assert_eq!(endpoints.weather_url, "http://localhost:9000");
        assert_eq!(endpoints.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_all_at() {
        let endpoints = Endpoints::all_at("http://127.0.0.1:4000/");
        assert_eq!(endpoints.ip_url, "http://127.0.0.1:4000/json");
        assert_eq!(endpoints.geocode_url, "http://127.0.0.1:4000");
    }
}
