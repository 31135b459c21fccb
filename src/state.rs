//! Application state - single source of truth

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::background::Background;

/// A geographic location
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Location {
    /// City name, also used for the weather request
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

/// A location together with how it was found
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ResolvedLocation {
    pub location: Location,
    /// True when inferred from the network address rather than typed in
    pub inferred: bool,
}

/// Qualitative weather category, as reported by the provider
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum ConditionKind {
    #[default]
    Sunny,
    PartlyCloudy,
    Cloudy,
    VeryCloudy,
    Fog,
    LightShowers,
    LightSleetShowers,
    LightSleet,
    ThunderyShowers,
    LightSnow,
    HeavySnow,
    LightRain,
    HeavyShowers,
    HeavyRain,
    LightSnowShowers,
    HeavySnowShowers,
    ThunderyHeavyRain,
    ThunderySnowShowers,
    Unknown,
}

impl ConditionKind {
    /// Every kind, in provider code order
    pub const ALL: [ConditionKind; 19] = [
        ConditionKind::Sunny,
        ConditionKind::PartlyCloudy,
        ConditionKind::Cloudy,
        ConditionKind::VeryCloudy,
        ConditionKind::Fog,
        ConditionKind::LightShowers,
        ConditionKind::LightSleetShowers,
        ConditionKind::LightSleet,
        ConditionKind::ThunderyShowers,
        ConditionKind::LightSnow,
        ConditionKind::HeavySnow,
        ConditionKind::LightRain,
        ConditionKind::HeavyShowers,
        ConditionKind::HeavyRain,
        ConditionKind::LightSnowShowers,
        ConditionKind::HeavySnowShowers,
        ConditionKind::ThunderyHeavyRain,
        ConditionKind::ThunderySnowShowers,
        ConditionKind::Unknown,
    ];

    /// Map a WWO weather code (wttr.in `weatherCode`) to its category
    pub fn from_code(code: u16) -> Self {
        match code {
            113 => ConditionKind::Sunny,
            116 => ConditionKind::PartlyCloudy,
            119 => ConditionKind::Cloudy,
            122 => ConditionKind::VeryCloudy,
            143 | 248 | 260 => ConditionKind::Fog,
            176 | 263 | 353 => ConditionKind::LightShowers,
            179 | 362 | 365 | 374 => ConditionKind::LightSleetShowers,
            182 | 185 | 281 | 284 | 311 | 314 | 317 | 350 | 377 => ConditionKind::LightSleet,
            200 | 386 => ConditionKind::ThunderyShowers,
            227 | 320 => ConditionKind::LightSnow,
            230 | 329 | 332 | 338 => ConditionKind::HeavySnow,
            266 | 293 | 296 => ConditionKind::LightRain,
            299 | 305 | 356 => ConditionKind::HeavyShowers,
            302 | 308 | 359 => ConditionKind::HeavyRain,
            323 | 326 | 368 => ConditionKind::LightSnowShowers,
            335 | 371 | 395 => ConditionKind::HeavySnowShowers,
            389 => ConditionKind::ThunderyHeavyRain,
            392 => ConditionKind::ThunderySnowShowers,
            _ => ConditionKind::Unknown,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ConditionKind::Sunny => "Sunny",
            ConditionKind::PartlyCloudy => "Partly cloudy",
            ConditionKind::Cloudy => "Cloudy",
            ConditionKind::VeryCloudy => "Very cloudy",
            ConditionKind::Fog => "Fog",
            ConditionKind::LightShowers => "Light showers",
            ConditionKind::LightSleetShowers => "Light sleet showers",
            ConditionKind::LightSleet => "Light sleet",
            ConditionKind::ThunderyShowers => "Thundery showers",
            ConditionKind::LightSnow => "Light snow",
            ConditionKind::HeavySnow => "Heavy snow",
            ConditionKind::LightRain => "Light rain",
            ConditionKind::HeavyShowers => "Heavy showers",
            ConditionKind::HeavyRain => "Heavy rain",
            ConditionKind::LightSnowShowers => "Light snow showers",
            ConditionKind::HeavySnowShowers => "Heavy snow showers",
            ConditionKind::ThunderyHeavyRain => "Thundery heavy rain",
            ConditionKind::ThunderySnowShowers => "Thundery snow showers",
            ConditionKind::Unknown => "Unknown",
        }
    }
}

/// One day of the forecast
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DailyForecast {
    pub date: NaiveDate,
    /// Average temperature in °C
    pub temperature: i32,
}

/// Current conditions plus the daily forecast, in metric units
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WeatherSnapshot {
    pub temperature: i32,
    pub condition: ConditionKind,
    pub daily: Vec<DailyForecast>,
}

/// Everything a successful search displays. Replaced as a whole.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Report {
    pub location: Location,
    /// IANA timezone identifier
    pub timezone: String,
    /// Wall-clock time at fetch, `HH:MM:SS`
    pub local_time: String,
    pub weather: WeatherSnapshot,
}

impl Report {
    pub fn local_time_line(&self) -> String {
        format!("Local Time: {}", self.local_time)
    }

    pub fn temperature_line(&self) -> String {
        format!("Temperature: {}°C", self.weather.temperature)
    }

    /// Header line followed by one line per day, in forecast order
    pub fn forecast_lines(&self) -> Vec<String> {
        std::iter::once("Weekly Forecast:".to_string())
            .chain(
                self.weather
                    .daily
                    .iter()
                    .map(|day| format!("{}: {}°C", day.date, day.temperature)),
            )
            .collect()
    }
}

/// Which part of the search bar receives keys
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Focus {
    #[default]
    Input,
    Button,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Input => Focus::Button,
            Focus::Button => Focus::Input,
        }
    }
}

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, Default, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    /// Text in the city input
    #[debug(section = "Search", label = "Query")]
    pub query: String,

    #[debug(section = "Search", label = "Focus", debug_fmt)]
    pub focus: Focus,

    /// A pipeline is in flight; search actions are ignored until it ends
    #[debug(section = "Search", label = "Fetching")]
    pub is_fetching: bool,

    /// Last successful result
    #[debug(section = "Weather", label = "Report", debug_fmt)]
    pub report: Option<Report>,

    /// Backdrop for the window, follows `report`
    #[debug(section = "Weather", label = "Background", debug_fmt)]
    pub background: Background,

    /// Message of the open error dialog
    #[debug(section = "Dialog", label = "Error", debug_fmt)]
    pub error: Option<String>,
}

impl AppState {
    /// Create state with the input pre-filled
    pub fn with_query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn dialog_open(&self) -> bool {
        self.error.is_some()
    }
}
