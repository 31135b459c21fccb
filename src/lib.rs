//! skycast - a weather window for the terminal
//!
//! Geocodes a city (or infers one from the network address), resolves its
//! timezone, fetches current weather and a daily forecast, and renders them
//! over a condition-specific background.

pub mod action;
pub mod api;
pub mod background;
pub mod components;
pub mod config;
pub mod effect;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod reducer;
pub mod state;
pub mod timezone;
