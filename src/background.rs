//! Window backgrounds, one per condition family
//!
//! Art is loaded from text files at compile time using `include_str!`.
//! Each background composites one or more colored layers; spaces are
//! transparent so lower layers show through.

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span, Text};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::ConditionKind;

// ============================================================================
// Art data - embedded at compile time
// File naming: {background}_{color}.txt
// ============================================================================

mod art {
    pub const SUN_YELLOW: &str = include_str!("../assets/backgrounds/sun_yellow.txt");
    pub const CLOUD_DARKGRAY: &str = include_str!("../assets/backgrounds/cloud_darkgray.txt");
    pub const CLOUD_LIGHTGRAY: &str = include_str!("../assets/backgrounds/cloud_lightgray.txt");
    pub const SNOW_GRAY: &str = include_str!("../assets/backgrounds/snow_gray.txt");
    pub const SNOW_WHITE: &str = include_str!("../assets/backgrounds/snow_white.txt");
    pub const THUNDER_GRAY: &str = include_str!("../assets/backgrounds/thunder_gray.txt");
    pub const THUNDER_YELLOW: &str = include_str!("../assets/backgrounds/thunder_yellow.txt");
}

/// Background shown behind the weather fields
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Background {
    #[default]
    Sun,
    Cloud,
    Snow,
    Thunder,
}

impl Background {
    /// Pick the background for a condition. Anything without a dedicated
    /// background, including fog and rain, gets the sun.
    pub fn for_condition(kind: ConditionKind) -> Self {
        match kind {
            ConditionKind::HeavySnow
            | ConditionKind::LightSnow
            | ConditionKind::HeavySnowShowers
            | ConditionKind::LightSnowShowers => Background::Snow,
            ConditionKind::ThunderyHeavyRain | ConditionKind::ThunderyShowers => {
                Background::Thunder
            }
            ConditionKind::Cloudy | ConditionKind::PartlyCloudy | ConditionKind::VeryCloudy => {
                Background::Cloud
            }
            _ => Background::Sun,
        }
    }

    /// Asset identifier
    pub fn asset(self) -> &'static str {
        match self {
            Background::Sun => "sun",
            Background::Cloud => "cloud",
            Background::Snow => "snow",
            Background::Thunder => "thunder",
        }
    }

    /// Composited art for this background
    pub fn art(self) -> Text<'static> {
        composite_layers(&self.layers())
    }

    fn layers(self) -> Vec<Layer> {
        match self {
            Background::Sun => vec![Layer {
                content: art::SUN_YELLOW,
                color: Color::Rgb(230, 190, 60),
            }],
            Background::Cloud => vec![
                Layer {
                    content: art::CLOUD_DARKGRAY,
                    color: Color::Rgb(120, 120, 140),
                },
                Layer {
                    content: art::CLOUD_LIGHTGRAY,
                    color: Color::Rgb(170, 170, 185),
                },
            ],
            Background::Snow => vec![
                Layer {
                    content: art::SNOW_GRAY,
                    color: Color::Rgb(160, 160, 175),
                },
                Layer {
                    content: art::SNOW_WHITE,
                    color: Color::Rgb(200, 220, 255),
                },
            ],
            Background::Thunder => vec![
                Layer {
                    content: art::THUNDER_GRAY,
                    color: Color::Rgb(120, 120, 140),
                },
                Layer {
                    content: art::THUNDER_YELLOW,
                    color: Color::Yellow,
                },
            ],
        }
    }
}

// ============================================================================
// Layer compositing
// ============================================================================

struct Layer {
    content: &'static str,
    color: Color,
}

/// Composite layers into Text, last layer on top, treating spaces as transparent
fn composite_layers(layers: &[Layer]) -> Text<'static> {
    if layers.is_empty() {
        return Text::default();
    }

    let layer_lines: Vec<Vec<Vec<char>>> = layers
        .iter()
        .map(|l| l.content.lines().map(|line| line.chars().collect()).collect())
        .collect();

    let max_lines = layer_lines.iter().map(|l| l.len()).max().unwrap_or(0);
    let max_width = layer_lines
        .iter()
        .flat_map(|lines| lines.iter())
        .map(|line| line.len())
        .max()
        .unwrap_or(0);

    let mut result_lines = Vec::with_capacity(max_lines);

    for line_idx in 0..max_lines {
        let mut spans = Vec::with_capacity(max_width);

        for col_idx in 0..max_width {
            let mut found_char = ' ';
            let mut found_color = Color::Reset;

            for (layer_idx, layer) in layers.iter().enumerate().rev() {
                let ch = layer_lines[layer_idx]
                    .get(line_idx)
                    .and_then(|line| line.get(col_idx));
                if let Some(&ch) = ch {
                    if ch != ' ' {
                        found_char = ch;
                        found_color = layer.color;
                        break;
                    }
                }
            }

            spans.push(Span::styled(
                found_char.to_string(),
                Style::default().fg(found_color),
            ));
        }

        result_lines.push(Line::from(spans));
    }

    Text::from(result_lines)
}
