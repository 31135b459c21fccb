use artbox::{
    Alignment as ArtAlignment, Color as ArtColor, Fill, LinearGradient, Renderer, fonts,
    integrations::ratatui::ArtBox,
};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::Component;
use crate::action::Action;
use crate::state::Location;

pub struct LocationHeader;

pub struct LocationHeaderProps<'a> {
    pub location: &'a Location,
    pub timezone: &'a str,
    pub temperature: i32,
}

/// Rows below the FIGlet city name: the zone/coordinates line.
pub const HEADER_OVERHEAD: u16 = 1;

fn gradient_colors(celsius: i32) -> (ArtColor, ArtColor) {
    match celsius {
        t if t < 0 => (
            ArtColor::rgb(150, 200, 255), // Ice blue
            ArtColor::rgb(200, 230, 255), // Light ice
        ),
        t if t < 15 => (
            ArtColor::rgb(100, 180, 255), // Cool blue
            ArtColor::rgb(150, 220, 200), // Teal
        ),
        t if t < 25 => (
            ArtColor::rgb(100, 200, 150), // Green
            ArtColor::rgb(255, 220, 100), // Yellow
        ),
        t if t < 35 => (
            ArtColor::rgb(255, 180, 80), // Orange
            ArtColor::rgb(255, 120, 80), // Deep orange
        ),
        _ => (
            ArtColor::rgb(255, 100, 80), // Red-orange
            ArtColor::rgb(255, 60, 60),  // Hot red
        ),
    }
}

fn coordinate(value: f64, positive: char, negative: char) -> String {
    let hemisphere = if value < 0.0 { negative } else { positive };
    format!("{:.2}°{}", value.abs(), hemisphere)
}

impl Component<Action> for LocationHeader {
    type Props<'a> = LocationHeaderProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chunks = Layout::vertical([
            Constraint::Fill(1),                 // FIGlet city name
            Constraint::Length(HEADER_OVERHEAD), // Zone and coordinates
        ])
        .split(area);

        let (start, end) = gradient_colors(props.temperature);
        let renderer = Renderer::new(fonts::stack(&["miniwi"]))
            .with_plain_fallback()
            .with_alignment(ArtAlignment::Center)
            .with_fill(Fill::Linear(LinearGradient::horizontal(start, end)));

        frame.render_widget(ArtBox::new(&renderer, &props.location.name), chunks[0]);

        let detail = Line::from(vec![Span::styled(
            format!(
                "{} · {}, {}",
                props.timezone,
                coordinate(props.location.lat, 'N', 'S'),
                coordinate(props.location.lon, 'E', 'W'),
            ),
            Style::default().fg(Color::DarkGray),
        )])
        .centered();
        frame.render_widget(Paragraph::new(detail), chunks[1]);
    }
}
