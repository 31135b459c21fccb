use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::{Component, LocationHeader, LocationHeaderProps};
use crate::action::Action;
use crate::background::Background;
use crate::state::Report;

/// Background plus the report fields drawn over it
pub struct WeatherBody;

pub struct WeatherBodyProps<'a> {
    pub report: Option<&'a Report>,
    pub background: Background,
}

/// FIGlet name (miniwi) plus the zone line
const HEADER_HEIGHT: u16 = 5;

impl Component<Action> for WeatherBody {
    type Props<'a> = WeatherBodyProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        render_background(frame, area, props.background);

        match props.report {
            Some(report) => render_report(frame, area, report),
            None => render_blank(frame, area),
        }
    }
}

fn render_background(frame: &mut Frame, area: Rect, background: Background) {
    let art = background.art();
    let art_height = art.lines.len() as u16;
    let art_area = Layout::vertical([Constraint::Length(art_height)])
        .flex(Flex::Center)
        .split(area)[0];
    frame.render_widget(Paragraph::new(art).alignment(Alignment::Center), art_area);
}

fn field_style() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

fn render_report(frame: &mut Frame, area: Rect, report: &Report) {
    let forecast = report.forecast_lines();
    let chunks = Layout::vertical([
        Constraint::Max(HEADER_HEIGHT),             // City
        Constraint::Length(1),                      // blank
        Constraint::Length(1),                      // Local time
        Constraint::Length(1),                      // blank
        Constraint::Length(1),                      // Temperature
        Constraint::Length(1),                      // blank
        Constraint::Length(forecast.len() as u16), // Forecast
    ])
    .flex(Flex::Center)
    .split(area);

    let mut header = LocationHeader;
    header.render(
        frame,
        chunks[0],
        LocationHeaderProps {
            location: &report.location,
            timezone: &report.timezone,
            temperature: report.weather.temperature,
        },
    );

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(report.local_time_line(), field_style())).centered()),
        chunks[2],
    );
    frame.render_widget(
        Paragraph::new(
            Line::from(Span::styled(report.temperature_line(), field_style())).centered(),
        ),
        chunks[4],
    );

    let lines: Vec<Line> = forecast
        .into_iter()
        .map(|text| Line::from(Span::styled(text, field_style())).centered())
        .collect();
    frame.render_widget(Paragraph::new(lines), chunks[6]);
}

fn render_blank(frame: &mut Frame, area: Rect) {
    let hint = Line::from(vec![Span::styled(
        "Type a city and press Search",
        Style::default().fg(Color::DarkGray),
    )])
    .centered();
    let row = Layout::vertical([Constraint::Length(1)])
        .flex(Flex::End)
        .split(area)[0];
    frame.render_widget(Paragraph::new(hint), row);
}
