use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Layout};
use ratatui::prelude::{Frame, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::{Component, SearchBar, SearchBarProps, WeatherBody, WeatherBodyProps};
use crate::action::Action;
use crate::state::AppState;

/// Window size in cells; the window never grows with the terminal
pub const WINDOW_WIDTH: u16 = 80;
pub const WINDOW_HEIGHT: u16 = 30;

pub const WINDOW_TITLE: &str = " Weather App ";

/// Fixed-size window centred in `area` (clipped if the terminal is smaller)
pub fn window_rect(area: Rect) -> Rect {
    let width = WINDOW_WIDTH.min(area.width);
    let height = WINDOW_HEIGHT.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Props for WeatherDisplay - read-only view of state
pub struct WeatherDisplayProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// The application window: search bar, weather body, hints
#[derive(Default)]
pub struct WeatherDisplay {
    search: SearchBar,
}

impl WeatherDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    fn search_props<'a>(state: &'a AppState, is_focused: bool) -> SearchBarProps<'a> {
        SearchBarProps {
            query: &state.query,
            focus: state.focus,
            is_focused,
            on_query_change: Action::SearchQueryChange,
            on_submit: Action::SearchSubmit,
        }
    }
}

impl Component<Action> for WeatherDisplay {
    type Props<'a> = WeatherDisplayProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        if let EventKind::Key(key) = event {
            if key.code == KeyCode::Esc {
                return vec![Action::Quit];
            }
        }

        // Key events arriving mid-fetch are dropped, like a blocked window
        if props.state.is_fetching {
            return Vec::new();
        }

        self.search
            .handle_event(event, Self::search_props(props.state, true))
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: WeatherDisplayProps<'_>) {
        let window = window_rect(area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Gray))
            .title(WINDOW_TITLE)
            .title_style(Style::default().add_modifier(Modifier::BOLD));
        let inner = block.inner(window);
        frame.render_widget(block, window);

        let chunks = Layout::vertical([
            Constraint::Length(4), // Input + button
            Constraint::Min(1),    // Background and fields
            Constraint::Length(1), // Help bar
        ])
        .split(inner);

        let mut body = WeatherBody;
        body.render(
            frame,
            chunks[1],
            WeatherBodyProps {
                report: props.state.report.as_ref(),
                background: props.state.background,
            },
        );

        self.search.render(
            frame,
            chunks[0],
            Self::search_props(props.state, props.is_focused),
        );

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            chunks[2],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("enter", "search"),
                    StatusBarHint::new("tab", "focus"),
                    StatusBarHint::new("esc", "quit"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}
