use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{BaseStyle, Padding, TextInput, TextInputProps, TextInputStyle};

use super::Component;
use crate::action::Action;
use crate::state::Focus;

pub const BUTTON_LABEL: &str = "[ Search ]";
const PLACEHOLDER: &str = "City name (empty = your location)";

/// City input with its Search button
pub struct SearchBar {
    input: TextInput,
}

pub struct SearchBarProps<'a> {
    pub query: &'a str,
    pub focus: Focus,
    pub is_focused: bool,
    // Action constructors
    pub on_query_change: fn(String) -> Action,
    pub on_submit: fn(String) -> Action,
}

impl Default for SearchBar {
    fn default() -> Self {
        Self {
            input: TextInput::new(),
        }
    }
}

impl SearchBar {
    pub fn new() -> Self {
        Self::default()
    }

    fn input_style(bg: Option<Color>) -> TextInputStyle {
        TextInputStyle {
            base: BaseStyle {
                border: None,
                padding: Padding::all(1),
                bg,
                fg: None,
            },
            placeholder_style: None,
            cursor_style: None,
        }
    }

    fn button_line(focused: bool) -> Line<'static> {
        let style = if focused {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };
        Line::from(Span::styled(BUTTON_LABEL, style)).centered()
    }
}

impl Component<Action> for SearchBar {
    type Props<'a> = SearchBarProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        let EventKind::Key(key) = event else {
            return Vec::new();
        };

        match key.code {
            KeyCode::Tab | KeyCode::BackTab => return vec![Action::UiFocusNext],
            // Enter submits from either the input or the button
            KeyCode::Enter => return vec![(props.on_submit)(props.query.to_string())],
            _ => {}
        }

        if props.focus == Focus::Button {
            return match key.code {
                KeyCode::Char(' ') => vec![(props.on_submit)(props.query.to_string())],
                _ => Vec::new(),
            };
        }

        let input_props = TextInputProps {
            value: props.query,
            placeholder: PLACEHOLDER,
            is_focused: true,
            style: Self::input_style(None),
            on_change: props.on_query_change,
            on_submit: props.on_submit,
            on_cursor_move: Some(|_| Action::Render),
        };

        self.input
            .handle_event(event, input_props)
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chunks = Layout::vertical([
            Constraint::Length(3), // Input
            Constraint::Length(1), // Button
        ])
        .split(area);

        let input_area = Layout::horizontal([Constraint::Length(44)])
            .flex(Flex::Center)
            .split(chunks[0])[0];

        let input_props = TextInputProps {
            value: props.query,
            placeholder: PLACEHOLDER,
            is_focused: props.is_focused && props.focus == Focus::Input,
            style: Self::input_style(Some(Color::Rgb(50, 50, 60))),
            on_change: props.on_query_change,
            on_submit: props.on_submit,
            on_cursor_move: Some(|_| Action::Render),
        };
        self.input.render(frame, input_area, input_props);

        let button_focused = props.is_focused && props.focus == Focus::Button;
        frame.render_widget(Paragraph::new(Self::button_line(button_focused)), chunks[1]);
    }
}
