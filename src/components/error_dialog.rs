use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Borders, Paragraph, Wrap},
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    BaseStyle, BorderStyle, Modal, ModalBehavior, ModalProps, ModalStyle, Padding, centered_rect,
};

use super::Component;
use crate::action::Action;

const DIALOG_WIDTH: u16 = 50;
const DIALOG_HEIGHT: u16 = 9;

/// Modal showing the raw message of a failed search
pub struct ErrorDialog {
    modal: Modal,
}

pub struct ErrorDialogProps<'a> {
    pub message: &'a str,
    pub is_focused: bool,
}

impl Default for ErrorDialog {
    fn default() -> Self {
        Self {
            modal: Modal::new(),
        }
    }
}

impl ErrorDialog {
    pub fn new() -> Self {
        Self::default()
    }
}

fn dismiss() -> Action {
    Action::DialogDismiss
}

fn dialog_style() -> ModalStyle {
    ModalStyle {
        dim_factor: 0.6,
        base: BaseStyle {
            border: Some(BorderStyle {
                borders: Borders::ALL,
                style: Style::default().fg(Color::Rgb(200, 100, 100)),
                focused_style: Some(Style::default().fg(Color::Red)),
            }),
            padding: Padding::xy(1, 0),
            bg: Some(Color::Rgb(35, 35, 45)),
            fg: None,
        },
    }
}

impl Component<Action> for ErrorDialog {
    type Props<'a> = ErrorDialogProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return None;
        }

        match event {
            EventKind::Key(key) => match key.code {
                KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => Some(Action::DialogDismiss),
                _ => None,
            },
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let modal_area = centered_rect(DIALOG_WIDTH, DIALOG_HEIGHT, area);
        let mut render_content = |frame: &mut Frame, inner: Rect| {
            let chunks = Layout::vertical([
                Constraint::Length(1), // Title
                Constraint::Min(1),    // Message
                Constraint::Length(1), // Hint
            ])
            .split(inner);

            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    "Error",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )))
                .alignment(Alignment::Center),
                chunks[0],
            );
            frame.render_widget(
                Paragraph::new(props.message.to_string())
                    .style(Style::default().fg(Color::Rgb(230, 200, 200)))
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true }),
                chunks[1],
            );
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    "[ OK ]",
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                )))
                .alignment(Alignment::Center),
                chunks[2],
            );
        };

        self.modal.render(
            frame,
            area,
            ModalProps {
                is_open: true,
                is_focused: props.is_focused,
                area: modal_area,
                style: dialog_style(),
                behavior: ModalBehavior {
                    close_on_esc: true,
                    close_on_backdrop: false,
                },
                on_close: dismiss,
                render_content: &mut render_content,
            },
        );
    }
}
