//! Status and hotkey bars.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::app::{InputMode, StatusMessage};
use crate::ui::theme::Theme;

/// Status bar: input mode indicator plus the latest notification, or the
/// command buffer while one is being typed.
pub struct StatusBarWidget<'a> {
    input_mode: InputMode,
    command_buffer: &'a str,
    message: Option<&'a StatusMessage>,
    theme: &'a Theme,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(input_mode: InputMode, command_buffer: &'a str, theme: &'a Theme) -> Self {
        Self {
            input_mode,
            command_buffer,
            message: None,
            theme,
        }
    }

    pub fn message(mut self, message: Option<&'a StatusMessage>) -> Self {
        self.message = message;
        self
    }
}

impl Widget for StatusBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (mode_text, mode_style) = match self.input_mode {
            InputMode::Normal => (
                " NORMAL ",
                Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            ),
            InputMode::Insert => (
                " INSERT ",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
            InputMode::Command => (
                " COMMAND ",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        };

        let mut spans = vec![Span::styled(mode_text, mode_style), Span::raw(" ")];

        if self.input_mode == InputMode::Command {
            spans.push(Span::styled(
                self.command_buffer.to_string(),
                self.theme.value_style(),
            ));
        } else if let Some(message) = self.message {
            spans.push(Span::styled(
                message.text.clone(),
                self.theme.status_style(message.level),
            ));
        } else {
            spans.push(Span::styled("Press ? for help", self.theme.hint_style()));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

/// One-line context-sensitive key hints.
pub struct HotkeyBarWidget<'a> {
    input_mode: InputMode,
    theme: &'a Theme,
}

impl<'a> HotkeyBarWidget<'a> {
    pub fn new(input_mode: InputMode, theme: &'a Theme) -> Self {
        Self { input_mode, theme }
    }
}

impl Widget for HotkeyBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let hints = match self.input_mode {
            InputMode::Normal => {
                "i edit | Tab field | I init | d dmg | h heal | a add | j/k select | u use | x remove | r reset | F2 display | q quit"
            }
            InputMode::Insert => "Esc/Enter done | Tab next field | type to edit",
            InputMode::Command => "Enter run | Esc cancel",
        };

        Paragraph::new(Line::from(Span::styled(hints, self.theme.hint_style())))
            .render(area, buf);
    }
}
