//! Color theme and styling for the tracker TUI.

use ratatui::style::{Color, Modifier, Style};

use crate::app::StatusLevel;

/// UI color theme.
#[derive(Debug, Clone)]
pub struct Theme {
    // Base colors
    pub border: Color,
    pub border_focused: Color,
    pub label: Color,
    pub value: Color,
    pub hint: Color,

    // Control panel HP gauge
    pub hp_healthy: Color,
    pub hp_wounded: Color,
    pub hp_critical: Color,

    // Audience boss bar (deep red shades on black)
    pub bar_high: Color,
    pub bar_mid: Color,
    pub bar_low: Color,
    pub bar_empty: Color,
    pub display_name: Color,
    pub backdrop: Color,

    // Status line
    pub info_text: Color,
    pub warning_text: Color,
    pub error_text: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            border: Color::DarkGray,
            border_focused: Color::Cyan,
            label: Color::Gray,
            value: Color::White,
            hint: Color::DarkGray,

            hp_healthy: Color::Green,
            hp_wounded: Color::Yellow,
            hp_critical: Color::Red,

            bar_high: Color::Rgb(0x8b, 0x00, 0x00),
            bar_mid: Color::Rgb(0xa5, 0x2a, 0x2a),
            bar_low: Color::Rgb(0x5c, 0x00, 0x00),
            bar_empty: Color::Rgb(0x1a, 0x1a, 0x1a),
            display_name: Color::Rgb(0xe8, 0xe8, 0xe8),
            backdrop: Color::DarkGray,

            info_text: Color::Green,
            warning_text: Color::Yellow,
            error_text: Color::Red,
        }
    }
}

impl Theme {
    /// Border style for a panel.
    pub fn border_style(&self, focused: bool) -> Style {
        Style::default().fg(if focused {
            self.border_focused
        } else {
            self.border
        })
    }

    /// Field label style, highlighted when the field has focus.
    pub fn label_style(&self, focused: bool) -> Style {
        if focused {
            Style::default()
                .fg(self.border_focused)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.label)
        }
    }

    /// Field value style.
    pub fn value_style(&self) -> Style {
        Style::default().fg(self.value)
    }

    /// Dim style for hints and placeholders.
    pub fn hint_style(&self) -> Style {
        Style::default().fg(self.hint).add_modifier(Modifier::DIM)
    }

    /// Control panel HP gauge color for a health ratio.
    pub fn hp_color(&self, ratio: f64) -> Color {
        if ratio > 0.5 {
            self.hp_healthy
        } else if ratio > 0.25 {
            self.hp_wounded
        } else {
            self.hp_critical
        }
    }

    /// Audience bar color for a health ratio (deeper red as it drains).
    pub fn bar_color(&self, ratio: f64) -> Color {
        if ratio > 0.6 {
            self.bar_high
        } else if ratio > 0.3 {
            self.bar_mid
        } else {
            self.bar_low
        }
    }

    /// Status line style for a notification severity.
    pub fn status_style(&self, level: StatusLevel) -> Style {
        match level {
            StatusLevel::Info => Style::default().fg(self.info_text),
            StatusLevel::Warning => Style::default().fg(self.warning_text),
            StatusLevel::Error => Style::default()
                .fg(self.error_text)
                .add_modifier(Modifier::BOLD),
        }
    }
}
