//! Monster form panel for the control screen.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Widget},
};

use crate::app::{App, FocusedField, InputMode};

/// The control panel form: monster fields, HP readout, backdrop label.
pub struct FormWidget<'a> {
    app: &'a App,
}

impl<'a> FormWidget<'a> {
    pub fn new(app: &'a App) -> Self {
        Self { app }
    }

    /// Build the line for one editable field, with a cursor when it is being
    /// edited (unicode-safe, like the reference input widget).
    fn field_line(&self, field: FocusedField) -> Line<'static> {
        let app = self.app;
        let theme = &app.theme;
        let focused = app.focused_field == field;
        let editing = focused && app.input_mode == InputMode::Insert;
        let value = app.fields.get(field);

        let mut spans = vec![Span::styled(
            format!("{:<13}", format!("{}:", field.label())),
            theme.label_style(focused),
        )];

        if editing {
            let cursor = app.cursor();
            let before: String = value.chars().take(cursor).collect();
            let at = value
                .chars()
                .nth(cursor)
                .map(|c| c.to_string())
                .unwrap_or_else(|| " ".to_string());
            let after: String = if cursor < value.chars().count() {
                value.chars().skip(cursor + 1).collect()
            } else {
                String::new()
            };

            spans.push(Span::styled(before, theme.value_style()));
            spans.push(Span::styled(
                at,
                Style::default().add_modifier(Modifier::UNDERLINED | Modifier::BOLD),
            ));
            spans.push(Span::styled(after, theme.value_style()));
        } else if value.is_empty() {
            spans.push(Span::styled("-", theme.hint_style()));
        } else {
            spans.push(Span::styled(value.to_string(), theme.value_style()));
        }

        Line::from(spans)
    }

    fn backdrop_line(&self) -> Line<'static> {
        let app = self.app;
        let theme = &app.theme;
        let path = app.display.borrow().backdrop_path.clone();

        match (&path, &app.backdrop) {
            (Some(_), Some(art)) => Line::from(Span::styled(
                format!("Image: {}", art.file_name),
                Style::default().fg(theme.info_text),
            )),
            (Some(p), None) => Line::from(Span::styled(
                format!("Image unreadable: {}", p.display()),
                Style::default().fg(theme.warning_text),
            )),
            (None, _) => Line::from(Span::styled("No image set", theme.hint_style())),
        }
    }
}

impl Widget for FormWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let app = self.app;
        let theme = &app.theme;
        let monster = app.session.monster();

        let block = Block::default()
            .title(" Monster ")
            .borders(Borders::ALL)
            .border_style(theme.border_style(app.input_mode == InputMode::Insert));
        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Name
                Constraint::Length(1), // Max health
                Constraint::Length(1),
                Constraint::Length(1), // HP gauge
                Constraint::Length(1),
                Constraint::Length(1), // Amount
                Constraint::Length(1),
                Constraint::Length(1), // Ability name
                Constraint::Length(1), // Ability uses
                Constraint::Length(1),
                Constraint::Length(1), // Backdrop label
                Constraint::Min(0),
            ])
            .split(inner);

        Paragraph::new(self.field_line(FocusedField::Name)).render(chunks[0], buf);
        Paragraph::new(self.field_line(FocusedField::MaxHealth)).render(chunks[1], buf);

        // Current health gauge
        let hp_label = format!("{}/{}", monster.current_health, monster.max_health);
        Gauge::default()
            .gauge_style(Style::default().fg(theme.hp_color(monster.health_ratio())))
            .ratio(monster.health_ratio())
            .label(hp_label)
            .render(chunks[3], buf);

        Paragraph::new(self.field_line(FocusedField::Amount)).render(chunks[5], buf);
        Paragraph::new(self.field_line(FocusedField::AbilityName)).render(chunks[7], buf);
        Paragraph::new(self.field_line(FocusedField::AbilityUses)).render(chunks[8], buf);

        Paragraph::new(self.backdrop_line()).render(chunks[10], buf);
    }
}
