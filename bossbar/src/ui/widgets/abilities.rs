//! Abilities list with index-based selection.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::ui::theme::Theme;

/// Ordered ability list; the selected row maps back to an ability name via
/// the session's ordered key list.
pub struct AbilityListWidget<'a> {
    lines: &'a [String],
    selected: usize,
    theme: &'a Theme,
}

impl<'a> AbilityListWidget<'a> {
    pub fn new(lines: &'a [String], selected: usize, theme: &'a Theme) -> Self {
        Self {
            lines,
            selected,
            theme,
        }
    }
}

impl Widget for AbilityListWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Abilities ")
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(false));
        let inner = block.inner(area);
        block.render(area, buf);

        if self.lines.is_empty() {
            Paragraph::new(Line::from(Span::styled(
                "No abilities yet - press 'a' to add one",
                self.theme.hint_style(),
            )))
            .render(inner, buf);
            return;
        }

        // Keep the selected row visible
        let visible = inner.height as usize;
        let offset = if visible > 0 && self.selected >= visible {
            self.selected + 1 - visible
        } else {
            0
        };

        let rows: Vec<Line> = self
            .lines
            .iter()
            .enumerate()
            .skip(offset)
            .take(visible)
            .map(|(i, line)| {
                if i == self.selected {
                    Line::from(vec![
                        Span::styled("> ", Style::default().fg(self.theme.border_focused)),
                        Span::styled(
                            line.clone(),
                            Style::default()
                                .fg(self.theme.border_focused)
                                .add_modifier(Modifier::BOLD),
                        ),
                    ])
                } else {
                    Line::from(vec![
                        Span::raw("  "),
                        Span::styled(line.clone(), self.theme.value_style()),
                    ])
                }
            })
            .collect();

        Paragraph::new(rows).render(inner, buf);
    }
}
