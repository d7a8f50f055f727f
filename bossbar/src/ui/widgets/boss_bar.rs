//! Audience-facing boss health bar.
//!
//! Renders the display surface: an optional backdrop, the monster's name low
//! on the screen, and a proportionally filled bar in deep red shades beneath
//! it. At zero health everything is hidden, leaving a black screen — the
//! original's death fade.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::app::DisplayState;
use crate::backdrop::BackdropArt;
use crate::ui::layout::DisplayLayout;
use crate::ui::theme::Theme;

/// The boss bar display surface.
pub struct BossBarWidget<'a> {
    state: &'a DisplayState,
    backdrop: Option<&'a BackdropArt>,
    theme: &'a Theme,
    bordered: bool,
}

impl<'a> BossBarWidget<'a> {
    pub fn new(state: &'a DisplayState, backdrop: Option<&'a BackdropArt>, theme: &'a Theme) -> Self {
        Self {
            state,
            backdrop,
            theme,
            bordered: false,
        }
    }

    /// Draw a border and title (used for the preview panel on the control
    /// screen; the full-screen display stays bare).
    pub fn bordered(mut self, bordered: bool) -> Self {
        self.bordered = bordered;
        self
    }
}

impl Widget for BossBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = if self.bordered {
            let block = Block::default()
                .title(" Display ")
                .borders(Borders::ALL)
                .border_style(self.theme.border_style(false));
            let inner = block.inner(area);
            block.render(area, buf);
            inner
        } else {
            area
        };

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        // Death state: hide everything, including the backdrop
        if self.state.is_defeated() {
            return;
        }

        let layout = DisplayLayout::calculate(inner);

        if let Some(art) = self.backdrop {
            let lines: Vec<Line> = art
                .rows
                .iter()
                .map(|row| {
                    Line::from(Span::styled(
                        row.clone(),
                        Style::default()
                            .fg(self.theme.backdrop)
                            .add_modifier(Modifier::DIM),
                    ))
                })
                .collect();
            Paragraph::new(lines).render(layout.backdrop_area, buf);
        }

        // Monster name, centered above the bar
        let name = Line::from(Span::styled(
            self.state.display_name().to_string(),
            Style::default()
                .fg(self.theme.display_name)
                .add_modifier(Modifier::BOLD),
        ));
        Paragraph::new(name)
            .alignment(Alignment::Center)
            .render(layout.name_area, buf);

        // Health bar: fill follows the eased ratio, color the true one
        let width = layout.bar_area.width as usize;
        let filled = ((width as f64) * self.state.shown_ratio).round() as usize;
        let filled = filled.min(width);
        let color = self.theme.bar_color(self.state.target_ratio());

        let bar = Line::from(vec![
            Span::styled("█".repeat(filled), Style::default().fg(color)),
            Span::styled(
                "░".repeat(width - filled),
                Style::default().fg(self.theme.bar_empty),
            ),
        ]);
        Paragraph::new(bar).render(layout.bar_area, buf);
    }
}
