//! Layout calculations for the tracker TUI.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// The control panel layout areas.
pub struct AppLayout {
    pub title_area: Rect,
    pub form_area: Rect,
    pub display_area: Rect,
    pub abilities_area: Rect,
    pub status_bar: Rect,
    pub hotkey_bar: Rect,
}

impl AppLayout {
    /// Calculate layout based on terminal size.
    pub fn calculate(area: Rect) -> Self {
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title bar
                Constraint::Min(10),   // Main content
                Constraint::Length(1), // Status bar
                Constraint::Length(1), // Hotkey bar
            ])
            .split(area);

        // Content area: form + (display preview over abilities)
        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(main_chunks[1]);

        let right_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(8), Constraint::Min(4)])
            .split(content_chunks[1]);

        Self {
            title_area: main_chunks[0],
            form_area: content_chunks[0],
            display_area: right_chunks[0],
            abilities_area: right_chunks[1],
            status_bar: main_chunks[2],
            hotkey_bar: main_chunks[3],
        }
    }
}

/// Placement of the audience display elements.
///
/// Mirrors the original 800x600 canvas: the name sits low on the screen with
/// the bar strip just beneath it, seven-eighths of the width, centered.
pub struct DisplayLayout {
    pub backdrop_area: Rect,
    pub name_area: Rect,
    pub bar_area: Rect,
}

impl DisplayLayout {
    pub fn calculate(area: Rect) -> Self {
        let name_y = area.y + area.height.saturating_sub(4);
        let bar_y = area.y + area.height.saturating_sub(2);

        let bar_width = (area.width / 8) * 7;
        let bar_x = area.x + (area.width.saturating_sub(bar_width)) / 2;

        Self {
            backdrop_area: area,
            name_area: Rect::new(area.x, name_y, area.width, 1.min(area.height)),
            bar_area: Rect::new(bar_x, bar_y, bar_width, 1.min(area.height)),
        }
    }
}

/// A fixed-size rect centered in the given area, clamped to fit.
pub fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_layout_tiles_the_terminal() {
        let layout = AppLayout::calculate(Rect::new(0, 0, 100, 30));
        assert_eq!(layout.title_area.height, 1);
        assert_eq!(layout.status_bar.height, 1);
        assert_eq!(layout.hotkey_bar.height, 1);
        assert_eq!(layout.display_area.height, 8);
        assert_eq!(layout.display_area.width, layout.abilities_area.width);
    }

    #[test]
    fn test_display_layout_keeps_bar_inside() {
        let area = Rect::new(0, 0, 80, 24);
        let layout = DisplayLayout::calculate(area);
        assert!(layout.bar_area.right() <= area.right());
        assert!(layout.bar_area.y < area.bottom());
        assert!(layout.name_area.y < layout.bar_area.y);
    }

    #[test]
    fn test_display_layout_survives_tiny_areas() {
        let area = Rect::new(0, 0, 4, 2);
        let layout = DisplayLayout::calculate(area);
        assert!(layout.bar_area.right() <= area.right());
        assert!(layout.name_area.bottom() <= area.bottom());
    }

    #[test]
    fn test_centered_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 40, 10);
        let rect = centered_rect_fixed(60, 20, area);
        assert_eq!(rect, area);
    }
}
