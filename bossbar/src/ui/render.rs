//! Render orchestration for the tracker TUI.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
    Frame,
};

use crate::app::App;
use crate::ui::layout::{centered_rect_fixed, AppLayout};
use crate::ui::widgets::{
    AbilityListWidget, BossBarWidget, FormWidget, HotkeyBarWidget, StatusBarWidget,
};

/// Main render function.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Full-screen audience surface: nothing but the boss bar
    if app.display_only {
        let display = app.display.borrow();
        BossBarWidget::new(&display, app.backdrop.as_ref(), &app.theme)
            .render(area, frame.buffer_mut());
        return;
    }

    let layout = AppLayout::calculate(area);

    render_title_bar(frame, app, layout.title_area);

    FormWidget::new(app).render(layout.form_area, frame.buffer_mut());

    {
        let display = app.display.borrow();
        BossBarWidget::new(&display, app.backdrop.as_ref(), &app.theme)
            .bordered(true)
            .render(layout.display_area, frame.buffer_mut());
        AbilityListWidget::new(&display.ability_lines, app.selected_ability, &app.theme)
            .render(layout.abilities_area, frame.buffer_mut());
    }

    StatusBarWidget::new(app.input_mode, app.command_buffer(), &app.theme)
        .message(app.status())
        .render(layout.status_bar, frame.buffer_mut());

    HotkeyBarWidget::new(app.input_mode, &app.theme).render(layout.hotkey_bar, frame.buffer_mut());

    if app.show_help {
        render_help_overlay(frame, app, area);
    }
}

/// Render the title bar.
fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let monster = app.session.monster();
    let title = format!(
        " Dungeon Master Console | {} | HP {}/{} ",
        monster.display_name(),
        monster.current_health,
        monster.max_health
    );

    let line = Line::from(Span::styled(
        title,
        Style::default()
            .fg(app.theme.value)
            .add_modifier(Modifier::BOLD),
    ));
    Paragraph::new(line).render(area, frame.buffer_mut());
}

/// Render the help overlay.
fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let popup_area = centered_rect_fixed(56, 22, area);

    frame.render_widget(Clear, popup_area);

    let help_text = vec![
        Line::from(Span::styled(
            " Boss Tracker - Help ",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Form:",
            Style::default().add_modifier(Modifier::UNDERLINED),
        )),
        Line::from("  Tab/S-Tab   Move between fields"),
        Line::from("  i or Enter  Edit the focused field"),
        Line::from("  Esc         Back to NORMAL mode"),
        Line::from(""),
        Line::from(Span::styled(
            "Monster:",
            Style::default().add_modifier(Modifier::UNDERLINED),
        )),
        Line::from("  I           Initialize from name + max health"),
        Line::from("  d / h       Apply the amount as damage / healing"),
        Line::from("  r           Reset health and ability uses"),
        Line::from(""),
        Line::from(Span::styled(
            "Abilities:",
            Style::default().add_modifier(Modifier::UNDERLINED),
        )),
        Line::from("  a           Add from ability name + uses (blank = unlimited)"),
        Line::from("  j/k         Select    u  Use    x  Remove"),
        Line::from(""),
        Line::from(Span::styled(
            "Display & files:",
            Style::default().add_modifier(Modifier::UNDERLINED),
        )),
        Line::from("  F2 or D     Toggle the audience health bar"),
        Line::from("  :w [path]   Save    :load [path]  Load"),
        Line::from("  :bg <path>  Set backdrop image    :nobg  Clear it"),
        Line::from(""),
        Line::from(Span::styled(
            "Press Esc or q to close",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(true));

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, popup_area);
}
