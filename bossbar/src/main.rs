//! Boss monster tracker TUI.
//!
//! A terminal tool for tabletop hosts: a control panel for one boss monster's
//! name, hit points, and limited-use abilities, plus an audience-facing boss
//! health bar view (F2) meant for a second terminal on a player-visible
//! screen.
//!
//! # Headless Mode
//!
//! Run with `--headless` for a line-oriented interface suitable for automated
//! testing:
//!
//! ```bash
//! cargo run -p bossbar -- --headless
//! ```

mod app;
mod backdrop;
mod events;
mod headless;
mod ui;

use crossterm::{
    event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use std::path::Path;
use std::time::Duration;

use app::App;
use events::{handle_event, EventResult};
use ui::render::render;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    if args.iter().any(|a| a == "--headless") {
        return headless::run_headless().map_err(|e| e.into());
    }

    let mut app = App::new();

    // Optional monster file to load at startup
    if let Some(path) = args.iter().find(|a| !a.starts_with("--")) {
        app.load_from(Path::new(path));
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| render(f, &app))?;

        // Poll with a timeout so the bar animation keeps ticking
        if event::poll(Duration::from_millis(100))? {
            let ev = event::read()?;
            match handle_event(&mut app, ev) {
                EventResult::Quit => return Ok(()),
                EventResult::NeedsRedraw | EventResult::Continue => {}
            }
        } else {
            app.tick();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn print_help() {
    println!("bossbar - boss monster tracker for tabletop hosts");
    println!();
    println!("USAGE:");
    println!("  bossbar [OPTIONS] [MONSTER_FILE]");
    println!();
    println!("OPTIONS:");
    println!("  -h, --help     Show this help message");
    println!("  --headless     Run the line-oriented interface (no TUI)");
    println!();
    println!("ARGS:");
    println!("  MONSTER_FILE   Saved monster snapshot (JSON) to load at startup");
    println!();
    println!("KEYS (control panel):");
    println!("  i / Enter      Edit the focused field     Tab   Next field");
    println!("  I              Initialize monster         r     Reset monster");
    println!("  d / h          Apply damage / healing     a     Add ability");
    println!("  j/k, u, x      Select / use / remove ability");
    println!("  F2 or D        Toggle the audience health bar display");
    println!("  :w  :load  :bg <path>  :nobg  :q          ?     Help");
}
