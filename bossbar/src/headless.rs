//! Headless mode for the tracker.
//!
//! A line-oriented protocol over stdin/stdout for automated testing and
//! scripted sessions. Every command prints exactly one `[OK]`- or
//! `[ERROR]`-prefixed line, except `status` and `abilities` which print a
//! small block.

use bossbar_core::{Session, UseOutcome};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// The headless command shell around a session.
pub struct HeadlessShell {
    session: Session,
}

impl Default for HeadlessShell {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessShell {
    pub fn new() -> Self {
        Self {
            session: Session::new(),
        }
    }

    /// Execute one protocol line, returning the text to print.
    ///
    /// `None` means quit.
    pub fn exec(&mut self, line: &str) -> Option<String> {
        let line = line.trim();
        if line.is_empty() {
            return Some(String::new());
        }

        let mut parts = line.split_whitespace();
        let cmd = parts.next().unwrap_or("");
        let rest: Vec<&str> = parts.collect();

        let output = match cmd {
            "quit" | "exit" => return None,

            "init" => match rest.split_first() {
                Some((max_health, name_parts)) => {
                    let name = name_parts.join(" ");
                    match self.session.initialize(&name, max_health) {
                        Ok(()) => format!(
                            "[OK] {} initialized at {} HP",
                            self.session.monster().display_name(),
                            self.session.monster().max_health
                        ),
                        Err(e) => format!("[ERROR] {e}"),
                    }
                }
                None => "[ERROR] Usage: init <max_health> <name...>".to_string(),
            },

            "damage" => match rest.first() {
                Some(amount) => match self.session.apply_damage(amount) {
                    Ok(()) => self.hp_line(),
                    Err(e) => format!("[ERROR] {e}"),
                },
                None => "[ERROR] Usage: damage <amount>".to_string(),
            },

            "heal" => match rest.first() {
                Some(amount) => match self.session.apply_healing(amount) {
                    Ok(()) => self.hp_line(),
                    Err(e) => format!("[ERROR] {e}"),
                },
                None => "[ERROR] Usage: heal <amount>".to_string(),
            },

            "ability" => self.exec_ability(&rest),

            "abilities" => self.abilities_block(),

            "reset" => {
                self.session.reset_monster();
                self.hp_line()
            }

            "bg" => {
                if rest.is_empty() {
                    "[ERROR] Usage: bg <image path>".to_string()
                } else {
                    let path = PathBuf::from(rest.join(" "));
                    self.session.set_background_image(path.clone());
                    format!("[OK] backdrop set to {}", path.display())
                }
            }

            "nobg" => {
                self.session.clear_background_image();
                "[OK] backdrop cleared".to_string()
            }

            "save" => match rest.first() {
                Some(path) => match self.session.save(path) {
                    Ok(()) => format!("[OK] saved to {path}"),
                    Err(e) => format!("[ERROR] save failed: {e}"),
                },
                None => "[ERROR] Usage: save <path>".to_string(),
            },

            "load" => match rest.first() {
                Some(path) => match self.session.load(path) {
                    Ok(()) => format!(
                        "[OK] loaded {}; {}",
                        self.session.monster().display_name(),
                        self.hp_line()
                    ),
                    Err(e) => format!("[ERROR] load failed: {e}"),
                },
                None => "[ERROR] Usage: load <path>".to_string(),
            },

            "status" => self.status_block(),

            "help" => help_text(),

            _ => format!("[ERROR] Unknown command: {cmd}. Type help for help."),
        };

        Some(output)
    }

    fn exec_ability(&mut self, rest: &[&str]) -> String {
        match rest.split_first() {
            Some((&"add", args)) => match args.split_first() {
                Some((uses, name_parts)) if !name_parts.is_empty() => {
                    let name = name_parts.join(" ");
                    match self.session.add_ability(&name, uses) {
                        Ok(()) => format!("[OK] added {}", self.last_ability_line(&name)),
                        Err(e) => format!("[ERROR] {e}"),
                    }
                }
                _ => "[ERROR] Usage: ability add <uses> <name...> (0 = unlimited)".to_string(),
            },
            Some((&"use", name_parts)) if !name_parts.is_empty() => {
                let name = name_parts.join(" ");
                match self.session.use_ability(&name) {
                    UseOutcome::Spent => format!("[OK] used {}", self.last_ability_line(&name)),
                    UseOutcome::Unlimited => format!("[OK] used {name} (unlimited)"),
                    UseOutcome::Exhausted => format!("[ERROR] no uses remaining for {name}"),
                    UseOutcome::Unknown => format!("[ERROR] no ability named {name}"),
                }
            }
            Some((&"rm", name_parts)) if !name_parts.is_empty() => {
                let name = name_parts.join(" ");
                self.session.remove_ability(&name);
                format!("[OK] removed {name}")
            }
            _ => "[ERROR] Usage: ability add|use|rm ...".to_string(),
        }
    }

    fn hp_line(&self) -> String {
        format!(
            "[OK] HP {}/{}",
            self.session.monster().current_health,
            self.session.monster().max_health
        )
    }

    /// Display line for a named ability, for echoing counters after a change.
    fn last_ability_line(&self, name: &str) -> String {
        let names = self.session.ability_names();
        let lines = self.session.ability_lines();
        names
            .iter()
            .position(|n| n == name)
            .and_then(|i| lines.get(i).cloned())
            .unwrap_or_else(|| name.to_string())
    }

    fn abilities_block(&self) -> String {
        let lines = self.session.ability_lines();
        if lines.is_empty() {
            "[OK] (no abilities)".to_string()
        } else {
            let mut out = String::from("[OK]");
            for line in lines {
                out.push_str("\n  - ");
                out.push_str(&line);
            }
            out
        }
    }

    fn status_block(&self) -> String {
        let monster = self.session.monster();
        let mut out = String::from("[STATUS]");
        out.push_str(&format!("\n  Name: {}", monster.display_name()));
        out.push_str(&format!(
            "\n  HP: {}/{}",
            monster.current_health, monster.max_health
        ));
        out.push_str(&format!("\n  Abilities: {}", monster.abilities.len()));
        for line in self.session.ability_lines() {
            out.push_str("\n    - ");
            out.push_str(&line);
        }
        match &monster.background_image {
            Some(path) => out.push_str(&format!("\n  Backdrop: {}", path.display())),
            None => out.push_str("\n  Backdrop: (none)"),
        }
        out
    }
}

fn help_text() -> String {
    [
        "[HELP]",
        "  init <max_health> <name...>   - Set up the monster at full health",
        "  damage <amount>               - Apply damage",
        "  heal <amount>                 - Apply healing",
        "  ability add <uses> <name...>  - Add an ability (0 = unlimited)",
        "  ability use <name...>         - Spend a use",
        "  ability rm <name...>          - Remove an ability",
        "  abilities                     - List abilities",
        "  reset                         - Full health, all uses restored",
        "  bg <path> / nobg              - Set or clear the backdrop image",
        "  save <path> / load <path>     - Save or load a snapshot",
        "  status                        - Show monster state",
        "  quit                          - Exit",
    ]
    .join("\n")
}

/// Run the tracker in headless mode.
pub fn run_headless() -> io::Result<()> {
    let mut shell = HeadlessShell::new();

    println!("=== bossbar headless mode ===");
    println!("{}", help_text());
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = line?;
        match shell.exec(&line) {
            Some(output) => {
                if !output.is_empty() {
                    println!("{output}");
                }
                stdout.flush().ok();
            }
            None => {
                println!("Goodbye!");
                break;
            }
        }
    }

    Ok(())
}
