//! Menu screen rendering.

use std::io::{self, IsTerminal, Write};

use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use pomowick_core::display::format_hms;
use pomowick_core::{DailySummary, Settings, StatsDb};

const RULE_WIDTH: usize = 40;

/// Clear the terminal. Does nothing when stdout is not a terminal.
pub fn clear() -> io::Result<()> {
    let mut out = io::stdout();
    if out.is_terminal() {
        execute!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    }
    Ok(())
}

/// The two-line goal readout shown under the menu.
pub fn goal_lines(summary: &DailySummary) -> String {
    format!(
        "Goal for today: {}\n\tTime Remaining: {}",
        format_hms(summary.goal_seconds),
        format_hms(summary.remaining_seconds)
    )
}

/// Clear and draw the menu with the given numbered commands.
pub fn show_menu(commands: &[&str], settings: &Settings, db: &StatsDb) -> io::Result<()> {
    clear()?;
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = io::stdout().lock();

    writeln!(out, "\nPomodoro CLI Timer 🍅\n")?;
    if !commands.is_empty() {
        writeln!(out, "{rule}")?;
        writeln!(out, "Commands 🤖")?;
        for (index, command) in commands.iter().enumerate() {
            writeln!(out, "\t{}. {command}", index + 1)?;
        }
    }

    writeln!(out, "{rule}")?;
    writeln!(out, "Settings 🛠️")?;
    writeln!(out, " \tFocus Duration: {} minutes", settings.focus_minutes)?;
    writeln!(out, "{rule}")?;

    writeln!(out, "Statistics 📊")?;
    match db.today_summary(settings) {
        Ok(summary) => writeln!(out, "\t{}\n", goal_lines(&summary))?,
        Err(e) => {
            tracing::warn!(error = %e, "could not read today's stats");
            writeln!(out, "\tunavailable\n")?;
        }
    }
    out.flush()
}
