use clap::Subcommand;
use pomowick_core::display::format_hms;
use pomowick_core::{Settings, StatsDb};

use crate::screen::goal_lines;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Today's goal and focus time
    Today {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Focus time per day, newest first
    History {
        /// Number of days to show
        #[arg(long, default_value = "7")]
        days: u32,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = StatsDb::open()?;

    match action {
        StatsAction::Today { json } => {
            let summary = db.today_summary(&Settings::load())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("{}", goal_lines(&summary).replace('\t', ""));
                println!("Focused: {}", format_hms(summary.focus_seconds));
            }
        }
        StatsAction::History { days, json } => {
            let history = db.history(days)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&history)?);
            } else if history.is_empty() {
                println!("No focus recorded yet.");
            } else {
                for total in &history {
                    println!("{}  {}", total.day, format_hms(total.focus_seconds));
                }
            }
        }
    }
    Ok(())
}
