use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod interrupt;
mod prompt;
mod screen;

use interrupt::Interrupts;

#[derive(Parser)]
#[command(name = "pomowick", version, about = "Pomodoro timer with a burning wick")]
struct Cli {
    /// Without a subcommand, opens the interactive menu
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one focus/rest session
    Start {
        /// Focus length in minutes (defaults to the saved setting)
        #[arg(long)]
        focus: Option<f64>,
    },
    /// Settings management
    Settings {
        #[command(subcommand)]
        action: commands::settings::SettingsAction,
    },
    /// Focus statistics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("POMOWICK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        None => commands::menu::run(&Interrupts::install()?),
        Some(Commands::Start { focus }) => commands::start::run(focus, &Interrupts::install()?),
        Some(Commands::Settings { action }) => commands::settings::run(action),
        Some(Commands::Stats { action }) => commands::stats::run(action),
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
