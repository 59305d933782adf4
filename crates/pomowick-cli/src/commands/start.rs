use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use pomowick_core::{
    SessionDriver, SessionPlan, SessionStep, Settings, StatsDb, TerminalNotifier,
};

use crate::interrupt::Interrupts;
use crate::prompt::StdinPrompter;

const TICK: Duration = Duration::from_secs(1);
const POLL: Duration = Duration::from_millis(100);

pub fn run(focus: Option<f64>, interrupts: &Interrupts) -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::load();
    let mut db = StatsDb::open()?;
    run_session(&settings, focus, &mut db, interrupts)?;
    Ok(())
}

/// Run one session to completion, redrawing the status line every second.
pub fn run_session(
    settings: &Settings,
    focus: Option<f64>,
    db: &mut StatsDb,
    interrupts: &Interrupts,
) -> Result<SessionStep, Box<dyn std::error::Error>> {
    let plan = SessionPlan::from_settings(settings, focus)?;
    let notifier = TerminalNotifier::new(&settings.notifications);
    let mut prompt = StdinPrompter;
    let _guard = interrupts.session();

    println!(
        "Starting {} min focus.",
        focus.unwrap_or(settings.focus_minutes)
    );
    let mut driver = SessionDriver::begin(plan, db, &notifier)?;

    loop {
        match driver.tick(interrupts.take(), &mut prompt) {
            SessionStep::Running(view) => {
                print!("{}", view.status_line());
                io::stdout().flush()?;
            }
            step => {
                println!();
                return Ok(step);
            }
        }
        wait_for_tick(interrupts);
    }
}

/// Sleep one tick, waking early on Ctrl+C.
fn wait_for_tick(interrupts: &Interrupts) {
    let mut slept = Duration::ZERO;
    while slept < TICK && !interrupts.pending() {
        thread::sleep(POLL);
        slept += POLL;
    }
}
