//! Interactive main menu.

use pomowick_core::{Settings, StatsDb};

use super::start::run_session;
use crate::interrupt::Interrupts;
use crate::prompt;
use crate::screen;

const COMMANDS: [&str; 3] = [
    "Start Pomodoro Session",
    "Change Focus Time",
    "Change Goal for Today",
];
const DEFAULT_FOCUS: &str = "25";
const DEFAULT_GOAL: &str = "07:30";

#[derive(Debug, PartialEq, Eq)]
enum Choice {
    Start,
    ChangeFocus,
    ChangeGoal,
    Quit,
}

fn parse_choice(input: &str) -> Option<Choice> {
    match input.trim().to_lowercase().as_str() {
        "1" => Some(Choice::Start),
        "2" => Some(Choice::ChangeFocus),
        "3" => Some(Choice::ChangeGoal),
        "q" => Some(Choice::Quit),
        _ => None,
    }
}

pub fn run(interrupts: &Interrupts) -> Result<(), Box<dyn std::error::Error>> {
    let mut db = StatsDb::open()?;
    loop {
        let mut settings = Settings::load();
        screen::show_menu(&COMMANDS, &settings, &db)?;

        let choice = loop {
            println!("\nEnter a command (1-3) or 'q' to quit:");
            let Some(input) = prompt::ask("Command", "")? else {
                break Choice::Quit;
            };
            match parse_choice(&input) {
                Some(choice) => break choice,
                None => println!("Invalid command. Please try again."),
            }
        };

        match choice {
            Choice::Start => {
                screen::show_menu(&["Press Ctrl+C to pause"], &settings, &db)?;
                run_session(&settings, None, &mut db, interrupts)?;
            }
            Choice::ChangeFocus => {
                let Some(minutes) =
                    prompt::ask("Enter new focus duration in minutes", DEFAULT_FOCUS)?
                else {
                    continue;
                };
                if let Err(e) = settings.set("focus_minutes", &minutes) {
                    eprintln!("error: {e}");
                    continue;
                }
                settings.save()?;
                screen::show_menu(&["Press Ctrl+C to pause"], &settings, &db)?;
                run_session(&settings, None, &mut db, interrupts)?;
            }
            Choice::ChangeGoal => {
                let Some(goal) = prompt::ask("Enter new daily goal in HH:MM format", DEFAULT_GOAL)?
                else {
                    continue;
                };
                match settings.set_daily_goal_hhmm(&goal) {
                    Ok(total) => {
                        settings.save()?;
                        println!("Daily goal set to {total} minutes.");
                    }
                    Err(_) => eprintln!("Invalid format. Please use HH:MM format."),
                }
            }
            Choice::Quit => {
                println!("Exiting pomowick.");
                return Ok(());
            }
        }
    }
}
