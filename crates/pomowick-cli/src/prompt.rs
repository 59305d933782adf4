//! Line-based stdin prompts.

use std::io::{self, BufRead, Write};

use pomowick_core::Prompter;

/// Read one line from stdin without its line ending. `None` at end of input.
pub fn read_line() -> io::Result<Option<String>> {
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

/// Ask for a value, falling back to `default` on an empty answer.
pub fn ask(label: &str, default: &str) -> io::Result<Option<String>> {
    if default.is_empty() {
        print!("{label}: ");
    } else {
        print!("{label} [{default}]: ");
    }
    io::stdout().flush()?;
    Ok(read_line()?.map(|answer| {
        let answer = answer.trim();
        if answer.is_empty() {
            default.to_string()
        } else {
            answer.to_string()
        }
    }))
}

/// `y`/`yes`/`n`/`no` in any case; empty input picks `default`.
pub fn parse_yes_no(input: &str, default: bool) -> Option<bool> {
    match input.trim().to_ascii_lowercase().as_str() {
        "" => Some(default),
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// [`Prompter`] over the controlling terminal.
pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn confirm(&mut self, question: &str, default: bool) -> bool {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        loop {
            print!("\n{question} {hint}: ");
            if let Err(e) = io::stdout().flush() {
                tracing::debug!(error = %e, "stdout flush failed");
            }
            match read_line() {
                Ok(Some(answer)) => match parse_yes_no(&answer, default) {
                    Some(choice) => return choice,
                    None => println!("Error: invalid input"),
                },
                Ok(None) => return default,
                Err(e) => {
                    tracing::warn!(error = %e, "could not read answer, using default");
                    return default;
                }
            }
        }
    }

    fn say(&mut self, line: &str) {
        println!("\n{line}");
    }
}
