use clap::Subcommand;
use pomowick_core::Settings;

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Show current settings
    View {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Get a settings value
    Get {
        /// Settings key (e.g. "focus_minutes", "notifications.bell")
        key: String,
    },
    /// Set a settings value
    Set {
        /// Settings key
        key: String,
        /// New value
        value: String,
    },
    /// Reset settings to defaults
    Reset,
    /// Print the settings file location
    Path,
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}

pub fn run(action: SettingsAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        SettingsAction::View { json } => {
            let settings = Settings::load();
            if json {
                println!("{}", serde_json::to_string_pretty(&settings)?);
                return Ok(());
            }
            println!("Current settings:");
            println!("  Focus duration: {} minutes", settings.focus_minutes);
            println!("  Rest duration: {} minutes", settings.rest_minutes());
            println!(
                "  Daily goal: {} minutes ({:02}:{:02})",
                settings.daily_goal_minutes,
                settings.daily_goal_minutes / 60,
                settings.daily_goal_minutes % 60
            );
            println!("  Bell: {}", on_off(settings.notifications.bell));
            println!(
                "  Desktop notifications: {}",
                on_off(settings.notifications.desktop)
            );
            println!("Settings file: {}", Settings::path()?.display());
        }
        SettingsAction::Get { key } => {
            let settings = Settings::load();
            match settings.get(&key) {
                Some(value) => println!("{value}"),
                None => return Err(format!("unknown key: {key}").into()),
            }
        }
        SettingsAction::Set { key, value } => {
            let mut settings = Settings::load();
            settings.set(&key, &value)?;
            settings.save()?;
            println!("ok");
        }
        SettingsAction::Reset => {
            Settings::default().save()?;
            println!("settings reset to defaults");
        }
        SettingsAction::Path => {
            println!("{}", Settings::path()?.display());
        }
    }
    Ok(())
}
