//! TOML-backed user settings.
//!
//! Stored at `<data dir>/settings.toml`. Missing keys fall back to their
//! defaults, and a missing or unreadable file yields [`Settings::default`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::{ConfigError, ValidationError};
use crate::timer::minutes_to_duration;

/// Notification delivery switches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationSettings {
    /// Print the message with a terminal bell.
    #[serde(default = "default_true")]
    pub bell: bool,
    /// Raise an OS desktop notification.
    #[serde(default = "default_true")]
    pub desktop: bool,
}

/// User settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Focus length in minutes; fractions allowed.
    #[serde(default = "default_focus_minutes")]
    pub focus_minutes: f64,
    /// Rest length is `focus_minutes / rest_divisor`.
    #[serde(default = "default_rest_divisor")]
    pub rest_divisor: f64,
    #[serde(default = "default_daily_goal_minutes")]
    pub daily_goal_minutes: u32,
    #[serde(default)]
    pub notifications: NotificationSettings,
}

fn default_focus_minutes() -> f64 {
    25.0
}
fn default_rest_divisor() -> f64 {
    5.0
}
fn default_daily_goal_minutes() -> u32 {
    450
}
fn default_true() -> bool {
    true
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            bell: true,
            desktop: true,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            focus_minutes: default_focus_minutes(),
            rest_divisor: default_rest_divisor(),
            daily_goal_minutes: default_daily_goal_minutes(),
            notifications: NotificationSettings::default(),
        }
    }
}

impl Settings {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_some() {
                current = current.get_mut(part).ok_or_else(unknown)?;
                continue;
            }

            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;
            let new_value = match existing {
                serde_json::Value::Bool(_) => value
                    .parse::<bool>()
                    .map(serde_json::Value::Bool)
                    .map_err(|e| invalid(e.to_string()))?,
                serde_json::Value::Number(_) => {
                    if let Ok(n) = value.parse::<u64>() {
                        serde_json::Value::Number(n.into())
                    } else {
                        value
                            .parse::<f64>()
                            .ok()
                            .and_then(serde_json::Number::from_f64)
                            .map(serde_json::Value::Number)
                            .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                    }
                }
                serde_json::Value::Object(_) => return Err(unknown()),
                _ => serde_json::Value::String(value.into()),
            };
            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown())
    }

    /// Default settings file location.
    ///
    /// # Errors
    /// Returns an error if the data directory cannot be created.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("settings.toml"))
    }

    /// Load from the default location, falling back to defaults on any error.
    pub fn load() -> Self {
        match Self::path() {
            Ok(path) => Self::load_from(&path),
            Err(e) => {
                tracing::warn!(error = %e, "using default settings");
                Self::default()
            }
        }
    }

    /// Load from `path`, falling back to defaults if it is missing or corrupt.
    pub fn load_from(path: &Path) -> Self {
        match Self::try_load_from(path) {
            Ok(Some(settings)) => settings,
            Ok(None) => Self::default(),
            Err(e) => {
                tracing::warn!(error = %e, "could not read settings, using defaults");
                Self::default()
            }
        }
    }

    /// Strict load: `Ok(None)` when the file does not exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn try_load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })
            }
        };
        toml::from_str(&content)
            .map(Some)
            .map_err(|e| ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
    }

    /// Persist to the default location.
    ///
    /// # Errors
    /// Returns an error if the settings cannot be serialized or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to `path`.
    ///
    /// # Errors
    /// Returns an error if the settings cannot be serialized or written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        tracing::debug!(path = %path.display(), "settings saved");
        Ok(())
    }

    /// Get a value as a string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(_) => None,
            other => Some(other.to_string()),
        }
    }

    /// Set a value by dot-separated key. Does not save.
    ///
    /// # Errors
    /// Returns an error for unknown keys, unparsable values, or values that
    /// would make the focus or rest length non-positive.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Settings =
            serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        updated.validate().map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        *self = updated;
        Ok(())
    }

    /// Check that focus and rest lengths are usable.
    ///
    /// # Errors
    /// Returns the first non-positive duration found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.focus_duration()?;
        self.rest_duration()?;
        Ok(())
    }

    pub fn focus_duration(&self) -> Result<Duration, ValidationError> {
        minutes_to_duration("focus", self.focus_minutes)
    }

    pub fn rest_minutes(&self) -> f64 {
        self.focus_minutes / self.rest_divisor
    }

    pub fn rest_duration(&self) -> Result<Duration, ValidationError> {
        if !self.rest_divisor.is_finite() || self.rest_divisor <= 0.0 {
            return Err(ValidationError::NonPositiveDuration {
                field: "rest_divisor",
                value: self.rest_divisor.to_string(),
            });
        }
        minutes_to_duration("rest", self.rest_minutes())
    }

    /// Set the daily goal from `HH:MM` text, returning the total minutes.
    ///
    /// # Errors
    /// Returns [`ValidationError::BadGoal`] unless the text is two
    /// colon-separated whole numbers.
    pub fn set_daily_goal_hhmm(&mut self, text: &str) -> Result<u32, ValidationError> {
        let minutes = parse_hhmm(text)?;
        self.daily_goal_minutes = minutes;
        Ok(minutes)
    }
}

/// Parse `HH:MM` into total minutes. Minutes past 59 are accepted as-is.
pub fn parse_hhmm(text: &str) -> Result<u32, ValidationError> {
    let bad = || ValidationError::BadGoal(text.to_string());
    let (hours, minutes) = text.trim().split_once(':').ok_or_else(bad)?;
    let hours: u32 = hours.trim().parse().map_err(|_| bad())?;
    let minutes: u32 = minutes.trim().parse().map_err(|_| bad())?;
    hours
        .checked_mul(60)
        .and_then(|h| h.checked_add(minutes))
        .ok_or_else(bad)
}
