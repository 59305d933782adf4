use serde::{Deserialize, Serialize};

/// Which kind of segment the timer is counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Focus,
    Rest,
}

impl Mode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            Mode::Focus => Mode::Rest,
            Mode::Rest => Mode::Focus,
        }
    }

    /// Capitalized name used in prompts and notifications.
    pub fn label(self) -> &'static str {
        match self {
            Mode::Focus => "Focus",
            Mode::Rest => "Rest",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Focus => "focus",
            Mode::Rest => "rest",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggled_flips_between_modes() {
        assert_eq!(Mode::Focus.toggled(), Mode::Rest);
        assert_eq!(Mode::Rest.toggled(), Mode::Focus);
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Mode::Rest).unwrap(), "\"rest\"");
        let parsed: Mode = serde_json::from_str("\"focus\"").unwrap();
        assert_eq!(parsed, Mode::Focus);
    }
}
