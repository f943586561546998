use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the keeper count for a scenario is supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum KeepersMode {
    /// The caller states the number of signed cases directly.
    #[default]
    DirectEntry,
    /// Keepers are derived from a lead-to-keeper conversion rate.
    FromRate,
}

impl KeepersMode {
    /// The label shown on the input form for this mode.
    pub fn label(&self) -> &'static str {
        match self {
            KeepersMode::DirectEntry => "Direct entry",
            KeepersMode::FromRate => "From rate (%)",
        }
    }
}

impl fmt::Display for KeepersMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for KeepersMode {
    type Err = CoreError;

    /// Accepts the form labels as well as the short aliases used in scenario files.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();

        match normalized.as_str() {
            "direct" | "directentry" => Ok(KeepersMode::DirectEntry),
            "rate" | "fromrate" => Ok(KeepersMode::FromRate),
            _ => Err(CoreError::UnknownKeepersMode(s.trim().to_string())),
        }
    }
}
