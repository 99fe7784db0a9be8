//! Enumerations shared by entities and payloads.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// ProjectStatus
// ---------------------------------------------------------------------------

/// Lifecycle label of a research project.
///
/// Serialized exactly as the API stores it (`"Completed"`, `"Ongoing"`,
/// `"Planned"`).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum ProjectStatus {
    #[default]
    Completed,
    Ongoing,
    Planned,
}

impl ProjectStatus {
    pub const ALL: [Self; 3] = [Self::Completed, Self::Ongoing, Self::Planned];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "Completed",
            Self::Ongoing => "Ongoing",
            Self::Planned => "Planned",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                CoreError::validation("status", format!("'{s}' is not one of Completed, Ongoing, Planned"))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_api_casing() {
        let json = serde_json::to_string(&ProjectStatus::Ongoing).unwrap();
        assert_eq!(json, "\"Ongoing\"");
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("planned".parse::<ProjectStatus>().unwrap(), ProjectStatus::Planned);
        assert_eq!(" COMPLETED ".parse::<ProjectStatus>().unwrap(), ProjectStatus::Completed);
    }

    #[test]
    fn rejects_unknown_status() {
        assert!("abandoned".parse::<ProjectStatus>().is_err());
    }

    #[test]
    fn default_is_completed() {
        assert_eq!(ProjectStatus::default(), ProjectStatus::Completed);
    }
}
