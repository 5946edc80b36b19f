use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a report.
///
/// Reports start as `Lost` unless the reporter says otherwise. The only
/// transition the engine performs is the claim transition to `Claimed`.
/// `Returned` has no outgoing transition here but is not fenced off either:
/// claiming a returned item is allowed.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ItemStatus {
    Lost,
    Found,
    Claimed,
    Returned,
}

impl ItemStatus {
    /// Parses a status string case-insensitively.
    ///
    /// Unrecognized input falls back to `Lost`: a submission whose status is
    /// missing or mistyped is treated as a lost report. The fallback is
    /// intentional, not an error path.
    pub fn parse_or_lost(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "lost" => Self::Lost,
            "found" => Self::Found,
            "claimed" => Self::Claimed,
            "returned" => Self::Returned,
            _ => Self::Lost,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lost => "LOST",
            Self::Found => "FOUND",
            Self::Claimed => "CLAIMED",
            Self::Returned => "RETURNED",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
