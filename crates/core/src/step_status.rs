//! Step lifecycle status.
//!
//! Stored as lowercase text in the `steps.status` column and exchanged in the
//! same form over JSON and CSV.

use serde::{Deserialize, Serialize};

pub const STATUS_DRAFT: &str = "draft";
pub const STATUS_STARTED: &str = "started";
pub const STATUS_PAUSED: &str = "paused";
pub const STATUS_REJECTED: &str = "rejected";
pub const STATUS_COMPLETED: &str = "completed";

/// All valid status strings, in display order.
pub const VALID_STATUSES: &[&str] = &[
    STATUS_DRAFT,
    STATUS_STARTED,
    STATUS_PAUSED,
    STATUS_REJECTED,
    STATUS_COMPLETED,
];

/// Status of a single step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    #[default]
    Draft,
    Started,
    Paused,
    Rejected,
    Completed,
}

impl StepStatus {
    /// Convert from a stored string value. Exact, lowercase match.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            STATUS_DRAFT => Ok(Self::Draft),
            STATUS_STARTED => Ok(Self::Started),
            STATUS_PAUSED => Ok(Self::Paused),
            STATUS_REJECTED => Ok(Self::Rejected),
            STATUS_COMPLETED => Ok(Self::Completed),
            _ => Err(format!(
                "Invalid status: {s}. Valid values: {}",
                VALID_STATUSES.join(", ")
            )),
        }
    }

    /// Lenient conversion used for user input: trims and ignores case.
    ///
    /// The error message quotes the raw input, not the normalized form.
    pub fn parse_lenient(raw: &str) -> Result<Self, String> {
        Self::from_str_value(&raw.trim().to_lowercase()).map_err(|_| {
            format!(
                "Invalid status: {raw}. Valid values: {}",
                VALID_STATUSES.join(", ")
            )
        })
    }

    /// Convert to the stored string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => STATUS_DRAFT,
            Self::Started => STATUS_STARTED,
            Self::Paused => STATUS_PAUSED,
            Self::Rejected => STATUS_REJECTED,
            Self::Completed => STATUS_COMPLETED,
        }
    }
}

impl TryFrom<String> for StepStatus {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str_value(&value)
    }
}

impl std::fmt::Display for StepStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
