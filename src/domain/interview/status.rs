//! InterviewStatus enum and its wire mapping.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Lifecycle status of an interview record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InterviewStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Scheduled,
    Cancelled,
}

/// Canonical wire spelling for every status. Parsing also consults
/// [`LEGACY_ALIASES`]; formatting only ever uses this table.
const WIRE_NAMES: [(InterviewStatus, &str); 5] = [
    (InterviewStatus::Pending, "pending"),
    (InterviewStatus::InProgress, "inProgress"),
    (InterviewStatus::Completed, "completed"),
    (InterviewStatus::Scheduled, "scheduled"),
    (InterviewStatus::Cancelled, "cancelled"),
];

const LEGACY_ALIASES: [(InterviewStatus, &str); 1] = [(InterviewStatus::InProgress, "in_progress")];

impl InterviewStatus {
    /// All statuses in declaration order.
    pub const ALL: [InterviewStatus; 5] = [
        InterviewStatus::Pending,
        InterviewStatus::InProgress,
        InterviewStatus::Completed,
        InterviewStatus::Scheduled,
        InterviewStatus::Cancelled,
    ];

    /// Returns the wire spelling of this status.
    pub fn as_wire(&self) -> &'static str {
        WIRE_NAMES
            .iter()
            .find(|(status, _)| status == self)
            .map(|(_, name)| *name)
            .unwrap_or("pending")
    }

    /// Maps a wire string to a status. Unrecognized values map to `Pending`.
    pub fn from_wire(value: &str) -> Self {
        WIRE_NAMES
            .iter()
            .chain(LEGACY_ALIASES.iter())
            .find(|(_, name)| *name == value)
            .map(|(status, _)| *status)
            .unwrap_or_default()
    }

    /// Returns true if the status may be requested when creating an interview.
    ///
    /// `InProgress` is reserved for interviews started by the backend.
    pub fn is_creatable(&self) -> bool {
        !matches!(self, InterviewStatus::InProgress)
    }
}

impl fmt::Display for InterviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

impl Serialize for InterviewStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_wire())
    }
}

impl<'de> Deserialize<'de> for InterviewStatus {
    /// Never fails on content: non-strings and unknown strings become `Pending`.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;
        Ok(raw.as_str().map(Self::from_wire).unwrap_or_default())
    }
}
