//! Assistant-managed snapshot of collected interview parameters.
//!
//! The backend owns every field in the snapshot. The client never merges or
//! patches it; each assistant turn replaces the whole map.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// One of the interview parameters the setup conversation collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetupParameter {
    Role,
    InterviewType,
    Level,
}

impl SetupParameter {
    pub const ALL: [SetupParameter; 3] = [
        SetupParameter::Role,
        SetupParameter::InterviewType,
        SetupParameter::Level,
    ];

    /// Snapshot key the assistant uses for this parameter.
    pub fn key(&self) -> &'static str {
        match self {
            SetupParameter::Role => "role",
            SetupParameter::InterviewType => "type",
            SetupParameter::Level => "level",
        }
    }

    /// Older assistant builds report preferences under these keys.
    pub fn legacy_key(&self) -> &'static str {
        match self {
            SetupParameter::Role => "job_role",
            SetupParameter::InterviewType => "interview_type",
            SetupParameter::Level => "experience_level",
        }
    }
}

impl fmt::Display for SetupParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Open string-keyed map returned by the assistant on every turn.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SetupSnapshot(Map<String, Value>);

impl SetupSnapshot {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Builds a snapshot from an arbitrary JSON value.
    ///
    /// Anything other than an object (including `null`) yields an empty snapshot.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self(fields),
            _ => Self::default(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the trimmed text under `key`, treating blanks and non-strings as absent.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Returns the collected value for a parameter, consulting the legacy key
    /// when the primary one is missing or blank.
    pub fn parameter(&self, parameter: SetupParameter) -> Option<&str> {
        self.text(parameter.key())
            .or_else(|| self.text(parameter.legacy_key()))
    }
}

impl<'de> Deserialize<'de> for SetupSnapshot {
    /// Accepts any JSON; non-objects (including `null`) become an empty snapshot.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}

impl From<Map<String, Value>> for SetupSnapshot {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}
