//! Readiness gate: decides whether a setup conversation may be finalized.
//!
//! A pure function of the latest snapshot. Nothing is cached between turns.

use super::{SetupParameter, SetupSnapshot};
use crate::domain::foundation::ValidationError;

/// Result of evaluating a snapshot against the readiness gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Readiness {
    missing: Vec<SetupParameter>,
}

impl Readiness {
    /// Evaluates a snapshot. Missing and blank parameters count the same.
    pub fn evaluate(snapshot: &SetupSnapshot) -> Self {
        let missing = SetupParameter::ALL
            .into_iter()
            .filter(|p| snapshot.parameter(*p).is_none())
            .collect();
        Self { missing }
    }

    pub fn is_ready(&self) -> bool {
        self.missing.is_empty()
    }

    /// Parameters still to be collected, in role/type/level order.
    pub fn missing(&self) -> &[SetupParameter] {
        &self.missing
    }

    /// Converts a not-ready evaluation into a validation error.
    pub fn require(&self) -> Result<(), ValidationError> {
        if self.is_ready() {
            Ok(())
        } else {
            Err(ValidationError::not_ready(
                self.missing.iter().map(|p| p.key()),
            ))
        }
    }
}

/// Shorthand for `Readiness::evaluate(snapshot).is_ready()`.
pub fn is_ready(snapshot: &SetupSnapshot) -> bool {
    Readiness::evaluate(snapshot).is_ready()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::{json, Map, Value};

    #[test]
    fn empty_snapshot_is_not_ready() {
        let readiness = Readiness::evaluate(&SetupSnapshot::default());
        assert!(!readiness.is_ready());
        assert_eq!(readiness.missing(), &SetupParameter::ALL);
    }

    #[test]
    fn role_only_is_not_ready() {
        let snapshot = SetupSnapshot::from_value(json!({"role": "Backend Engineer"}));
        let readiness = Readiness::evaluate(&snapshot);
        assert!(!readiness.is_ready());
        assert_eq!(
            readiness.missing(),
            &[SetupParameter::InterviewType, SetupParameter::Level]
        );
    }

    #[test]
    fn all_three_present_is_ready() {
        let snapshot = SetupSnapshot::from_value(json!({
            "role": "Backend Engineer",
            "type": "Technical",
            "level": "Mid"
        }));
        assert!(is_ready(&snapshot));
        assert!(Readiness::evaluate(&snapshot).require().is_ok());
    }

    #[test]
    fn whitespace_counts_as_missing() {
        let snapshot = SetupSnapshot::from_value(json!({
            "role": "Backend Engineer",
            "type": "Technical",
            "level": " \t"
        }));
        assert!(!is_ready(&snapshot));
    }

    #[test]
    fn require_reports_missing_keys() {
        let snapshot = SetupSnapshot::from_value(json!({"type": "Technical"}));
        let err = Readiness::evaluate(&snapshot).require().unwrap_err();
        assert_eq!(
            err,
            ValidationError::NotReady {
                missing: vec!["role".to_string(), "level".to_string()]
            }
        );
    }

    #[test]
    fn extra_fields_do_not_matter() {
        let snapshot = SetupSnapshot::from_value(json!({
            "role": "SRE",
            "type": "behavioral",
            "level": "senior",
            "current_question": 0,
            "total_questions": 0
        }));
        assert!(is_ready(&snapshot));
    }

    fn field_strategy() -> impl Strategy<Value = Option<String>> {
        prop_oneof![
            Just(None),
            Just(Some(String::new())),
            "[ \t]{1,4}".prop_map(Some),
            "[ ]{0,2}[A-Za-z][A-Za-z ]{0,12}".prop_map(Some),
        ]
    }

    proptest! {
        #[test]
        fn ready_iff_all_three_non_blank(
            role in field_strategy(),
            kind in field_strategy(),
            level in field_strategy(),
        ) {
            let mut fields = Map::new();
            for (key, value) in [("role", &role), ("type", &kind), ("level", &level)] {
                if let Some(v) = value {
                    fields.insert(key.to_string(), Value::String(v.clone()));
                }
            }
            let snapshot = SetupSnapshot::new(fields);

            let present = |v: &Option<String>| v.as_deref().map(|s| !s.trim().is_empty()).unwrap_or(false);
            let expected = present(&role) && present(&kind) && present(&level);
            prop_assert_eq!(is_ready(&snapshot), expected);
        }
    }
}
