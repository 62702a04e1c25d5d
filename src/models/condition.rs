//! Status conditions reported by the packaging controller
//!
//! Condition types and statuses are plain strings on the wire. Known values
//! get their own variant, anything else is carried through untouched so a
//! newer controller never breaks conversion.

use super::null_as_default;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Condition type reported in `status.conditions[].type`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ConditionType {
    Reconciling,
    ReconcileSucceeded,
    ReconcileFailed,
    Deleting,
    DeleteFailed,
    /// Any type this crate does not interpret
    Other(String),
}

impl Default for ConditionType {
    /// A condition without a type matches nothing
    fn default() -> Self {
        ConditionType::Other(String::new())
    }
}

impl ConditionType {
    pub fn as_str(&self) -> &str {
        match self {
            ConditionType::Reconciling => "Reconciling",
            ConditionType::ReconcileSucceeded => "ReconcileSucceeded",
            ConditionType::ReconcileFailed => "ReconcileFailed",
            ConditionType::Deleting => "Deleting",
            ConditionType::DeleteFailed => "DeleteFailed",
            ConditionType::Other(s) => s,
        }
    }
}

impl From<String> for ConditionType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Reconciling" => ConditionType::Reconciling,
            "ReconcileSucceeded" => ConditionType::ReconcileSucceeded,
            "ReconcileFailed" => ConditionType::ReconcileFailed,
            "Deleting" => ConditionType::Deleting,
            "DeleteFailed" => ConditionType::DeleteFailed,
            _ => ConditionType::Other(s),
        }
    }
}

impl From<&str> for ConditionType {
    fn from(s: &str) -> Self {
        ConditionType::from(s.to_string())
    }
}

impl From<ConditionType> for String {
    fn from(t: ConditionType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for ConditionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tri-state condition status
///
/// Kubernetes only defines `True`, `False` and `Unknown`; any other string
/// is read as `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ConditionStatus {
    True,
    False,
    #[default]
    Unknown,
}

impl ConditionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionStatus::True => "True",
            ConditionStatus::False => "False",
            ConditionStatus::Unknown => "Unknown",
        }
    }
}

impl From<String> for ConditionStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "True" => ConditionStatus::True,
            "False" => ConditionStatus::False,
            _ => ConditionStatus::Unknown,
        }
    }
}

impl From<ConditionStatus> for String {
    fn from(s: ConditionStatus) -> Self {
        s.as_str().to_string()
    }
}

/// A single entry of `status.conditions`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub type_: ConditionType,

    #[serde(default, deserialize_with = "null_as_default")]
    pub status: ConditionStatus,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub reason: String,

    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "String::is_empty"
    )]
    pub message: String,
}

impl Condition {
    pub fn new(type_: impl Into<ConditionType>, status: ConditionStatus) -> Self {
        Self {
            type_: type_.into(),
            status,
            reason: String::new(),
            message: String::new(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// True when this condition has the given type and status `True`
    pub fn is_true(&self, type_: &ConditionType) -> bool {
        &self.type_ == type_ && self.status == ConditionStatus::True
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_known_condition_types_round_trip() {
        let cond: Condition = serde_json::from_value(json!({
            "type": "ReconcileFailed",
            "status": "True",
            "message": "boom"
        }))
        .unwrap();
        assert_eq!(cond.type_, ConditionType::ReconcileFailed);
        assert_eq!(cond.status, ConditionStatus::True);
        assert_eq!(cond.message, "boom");
    }

    #[test]
    fn test_unknown_condition_type_is_preserved() {
        let cond: Condition =
            serde_json::from_value(json!({"type": "Ready", "status": "True"})).unwrap();
        assert_eq!(cond.type_, ConditionType::Other("Ready".to_string()));
        assert_eq!(cond.type_.to_string(), "Ready");
    }

    #[test]
    fn test_odd_status_reads_as_unknown() {
        let cond: Condition =
            serde_json::from_value(json!({"type": "Reconciling", "status": "Maybe"})).unwrap();
        assert_eq!(cond.status, ConditionStatus::Unknown);

        let missing: Condition = serde_json::from_value(json!({"type": "Reconciling"})).unwrap();
        assert_eq!(missing.status, ConditionStatus::Unknown);
    }

    #[test]
    fn test_nulls_read_as_empty() {
        let cond: Condition = serde_json::from_value(json!({
            "type": "ReconcileFailed",
            "status": null,
            "reason": null,
            "message": null
        }))
        .unwrap();
        assert_eq!(cond.status, ConditionStatus::Unknown);
        assert_eq!(cond.reason, "");
        assert_eq!(cond.message, "");
    }

    #[test]
    fn test_missing_type_matches_nothing() {
        let cond: Condition = serde_json::from_value(json!({"status": "True"})).unwrap();
        assert_eq!(cond.type_, ConditionType::default());
        assert!(!cond.is_true(&ConditionType::Reconciling));
        assert!(!cond.is_true(&ConditionType::ReconcileFailed));
        assert!(!cond.is_true(&ConditionType::DeleteFailed));

        let null_type: Condition =
            serde_json::from_value(json!({"type": null, "status": "True"})).unwrap();
        assert_eq!(null_type.type_, ConditionType::default());
    }

    #[test]
    fn test_is_true() {
        let cond = Condition::new("Reconciling", ConditionStatus::True);
        assert!(cond.is_true(&ConditionType::Reconciling));
        assert!(!cond.is_true(&ConditionType::ReconcileFailed));

        let cond = Condition::new("Reconciling", ConditionStatus::False);
        assert!(!cond.is_true(&ConditionType::Reconciling));
    }
}
