//! Change notification types delivered by the change notification source.

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Kind of change carried by a notification.
///
/// The source only ever emits `CREATE` and `UPDATE`. Every other tag
/// (deletions included) lands on [`ChangeKind::Other`] and produces a
/// minimal audit entry without value fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Create,
    Update,
    Other,
}

impl ChangeKind {
    /// Returns the wire representation of the change kind
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Other => "OTHER",
        }
    }

    /// Parse a change kind from its wire tag, mapping unknown tags to `Other`
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "CREATE" => Self::Create,
            "UPDATE" => Self::Update,
            _ => Self::Other,
        }
    }
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for ChangeKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ChangeKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(Self::from_tag(&tag))
    }
}

/// One change notification: the kind of change plus the before/after
/// snapshots of the source record. Either image may be absent or empty;
/// no schema is enforced beyond being a JSON object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub kind: ChangeKind,
    #[serde(default)]
    pub before: Map<String, Value>,
    #[serde(default)]
    pub after: Map<String, Value>,
}

/// A delivered batch of change notifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeBatch {
    pub records: Vec<ChangeRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_round_trip() {
        for kind in [ChangeKind::Create, ChangeKind::Update, ChangeKind::Other] {
            let json = serde_json::to_string(&kind).unwrap();
            let parsed: ChangeKind = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn test_unknown_kind_maps_to_other() {
        let record: ChangeRecord = serde_json::from_value(json!({
            "kind": "REMOVE",
            "before": {"key": "k1", "value": "v1"}
        }))
        .unwrap();
        assert_eq!(record.kind, ChangeKind::Other);
    }

    #[test]
    fn test_missing_images_default_to_empty() {
        let record: ChangeRecord = serde_json::from_value(json!({"kind": "CREATE"})).unwrap();
        assert!(record.before.is_empty());
        assert!(record.after.is_empty());
    }

    #[test]
    fn test_batch_requires_records_field() {
        let result = serde_json::from_value::<ChangeBatch>(json!({"items": []}));
        assert!(result.is_err());
    }
}
