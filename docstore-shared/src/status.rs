//! Structured status results.
//!
//! An absent index or document is reported as a value rather than an error,
//! so callers can tell "nothing there" apart from a failed request.

use serde::{Deserialize, Serialize};

/// A `{status, msg}` result returned by existence-gated operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMessage {
    pub status: bool,
    pub msg: String,
}

impl StatusMessage {
    /// Create a successful status.
    pub fn ok(msg: impl Into<String>) -> Self {
        Self {
            status: true,
            msg: msg.into(),
        }
    }

    /// Create a failed status.
    pub fn failed(msg: impl Into<String>) -> Self {
        Self {
            status: false,
            msg: msg.into(),
        }
    }

    /// The index does not exist.
    pub fn index_missing(index: &str) -> Self {
        Self::failed(format!("Index = {} does not exists", index))
    }

    /// The index exists but holds no document with this id.
    pub fn id_missing(id: &str) -> Self {
        Self::failed(format!("id = {} does not exists", id))
    }

    /// The index was absent when a delete was requested.
    pub fn already_deleted(index: &str) -> Self {
        Self::failed(format!(
            "Index - {} already deleted or does not exists",
            index
        ))
    }

    /// The index was deleted.
    pub fn index_deleted(index: &str) -> Self {
        Self::ok(format!("Index - {} deleted successfully", index))
    }

    /// A single document was deleted.
    pub fn document_deleted(index: &str, id: &str) -> Self {
        Self::ok(format!(
            "Index = {} bearing _id = {} deleted successfully",
            index, id
        ))
    }
}

/// Result of an existence-gated read or update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Lookup<T> {
    /// The index and the document exist.
    Found(T),
    /// The index or the document is absent.
    Absent(StatusMessage),
}

impl<T> Lookup<T> {
    /// Consume the lookup, keeping the found value.
    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::Absent(_) => None,
        }
    }

    /// The status carried by an absent lookup.
    pub fn absent(&self) -> Option<&StatusMessage> {
        match self {
            Lookup::Found(_) => None,
            Lookup::Absent(status) => Some(status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_messages() {
        let status = StatusMessage::index_missing("dummy");
        assert!(!status.status);
        assert_eq!(status.msg, "Index = dummy does not exists");

        let status = StatusMessage::document_deleted("dummy", "abc");
        assert!(status.status);
        assert_eq!(status.msg, "Index = dummy bearing _id = abc deleted successfully");

        assert!(StatusMessage::index_deleted("dummy").status);
        assert!(!StatusMessage::already_deleted("dummy").status);
    }

    #[test]
    fn test_lookup_serializes_untagged() {
        let found: Lookup<serde_json::Value> = Lookup::Found(json!({"name": "a"}));
        assert_eq!(serde_json::to_value(&found).unwrap(), json!({"name": "a"}));

        let absent: Lookup<serde_json::Value> = Lookup::Absent(StatusMessage::id_missing("x"));
        assert_eq!(
            serde_json::to_value(&absent).unwrap(),
            json!({"status": false, "msg": "id = x does not exists"})
        );
    }

    #[test]
    fn test_lookup_accessors() {
        let found: Lookup<u32> = Lookup::Found(3);
        assert!(found.absent().is_none());
        assert_eq!(found.found(), Some(3));

        let absent: Lookup<u32> = Lookup::Absent(StatusMessage::index_missing("i"));
        assert_eq!(absent.absent().map(|s| s.status), Some(false));
        assert_eq!(absent.found(), None);
    }
}
