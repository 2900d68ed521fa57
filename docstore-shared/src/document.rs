//! Document bodies as stored in an index.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A document body: field name to JSON value.
pub type Document = Map<String, Value>;

/// Field stamped with the creation time.
pub const CREATED_AT: &str = "created_at";

/// Field stamped with the time of the last update.
pub const UPDATED_AT: &str = "updated_at";

/// Field the engine-assigned id is merged into on create.
pub const DOCUMENT_ID: &str = "id";

/// Field the engine-assigned id is injected into on query results.
pub const HIT_ID: &str = "_id";

/// A flattened set of documents together with its size.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentCollection {
    /// The document bodies, in the order the engine returned them.
    pub data: Vec<Document>,
    /// Number of documents in `data`.
    pub count: usize,
}

impl DocumentCollection {
    pub fn new(data: Vec<Document>) -> Self {
        let count = data.len();
        Self { data, count }
    }
}

impl From<Vec<Document>> for DocumentCollection {
    fn from(data: Vec<Document>) -> Self {
        Self::new(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_collection_count_matches_data() {
        let collection = DocumentCollection::new(vec![
            doc(json!({"name": "a"})),
            doc(json!({"name": "b"})),
        ]);

        assert_eq!(collection.count, 2);
        assert_eq!(collection.count, collection.data.len());
    }

    #[test]
    fn test_collection_serializes_data_and_count() {
        let collection: DocumentCollection = vec![doc(json!({"name": "a"}))].into();
        let value = serde_json::to_value(&collection).unwrap();

        assert_eq!(value["count"], 1);
        assert_eq!(value["data"][0]["name"], "a");
    }
}
