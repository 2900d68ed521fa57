//! Command line interface.

use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::info;

use crate::AppError;
use docstore_repository::DocumentStore;
use docstore_shared::Document;

#[derive(Parser, Debug)]
#[command(name = "docstore")]
#[command(about = "Document store gateway over OpenSearch", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Store a new document, creating the index on first use
    Create {
        /// Index name
        #[arg(long, default_value = "dummy")]
        index: String,
        /// Document body as a JSON object
        #[arg(long, default_value = r#"{"name":"sushant","age":28}"#)]
        body: String,
    },
    /// Fetch a document by id
    Get { index: String, id: String },
    /// Merge fields into a document
    Update {
        index: String,
        id: String,
        /// Fields to merge, as a JSON object
        body: String,
    },
    /// Delete a document by id
    Delete { index: String, id: String },
    /// Delete a whole index
    DeleteIndex { index: String },
    /// Run a raw query DSL body
    Query {
        index: String,
        /// Query body, e.g. '{"query":{"match_all":{}}}'
        query: String,
    },
    /// List documents with a match-all query
    All {
        index: String,
        /// Maximum number of hits
        #[arg(long)]
        size: Option<usize>,
    },
    /// Read every document through a scroll cursor
    Scroll {
        index: String,
        #[arg(long, default_value = "100")]
        batch_size: usize,
    },
    /// Merge fields into every document of an index
    BulkUpdate {
        index: String,
        /// Fields to merge, as a JSON object
        fields: String,
    },
    /// Check cluster health
    Health,
}

/// Parse a JSON object argument into a document body.
pub fn parse_document(raw: &str) -> Result<Document, AppError> {
    match serde_json::from_str::<Value>(raw)? {
        Value::Object(document) => Ok(document),
        other => Err(AppError::invalid_input(format!(
            "Expected a JSON object, got: {}",
            other
        ))),
    }
}

/// Run one command against the store and return its JSON result.
pub async fn run(command: Command, store: &DocumentStore) -> Result<Value, AppError> {
    let result = match command {
        Command::Create { index, body } => {
            let document = store.create(&index, parse_document(&body)?).await?;
            serde_json::to_value(document)?
        }
        Command::Get { index, id } => serde_json::to_value(store.get_by_id(&index, &id).await?)?,
        Command::Update { index, id, body } => {
            let receipt = store.update_by_id(&index, &id, parse_document(&body)?).await?;
            serde_json::to_value(receipt)?
        }
        Command::Delete { index, id } => {
            serde_json::to_value(store.delete_by_id(&index, &id).await?)?
        }
        Command::DeleteIndex { index } => serde_json::to_value(store.delete_index(&index).await?)?,
        Command::Query { index, query } => {
            let query: Value = serde_json::from_str(&query)?;
            serde_json::to_value(store.get_by_query(&index, &query).await?)?
        }
        Command::All { index, size } => serde_json::to_value(store.get_all(&index, size).await?)?,
        Command::Scroll { index, batch_size } => {
            let documents = store.get_all_via_scroll(&index, batch_size).await?;
            info!(index = %index, count = documents.len(), "Scroll finished");
            serde_json::to_value(documents)?
        }
        Command::BulkUpdate { index, fields } => {
            let updated = store.bulk_update_all(&index, parse_document(&fields)?).await?;
            info!(index = %index, count = updated.len(), "Bulk update finished");
            serde_json::to_value(updated)?
        }
        Command::Health => serde_json::json!({ "healthy": store.health_check().await? }),
    };

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_defaults() {
        let cli = Cli::try_parse_from(["docstore", "create"]).unwrap();

        match cli.command {
            Command::Create { index, body } => {
                assert_eq!(index, "dummy");
                let doc = parse_document(&body).unwrap();
                assert_eq!(doc["name"], "sushant");
                assert_eq!(doc["age"], 28);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_subcommands_parse() {
        let cli = Cli::try_parse_from(["docstore", "scroll", "dummy", "--batch-size", "50"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Scroll {
                index: "dummy".to_string(),
                batch_size: 50
            }
        );

        let cli = Cli::try_parse_from(["docstore", "delete-index", "dummy"]).unwrap();
        assert_eq!(
            cli.command,
            Command::DeleteIndex {
                index: "dummy".to_string()
            }
        );

        let cli = Cli::try_parse_from(["docstore", "all", "dummy"]).unwrap();
        assert_eq!(
            cli.command,
            Command::All {
                index: "dummy".to_string(),
                size: None
            }
        );
    }

    #[test]
    fn test_missing_arguments_rejected() {
        assert!(Cli::try_parse_from(["docstore", "get", "dummy"]).is_err());
        assert!(Cli::try_parse_from(["docstore", "scroll", "dummy", "--batch-size", "x"]).is_err());
    }

    #[test]
    fn test_parse_document_requires_object() {
        assert!(parse_document(r#"{"a": 1}"#).is_ok());
        assert!(matches!(
            parse_document("[1, 2]"),
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(
            parse_document("{not json"),
            Err(AppError::JsonError(_))
        ));
    }
}
