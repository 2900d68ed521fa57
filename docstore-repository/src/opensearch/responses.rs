//! OpenSearch response parsing.

use docstore_shared::Document;
use serde_json::Value;

use crate::errors::SearchError;
use crate::types::{Hit, SearchPage, UpdateReceipt};

/// Parse a search or scroll response into a page of hits.
///
/// A hit without `_source` yields an empty body; a hit without `_id` is an
/// error since every document returned by the engine has one.
pub fn parse_search_page(response: &Value) -> Result<SearchPage, SearchError> {
    let hits = response
        .get("hits")
        .and_then(|hits| hits.get("hits"))
        .and_then(Value::as_array)
        .ok_or_else(|| SearchError::parse("Search response has no hits array"))?;

    let hits = hits.iter().map(parse_hit).collect::<Result<Vec<_>, _>>()?;

    let scroll_id = response
        .get("_scroll_id")
        .and_then(Value::as_str)
        .map(str::to_string);

    Ok(SearchPage { hits, scroll_id })
}

/// Parse a single hit.
pub fn parse_hit(hit: &Value) -> Result<Hit, SearchError> {
    let id = hit
        .get("_id")
        .and_then(Value::as_str)
        .ok_or_else(|| SearchError::parse("Hit has no _id"))?;

    let source = hit
        .get("_source")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();

    Ok(Hit::new(id, source))
}

/// Extract the assigned id from an index response.
pub fn parse_index_response(response: &Value) -> Result<String, SearchError> {
    response
        .get("_id")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| SearchError::parse("Index response has no _id"))
}

/// Extract the stored body from a get response.
pub fn parse_get_response(response: &Value) -> Result<Document, SearchError> {
    response
        .get("_source")
        .and_then(Value::as_object)
        .cloned()
        .ok_or_else(|| SearchError::parse("Get response has no _source"))
}

/// Parse an update acknowledgement.
pub fn parse_update_receipt(response: Value) -> Result<UpdateReceipt, SearchError> {
    serde_json::from_value(response)
        .map_err(|e| SearchError::parse(format!("Invalid update response: {}", e)))
}

/// Extract the `items` array of a bulk response.
pub fn parse_bulk_items(response: Value) -> Result<Vec<Value>, SearchError> {
    match response {
        Value::Object(mut body) => match body.remove("items") {
            Some(Value::Array(items)) => Ok(items),
            _ => Err(SearchError::parse("Bulk response has no items array")),
        },
        _ => Err(SearchError::parse("Bulk response is not an object")),
    }
}

/// A cluster is healthy unless its status is `red`.
pub fn parse_cluster_health(response: &Value) -> bool {
    matches!(
        response.get("status").and_then(Value::as_str),
        Some("green") | Some("yellow")
    )
}
