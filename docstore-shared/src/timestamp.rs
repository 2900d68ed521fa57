//! Timestamp stamping for document bodies.

use chrono::{DateTime, Local, TimeZone};
use serde_json::Value;
use std::fmt::Display;

use crate::document::{Document, CREATED_AT, UPDATED_AT};

/// Local wall-clock time, seconds precision, no offset suffix.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Current local time in [`TIMESTAMP_FORMAT`].
pub fn now_timestamp() -> String {
    format_timestamp(&Local::now())
}

pub fn format_timestamp<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Set both `created_at` and `updated_at` to `stamp`.
pub fn stamp_created(document: &mut Document, stamp: &str) {
    document.insert(CREATED_AT.to_string(), Value::String(stamp.to_string()));
    document.insert(UPDATED_AT.to_string(), Value::String(stamp.to_string()));
}

/// Overwrite `updated_at` with `stamp`.
pub fn stamp_updated(document: &mut Document, stamp: &str) {
    document.insert(UPDATED_AT.to_string(), Value::String(stamp.to_string()));
}
