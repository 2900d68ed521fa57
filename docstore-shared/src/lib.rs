//! # Document Store Shared
//!
//! Types shared between the document store repository and the binary:
//! document bodies, structured status results and timestamp stamping.

pub mod document;
pub mod status;
pub mod timestamp;

pub use document::{Document, DocumentCollection, CREATED_AT, DOCUMENT_ID, HIT_ID, UPDATED_AT};
pub use status::{Lookup, StatusMessage};
pub use timestamp::{format_timestamp, now_timestamp, stamp_created, stamp_updated};
