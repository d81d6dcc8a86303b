//! Wellness-tracking domain records.
//!
//! # Responsibility
//! - Define the plain records persisted by the Local Store.
//! - Keep serialized field names stable, since lists are stored as JSON blobs.

pub mod habit;
pub mod mood;
pub mod settings;
