//! Use-case services over the preference repository.
//!
//! # Responsibility
//! - Own every derivation rule (aggregates, defaults, seed data).
//! - Keep FFI and CLI callers free of storage details.

pub mod dashboard_service;
pub mod local_store;
pub mod mood_service;
pub mod progress;
