//! Typed preference persistence.
//!
//! # Responsibility
//! - Define the key-value contract the Local Store is written against.
//! - Keep SQL and value-kind encoding inside the repository boundary.
//!
//! # Invariants
//! - A value is read back with the same kind it was written with.
//! - Namespaces never observe each other's keys.

pub mod keys;
pub mod pref_repo;
