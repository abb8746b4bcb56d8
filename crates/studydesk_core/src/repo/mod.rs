//! Persistence layer.
//!
//! # Responsibility
//! - Define the flat key-value contract (`KvStore`) and its SQLite backing.
//! - Provide typed JSON access to the five logical keys (`Storage`).
//!
//! # Invariants
//! - Every write replaces the full value under a key.
//! - Reads of absent or undecodable keys degrade to empty/absent values.

pub mod kv_repo;
pub mod storage;
