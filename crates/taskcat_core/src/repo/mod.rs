//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define data access contracts for the task store and the cats collection.
//! - Isolate SQL and BSON details from the demo batteries.
//!
//! # Invariants
//! - Every repository holds an explicitly passed handle; there is no
//!   process-wide client.
//! - Failures are returned as typed errors, never swallowed.

pub mod cat_repo;
pub mod task_repo;
