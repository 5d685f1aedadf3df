//! Domain model for the relational task store and the cats collection.
//!
//! # Responsibility
//! - Define plain data structures shared by repositories and demos.
//! - Keep storage label conversions next to the types they describe.
//!
//! # Invariants
//! - Every task references exactly one status and exactly one user.
//! - Cat documents carry no schema beyond their serde shape.

pub mod cat;
pub mod task;
