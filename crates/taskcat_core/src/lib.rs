//! Core library for the task-store and cats-collection demos.
//! Both demos are sequential; every call blocks until its round-trip ends.

pub mod config;
pub mod db;
pub mod demo;
pub mod logging;
pub mod model;
pub mod repo;
pub mod seed;

pub use config::{DocumentStoreConfig, LogConfig, RelationalConfig};
pub use demo::{DemoError, DemoResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::cat::Cat;
pub use model::task::{
    NewTask, RowId, Status, StatusCount, Task, TaskStatus, User, UserTaskCount, UserTaskRow,
};
pub use repo::cat_repo::{
    connect_document_store, CatRepository, DeleteOutcome, DocError, DocResult,
    MongoCatRepository, UpdateOutcome,
};
pub use repo::task_repo::{
    RepoError, RepoResult, SqliteTaskRepository, TaskRepository, TaskTable,
};
pub use seed::{seed_db, seed_db_with_rng, SeedOutcome};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
