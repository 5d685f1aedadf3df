//! Cat repository contracts and MongoDB implementation.
//!
//! # Responsibility
//! - Provide insert/find/update/delete calls over the `cats` collection.
//! - Classify update and delete results so callers can tell "no match"
//!   apart from "matched but unchanged".
//!
//! # Invariants
//! - Every filter is keyed by `name`, which is not unique; single-document
//!   calls act on whichever match the engine returns first.
//! - Every failure is logged before it is returned.

use crate::config::DocumentStoreConfig;
use crate::model::cat::Cat;
use log::{error, info};
use mongodb::bson::{doc, Bson, Document};
use mongodb::results::UpdateResult;
use mongodb::sync::{Client, Collection};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type DocResult<T> = Result<T, DocError>;

/// Document-store error for connection and per-call operation failures.
#[derive(Debug)]
pub enum DocError {
    /// Client could not be built or the server did not answer `ping`.
    Connection(mongodb::error::Error),
    /// A single collection operation failed.
    Operation {
        action: &'static str,
        source: mongodb::error::Error,
    },
}

impl Display for DocError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connection(err) => write!(f, "document store connection failed: {err}"),
            Self::Operation { action, source } => write!(f, "{action} failed: {source}"),
        }
    }
}

impl Error for DocError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Connection(err) => Some(err),
            Self::Operation { source, .. } => Some(source),
        }
    }
}

/// Result of a single-document update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// No document matched the filter.
    NotFound,
    /// A document matched but already held the requested value.
    Unchanged,
    Modified,
}

impl UpdateOutcome {
    /// Success means at least one document matched.
    pub fn is_success(self) -> bool {
        !matches!(self, Self::NotFound)
    }

    fn from_counts(matched: u64, modified: u64) -> Self {
        if matched == 0 {
            Self::NotFound
        } else if modified == 0 {
            Self::Unchanged
        } else {
            Self::Modified
        }
    }
}

impl From<&UpdateResult> for UpdateOutcome {
    fn from(value: &UpdateResult) -> Self {
        Self::from_counts(value.matched_count, value.modified_count)
    }
}

/// Result of a single-document delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    NotFound,
    Deleted,
}

impl DeleteOutcome {
    fn from_count(deleted: u64) -> Self {
        if deleted > 0 {
            Self::Deleted
        } else {
            Self::NotFound
        }
    }
}

/// Repository interface for the cats collection.
pub trait CatRepository {
    /// Inserts a new document and returns its generated `_id`.
    fn create_cat(&self, name: &str, age: i32, features: &[String]) -> DocResult<Bson>;
    fn read_all_cats(&self) -> DocResult<Vec<Cat>>;
    fn read_cat_by_name(&self, name: &str) -> DocResult<Option<Cat>>;
    fn update_cat_age(&self, name: &str, age: i32) -> DocResult<UpdateOutcome>;
    /// Adds `feature` with set-union semantics; repeating it is a no-op.
    fn add_feature_to_cat(&self, name: &str, feature: &str) -> DocResult<UpdateOutcome>;
    fn delete_cat_by_name(&self, name: &str) -> DocResult<DeleteOutcome>;
    /// Returns the number of deleted documents.
    fn delete_all_cats(&self) -> DocResult<u64>;
}

/// Connects to the configured server and verifies it answers `ping`.
///
/// # Side effects
/// - Emits `doc_connect` logging events with duration and status.
pub fn connect_document_store(config: &DocumentStoreConfig) -> DocResult<Client> {
    let started_at = Instant::now();
    info!("event=doc_connect module=repo status=start");

    let result = Client::with_uri_str(&config.uri).and_then(|client| {
        client
            .database(&config.database)
            .run_command(doc! { "ping": 1 }, None)?;
        Ok(client)
    });

    match result {
        Ok(client) => {
            info!(
                "event=doc_connect module=repo status=ok database={} duration_ms={}",
                config.database,
                started_at.elapsed().as_millis()
            );
            Ok(client)
        }
        Err(err) => {
            error!(
                "event=doc_connect module=repo status=error duration_ms={} error_code=doc_connect_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(DocError::Connection(err))
        }
    }
}

/// MongoDB-backed cat repository.
pub struct MongoCatRepository {
    collection: Collection<Cat>,
}

impl MongoCatRepository {
    pub fn new(collection: Collection<Cat>) -> Self {
        Self { collection }
    }

    /// Binds to the configured database/collection on an open client.
    pub fn from_client(client: &Client, config: &DocumentStoreConfig) -> Self {
        Self::new(
            client
                .database(&config.database)
                .collection::<Cat>(&config.collection),
        )
    }

    fn run<T>(
        &self,
        action: &'static str,
        op: impl FnOnce(&Collection<Cat>) -> mongodb::error::Result<T>,
    ) -> DocResult<T> {
        op(&self.collection).map_err(|source| {
            error!("event=cat_action module=repo status=error action={action} error={source}");
            DocError::Operation { action, source }
        })
    }
}

impl CatRepository for MongoCatRepository {
    fn create_cat(&self, name: &str, age: i32, features: &[String]) -> DocResult<Bson> {
        let cat = Cat::new(name, age, features.iter().cloned());
        let result = self.run("create_cat", |col| col.insert_one(&cat, None))?;
        Ok(result.inserted_id)
    }

    fn read_all_cats(&self) -> DocResult<Vec<Cat>> {
        self.run("read_all_cats", |col| {
            col.find(doc! {}, None)?.collect::<mongodb::error::Result<Vec<Cat>>>()
        })
    }

    fn read_cat_by_name(&self, name: &str) -> DocResult<Option<Cat>> {
        self.run("read_cat_by_name", |col| col.find_one(name_filter(name), None))
    }

    fn update_cat_age(&self, name: &str, age: i32) -> DocResult<UpdateOutcome> {
        let result = self.run("update_cat_age", |col| {
            col.update_one(name_filter(name), set_age_update(age), None)
        })?;
        Ok(UpdateOutcome::from(&result))
    }

    fn add_feature_to_cat(&self, name: &str, feature: &str) -> DocResult<UpdateOutcome> {
        let result = self.run("add_feature_to_cat", |col| {
            col.update_one(name_filter(name), add_feature_update(feature), None)
        })?;
        Ok(UpdateOutcome::from(&result))
    }

    fn delete_cat_by_name(&self, name: &str) -> DocResult<DeleteOutcome> {
        let result = self.run("delete_cat_by_name", |col| {
            col.delete_one(name_filter(name), None)
        })?;
        Ok(DeleteOutcome::from_count(result.deleted_count))
    }

    fn delete_all_cats(&self) -> DocResult<u64> {
        let result = self.run("delete_all_cats", |col| col.delete_many(doc! {}, None))?;
        Ok(result.deleted_count)
    }
}

fn name_filter(name: &str) -> Document {
    doc! { "name": name }
}

fn set_age_update(age: i32) -> Document {
    doc! { "$set": { "age": age } }
}

fn add_feature_update(feature: &str) -> Document {
    doc! { "$addToSet": { "features": feature } }
}

#[cfg(test)]
mod tests {
    use super::{add_feature_update, name_filter, set_age_update, DeleteOutcome, UpdateOutcome};
    use mongodb::bson::doc;

    #[test]
    fn filters_and_updates_use_expected_operators() {
        assert_eq!(name_filter("barsik"), doc! { "name": "barsik" });
        assert_eq!(set_age_update(5), doc! { "$set": { "age": 5 } });
        assert_eq!(
            add_feature_update("sleepy"),
            doc! { "$addToSet": { "features": "sleepy" } }
        );
    }

    #[test]
    fn update_outcome_uses_match_count_for_success() {
        assert_eq!(UpdateOutcome::from_counts(0, 0), UpdateOutcome::NotFound);
        assert_eq!(UpdateOutcome::from_counts(1, 0), UpdateOutcome::Unchanged);
        assert_eq!(UpdateOutcome::from_counts(1, 1), UpdateOutcome::Modified);
        assert!(!UpdateOutcome::NotFound.is_success());
        assert!(UpdateOutcome::Unchanged.is_success());
        assert!(UpdateOutcome::Modified.is_success());
    }

    #[test]
    fn delete_outcome_reflects_deleted_count() {
        assert_eq!(DeleteOutcome::from_count(0), DeleteOutcome::NotFound);
        assert_eq!(DeleteOutcome::from_count(1), DeleteOutcome::Deleted);
    }
}
