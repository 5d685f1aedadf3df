//! Cat document model.
//!
//! # Invariants
//! - `_id` is assigned by the document store and omitted on insert.
//! - `name` is the lookup key but is not unique.

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// One document of the `cats` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cat {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub age: i32,
    #[serde(default)]
    pub features: Vec<String>,
}

impl Cat {
    /// Builds an unsaved cat document.
    pub fn new<I, S>(name: impl Into<String>, age: i32, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: None,
            name: name.into(),
            age,
            features: features.into_iter().map(Into::into).collect(),
        }
    }

    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.iter().any(|value| value == feature)
    }
}
