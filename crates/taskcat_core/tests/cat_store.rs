//! Round trips against a live MongoDB at the default URI (ignored by
//! default). Run with `cargo test -p taskcat_core --test cat_store -- --ignored`.

use std::time::{SystemTime, UNIX_EPOCH};
use taskcat_core::{
    connect_document_store, CatRepository, DeleteOutcome, DocError, DocumentStoreConfig,
    MongoCatRepository, UpdateOutcome,
};

fn scratch_repo(suffix: &str) -> MongoCatRepository {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let config = DocumentStoreConfig {
        collection: format!("cats_test_{suffix}_{}_{nanos}", std::process::id()),
        ..DocumentStoreConfig::default()
    };
    let client = connect_document_store(&config).unwrap();
    MongoCatRepository::from_client(&client, &config)
}

fn features(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[test]
#[ignore = "requires MongoDB on localhost:27017"]
fn update_age_keeps_features() {
    let repo = scratch_repo("age");
    repo.create_cat("barsik", 3, &features(&["curious", "cuddly"]))
        .unwrap();

    assert_eq!(
        repo.update_cat_age("barsik", 5).unwrap(),
        UpdateOutcome::Modified
    );
    assert_eq!(
        repo.update_cat_age("barsik", 5).unwrap(),
        UpdateOutcome::Unchanged
    );

    let cat = repo.read_cat_by_name("barsik").unwrap().unwrap();
    assert!(cat.id.is_some());
    assert_eq!(cat.age, 5);
    assert_eq!(cat.features, features(&["curious", "cuddly"]));
    repo.delete_all_cats().unwrap();
}

#[test]
#[ignore = "requires MongoDB on localhost:27017"]
fn add_feature_twice_keeps_one_copy() {
    let repo = scratch_repo("feature");
    repo.create_cat("barsik", 3, &features(&["curious", "cuddly"]))
        .unwrap();

    assert_eq!(
        repo.add_feature_to_cat("barsik", "sleepy").unwrap(),
        UpdateOutcome::Modified
    );
    assert_eq!(
        repo.add_feature_to_cat("barsik", "sleepy").unwrap(),
        UpdateOutcome::Unchanged
    );

    let cat = repo.read_cat_by_name("barsik").unwrap().unwrap();
    let sleepy = cat.features.iter().filter(|f| f.as_str() == "sleepy").count();
    assert_eq!(sleepy, 1);
    repo.delete_all_cats().unwrap();
}

#[test]
#[ignore = "requires MongoDB on localhost:27017"]
fn operations_on_missing_cat_report_not_found() {
    let repo = scratch_repo("missing");

    assert!(repo.read_cat_by_name("ghost").unwrap().is_none());
    assert_eq!(
        repo.update_cat_age("ghost", 1).unwrap(),
        UpdateOutcome::NotFound
    );
    assert_eq!(
        repo.add_feature_to_cat("ghost", "sleepy").unwrap(),
        UpdateOutcome::NotFound
    );
    assert_eq!(
        repo.delete_cat_by_name("ghost").unwrap(),
        DeleteOutcome::NotFound
    );
}

#[test]
#[ignore = "requires MongoDB on localhost:27017"]
fn delete_all_then_read_all_is_empty() {
    let repo = scratch_repo("purge");
    repo.create_cat("barsik", 3, &[]).unwrap();
    repo.create_cat("barsik", 4, &[]).unwrap();
    repo.create_cat("murzik", 2, &[]).unwrap();

    assert_eq!(repo.read_all_cats().unwrap().len(), 3);
    assert_eq!(
        repo.delete_cat_by_name("barsik").unwrap(),
        DeleteOutcome::Deleted
    );
    assert_eq!(repo.delete_all_cats().unwrap(), 2);
    assert!(repo.read_all_cats().unwrap().is_empty());
}

#[test]
fn unreachable_server_is_a_connection_error() {
    let config = DocumentStoreConfig {
        uri: "mongodb://127.0.0.1:1/?serverSelectionTimeoutMS=200".to_string(),
        ..DocumentStoreConfig::default()
    };

    let err = connect_document_store(&config).unwrap_err();
    assert!(matches!(err, DocError::Connection(_)));
}
