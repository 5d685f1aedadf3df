//! Create/read/update/delete walk-through over the cats collection.

use super::DemoResult;
use crate::repo::cat_repo::{CatRepository, DeleteOutcome, DocError, UpdateOutcome};
use log::info;
use std::io::{self, Write};

pub const DEMO_CAT_NAME: &str = "barsik";
pub const DEMO_CAT_AGE: i32 = 3;
pub const DEMO_CAT_FEATURES: [&str; 2] = ["curious", "cuddly"];
pub const DEMO_CAT_NEW_AGE: i32 = 5;
pub const DEMO_CAT_NEW_FEATURE: &str = "sleepy";

/// Runs every cat operation once, in order. Operation failures are printed
/// and skipped; only output errors abort.
pub fn run_cat_operations<R: CatRepository>(repo: &R, out: &mut impl Write) -> DemoResult<()> {
    info!("event=demo_run module=demo status=start battery=cats");

    writeln!(out, "Create {DEMO_CAT_NAME}:")?;
    let features = DEMO_CAT_FEATURES.map(String::from);
    match repo.create_cat(DEMO_CAT_NAME, DEMO_CAT_AGE, &features) {
        Ok(id) => writeln!(out, "New cat created with _id: {id}")?,
        Err(err) => report_error(out, "inserting", &err)?,
    }

    writeln!(out, "\nReading all cats:")?;
    match repo.read_all_cats() {
        Ok(cats) => {
            for cat in &cats {
                writeln!(out, "{cat:?}")?;
            }
        }
        Err(err) => report_error(out, "reading", &err)?,
    }

    writeln!(out, "\nReading cat by name '{DEMO_CAT_NAME}':")?;
    match repo.read_cat_by_name(DEMO_CAT_NAME) {
        Ok(Some(cat)) => writeln!(out, "{cat:?}")?,
        Ok(None) => writeln!(out, "No cat found with that name.")?,
        Err(err) => report_error(out, "reading", &err)?,
    }

    writeln!(out, "\nUpdating cat '{DEMO_CAT_NAME}' age to {DEMO_CAT_NEW_AGE}:")?;
    match repo.update_cat_age(DEMO_CAT_NAME, DEMO_CAT_NEW_AGE) {
        Ok(outcome) => report_update(out, outcome, "Cat age updated successfully.")?,
        Err(err) => report_error(out, "updating", &err)?,
    }

    writeln!(
        out,
        "\nAdding feature '{DEMO_CAT_NEW_FEATURE}' to '{DEMO_CAT_NAME}':"
    )?;
    match repo.add_feature_to_cat(DEMO_CAT_NAME, DEMO_CAT_NEW_FEATURE) {
        Ok(outcome) => report_update(out, outcome, "Feature added successfully.")?,
        Err(err) => report_error(out, "updating", &err)?,
    }

    writeln!(out, "\nDeleting cat by name '{DEMO_CAT_NAME}':")?;
    match repo.delete_cat_by_name(DEMO_CAT_NAME) {
        Ok(DeleteOutcome::Deleted) => writeln!(out, "Cat deleted successfully.")?,
        Ok(DeleteOutcome::NotFound) => writeln!(out, "No cat found with that name.")?,
        Err(err) => report_error(out, "deleting", &err)?,
    }

    writeln!(out, "\nDeleting all cats:")?;
    match repo.delete_all_cats() {
        Ok(count) => writeln!(out, "All cats deleted. Count: {count}")?,
        Err(err) => report_error(out, "deleting", &err)?,
    }

    info!("event=demo_run module=demo status=ok battery=cats");
    Ok(())
}

fn report_update(out: &mut impl Write, outcome: UpdateOutcome, success: &str) -> io::Result<()> {
    match outcome {
        UpdateOutcome::Modified => writeln!(out, "{success}"),
        UpdateOutcome::Unchanged => writeln!(out, "Cat matched; no changes were needed."),
        UpdateOutcome::NotFound => writeln!(out, "No cat found with that name."),
    }
}

fn report_error(out: &mut impl Write, verb: &str, err: &DocError) -> io::Result<()> {
    writeln!(out, "Error {verb} data: {err}")
}
