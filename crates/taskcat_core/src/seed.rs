//! Synthetic sample data for the task store.
//!
//! # Responsibility
//! - Populate `users`, `status` and `tasks` with fake rows on first run.
//!
//! # Invariants
//! - Seeding only runs when all three tables are empty; otherwise it is a
//!   no-op, so running it twice leaves row counts unchanged.
//! - Each insert commits on its own. A failure mid-seed leaves the rows
//!   written so far in place.

use crate::model::task::{RowId, TaskStatus};
use crate::repo::task_repo::{RepoError, RepoResult, TaskTable};
use fake::faker::internet::en::SafeEmail;
use fake::faker::lorem::en::{Paragraph, Sentence};
use fake::faker::name::en::Name;
use fake::Fake;
use log::info;
use rand::seq::SliceRandom;
use rand::Rng;
use rusqlite::{params, Connection};

pub const SEED_USER_COUNT: usize = 10;
pub const SEED_TASK_COUNT: usize = 30;
const TITLE_WORDS: usize = 6;
const MAX_DESCRIPTION_CHARS: usize = 200;

/// What `seed_db` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Seeded {
        users: usize,
        statuses: usize,
        tasks: usize,
    },
    /// At least one table already had rows.
    Skipped,
}

/// Seeds the store using the thread-local RNG.
pub fn seed_db(conn: &Connection) -> RepoResult<SeedOutcome> {
    seed_db_with_rng(conn, &mut rand::thread_rng())
}

/// Seeds the store with a caller-provided RNG.
pub fn seed_db_with_rng<R: Rng + ?Sized>(conn: &Connection, rng: &mut R) -> RepoResult<SeedOutcome> {
    for table in TaskTable::ALL {
        if table_has_rows(conn, table)? {
            info!(
                "event=seed module=seed status=skipped reason=non_empty_table table={}",
                table.name()
            );
            return Ok(SeedOutcome::Skipped);
        }
    }

    let users = create_users(conn, rng, SEED_USER_COUNT)?;
    let statuses = create_status(conn, &TaskStatus::ALL)?;
    let tasks = create_tasks(conn, rng, SEED_TASK_COUNT)?;

    info!("event=seed module=seed status=ok users={users} statuses={statuses} tasks={tasks}");
    Ok(SeedOutcome::Seeded {
        users,
        statuses,
        tasks,
    })
}

/// Inserts `count` users with fake names and emails.
pub fn create_users<R: Rng + ?Sized>(
    conn: &Connection,
    rng: &mut R,
    count: usize,
) -> RepoResult<usize> {
    for _ in 0..count {
        let fullname: String = Name().fake_with_rng(rng);
        let email: String = SafeEmail().fake_with_rng(rng);
        conn.execute(
            "INSERT INTO users (fullname, email) VALUES (?1, ?2);",
            params![fullname, email],
        )?;
    }
    Ok(count)
}

/// Inserts one `status` row per label, in the given order.
pub fn create_status(conn: &Connection, statuses: &[TaskStatus]) -> RepoResult<usize> {
    for status in statuses {
        conn.execute("INSERT INTO status (name) VALUES (?1);", [status.as_str()])?;
    }
    Ok(statuses.len())
}

/// Inserts `count` tasks, each assigned to a random existing user and status.
pub fn create_tasks<R: Rng + ?Sized>(
    conn: &Connection,
    rng: &mut R,
    count: usize,
) -> RepoResult<usize> {
    let user_ids = select_ids(conn, TaskTable::Users)?;
    let status_ids = select_ids(conn, TaskTable::Status)?;

    for _ in 0..count {
        let (Some(&user_id), Some(&status_id)) = (user_ids.choose(rng), status_ids.choose(rng))
        else {
            return Err(RepoError::InvalidData(
                "cannot create tasks without users and statuses".to_string(),
            ));
        };
        let title: String = Sentence(TITLE_WORDS..TITLE_WORDS + 1).fake_with_rng(rng);
        let text: String = Paragraph(1..4).fake_with_rng(rng);

        conn.execute(
            "INSERT INTO tasks (title, description, status_id, user_id) VALUES (?1, ?2, ?3, ?4);",
            params![
                title,
                truncate_chars(&text, MAX_DESCRIPTION_CHARS),
                status_id,
                user_id
            ],
        )?;
    }
    Ok(count)
}

fn table_has_rows(conn: &Connection, table: TaskTable) -> RepoResult<bool> {
    let exists = conn.query_row(
        &format!("SELECT EXISTS(SELECT 1 FROM {} LIMIT 1);", table.name()),
        [],
        |row| row.get::<_, bool>(0),
    )?;
    Ok(exists)
}

fn select_ids(conn: &Connection, table: TaskTable) -> RepoResult<Vec<RowId>> {
    let mut stmt = conn.prepare(&format!("SELECT id FROM {} ORDER BY id;", table.name()))?;
    let ids = stmt
        .query_map([], |row| row.get::<_, RowId>(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(ids)
}

fn truncate_chars(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}
