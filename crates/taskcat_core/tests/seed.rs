use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use taskcat_core::db::open_db_in_memory;
use taskcat_core::seed::{SEED_TASK_COUNT, SEED_USER_COUNT};
use taskcat_core::{
    seed_db, seed_db_with_rng, SeedOutcome, SqliteTaskRepository, TaskRepository, TaskStatus,
    TaskTable,
};

fn row_counts(repo: &SqliteTaskRepository<'_>) -> Vec<i64> {
    TaskTable::ALL
        .iter()
        .map(|table| repo.count_rows(*table).unwrap())
        .collect()
}

#[test]
fn seeding_empty_store_inserts_fixed_counts() {
    let conn = open_db_in_memory().unwrap();
    let outcome = seed_db_with_rng(&conn, &mut StdRng::seed_from_u64(7)).unwrap();

    assert_eq!(
        outcome,
        SeedOutcome::Seeded {
            users: SEED_USER_COUNT,
            statuses: 3,
            tasks: SEED_TASK_COUNT,
        }
    );
    let repo = SqliteTaskRepository::new(&conn);
    assert_eq!(row_counts(&repo), vec![10, 3, 30]);
}

#[test]
fn seeding_twice_leaves_row_counts_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    seed_db(&conn).unwrap();
    let before = row_counts(&repo);

    assert_eq!(seed_db(&conn).unwrap(), SeedOutcome::Skipped);
    assert_eq!(row_counts(&repo), before);
}

#[test]
fn seeding_is_skipped_when_any_table_has_rows() {
    let conn = open_db_in_memory().unwrap();
    conn.execute("INSERT INTO status (name) VALUES ('Todo');", [])
        .unwrap();

    assert_eq!(seed_db(&conn).unwrap(), SeedOutcome::Skipped);
    let repo = SqliteTaskRepository::new(&conn);
    assert_eq!(row_counts(&repo), vec![0, 1, 0]);
}

#[test]
fn seeded_rows_respect_references_and_field_limits() {
    let conn = open_db_in_memory().unwrap();
    seed_db_with_rng(&conn, &mut StdRng::seed_from_u64(11)).unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let statuses: Vec<TaskStatus> = repo
        .list_statuses()
        .unwrap()
        .iter()
        .map(|status| status.name)
        .collect();
    assert_eq!(statuses, TaskStatus::ALL.to_vec());

    let user_ids: HashSet<i64> = repo.list_users().unwrap().iter().map(|u| u.id).collect();
    let status_ids: HashSet<i64> = repo.list_statuses().unwrap().iter().map(|s| s.id).collect();
    for task in repo.list_tasks().unwrap() {
        assert!(user_ids.contains(&task.user_id));
        assert!(status_ids.contains(&task.status_id));
        assert!(!task.title.is_empty());
        let description = task.description.unwrap_or_default();
        assert!(description.chars().count() <= 200);
    }
    for user in repo.list_users().unwrap() {
        assert!(user.email.contains('@'));
        assert!(!user.fullname.is_empty());
    }
}

#[test]
fn seeded_store_satisfies_aggregate_properties() {
    let conn = open_db_in_memory().unwrap();
    seed_db_with_rng(&conn, &mut StdRng::seed_from_u64(23)).unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let total: i64 = repo
        .count_tasks_by_status()
        .unwrap()
        .iter()
        .map(|row| row.count)
        .sum();
    assert_eq!(total, SEED_TASK_COUNT as i64);

    let owners: HashSet<i64> = repo.list_tasks().unwrap().iter().map(|t| t.user_id).collect();
    let expected: HashSet<i64> = repo
        .list_users()
        .unwrap()
        .iter()
        .map(|u| u.id)
        .filter(|id| !owners.contains(id))
        .collect();
    let actual: HashSet<i64> = repo
        .get_users_without_tasks()
        .unwrap()
        .iter()
        .map(|u| u.id)
        .collect();
    assert_eq!(actual, expected);

    let per_user: i64 = repo
        .get_users_with_task_counts()
        .unwrap()
        .iter()
        .map(|row| row.task_count)
        .sum();
    assert_eq!(per_user, SEED_TASK_COUNT as i64);
}
