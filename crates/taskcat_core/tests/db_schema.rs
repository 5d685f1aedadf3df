use rusqlite::Connection;
use taskcat_core::db::migrations::{current_user_version, latest_version};
use taskcat_core::db::{open_db, open_db_in_memory, DbError};

#[test]
fn open_db_in_memory_creates_all_tables() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(current_user_version(&conn).unwrap(), latest_version());
    assert!(table_exists(&conn, "users"));
    assert!(table_exists(&conn, "status"));
    assert!(table_exists(&conn, "tasks"));
}

#[test]
fn open_db_enables_foreign_keys() {
    let conn = open_db_in_memory().unwrap();
    let enabled: i64 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(enabled, 1);
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("taskcat.sqlite3");

    let first = open_db(&path).unwrap();
    first
        .execute(
            "INSERT INTO users (fullname, email) VALUES ('Ada', 'ada@example.com');",
            [],
        )
        .unwrap();
    drop(first);

    let second = open_db(&path).unwrap();
    assert_eq!(current_user_version(&second).unwrap(), latest_version());
    let users: i64 = second
        .query_row("SELECT COUNT(*) FROM users;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(users, 1);
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn failed_schema_creation_is_rolled_back_and_connection_still_returned() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("conflict.sqlite3");

    // A pre-existing `tasks` table without `user_id` breaks the index step.
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("CREATE TABLE tasks (id INTEGER PRIMARY KEY, title TEXT);")
        .unwrap();
    drop(conn);

    let conn = open_db(&path).unwrap();
    assert_eq!(current_user_version(&conn).unwrap(), 0);
    assert!(!table_exists(&conn, "users"));
    assert!(!table_exists(&conn, "status"));
    assert!(table_exists(&conn, "tasks"));
}

fn table_exists(conn: &Connection, table_name: &str) -> bool {
    conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table_name],
        |row| row.get(0),
    )
    .unwrap()
}
