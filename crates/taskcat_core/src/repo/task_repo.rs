//! Task-store repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide the fixed battery of task/user/status queries and mutations.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Every operation issues exactly one parameterized statement.
//! - Write paths run in a transaction: commit on success, rollback and log
//!   on failure, then return the error to the caller.
//! - Read paths never mask database errors.

use crate::db::DbError;
use crate::model::task::{
    NewTask, RowId, Status, StatusCount, Task, TaskStatus, User, UserTaskCount, UserTaskRow,
};
use log::{debug, error};
use rusqlite::{params, Connection, Params, Row, Transaction};
use std::error::Error;
use std::fmt::{Display, Formatter};

const TASK_COLUMNS: &str = "tasks.id, tasks.title, tasks.description, tasks.status_id, tasks.user_id";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for task-store queries and mutations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted task data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Tables owned by the task store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskTable {
    Users,
    Status,
    Tasks,
}

impl TaskTable {
    pub const ALL: [TaskTable; 3] = [TaskTable::Users, TaskTable::Status, TaskTable::Tasks];

    pub fn name(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Status => "status",
            Self::Tasks => "tasks",
        }
    }
}

/// Repository interface for the task-store query battery.
pub trait TaskRepository {
    fn get_tasks_by_user(&self, user_id: RowId) -> RepoResult<Vec<Task>>;
    fn get_tasks_by_status(&self, status: TaskStatus) -> RepoResult<Vec<Task>>;
    /// Returns the number of updated rows (0 when `task_id` does not exist).
    fn update_task_status(&self, task_id: RowId, status: TaskStatus) -> RepoResult<usize>;
    fn get_users_without_tasks(&self) -> RepoResult<Vec<User>>;
    /// Returns the id of the inserted row.
    fn add_task(&self, task: &NewTask) -> RepoResult<RowId>;
    fn get_incomplete_tasks(&self) -> RepoResult<Vec<Task>>;
    fn delete_task(&self, task_id: RowId) -> RepoResult<usize>;
    fn find_users_by_email(&self, email_domain: &str) -> RepoResult<Vec<User>>;
    fn update_user_name(&self, user_id: RowId, fullname: &str) -> RepoResult<usize>;
    fn count_tasks_by_status(&self) -> RepoResult<Vec<StatusCount>>;
    fn get_tasks_by_email_domain(&self, email_domain: &str) -> RepoResult<Vec<Task>>;
    fn get_tasks_without_description(&self) -> RepoResult<Vec<Task>>;
    fn get_users_and_tasks(&self, status: TaskStatus) -> RepoResult<Vec<UserTaskRow>>;
    fn get_users_with_task_counts(&self) -> RepoResult<Vec<UserTaskCount>>;

    fn get_task(&self, task_id: RowId) -> RepoResult<Option<Task>>;
    fn list_users(&self) -> RepoResult<Vec<User>>;
    fn list_tasks(&self) -> RepoResult<Vec<Task>>;
    fn list_statuses(&self) -> RepoResult<Vec<Status>>;
    fn count_rows(&self, table: TaskTable) -> RepoResult<i64>;
}

/// SQLite-backed task repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_rows<T, P: Params>(
        &self,
        sql: &str,
        params: P,
        parse: fn(&Row<'_>) -> RepoResult<T>,
    ) -> RepoResult<Vec<T>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut items = Vec::new();

        while let Some(row) = rows.next()? {
            items.push(parse(row)?);
        }

        Ok(items)
    }

    fn in_transaction<T>(
        &self,
        action: &'static str,
        op: impl FnOnce(&Transaction<'_>) -> rusqlite::Result<T>,
    ) -> RepoResult<T> {
        let tx = self.conn.unchecked_transaction()?;
        match op(&tx) {
            Ok(value) => {
                tx.commit()?;
                debug!("event=task_action module=repo status=ok action={action}");
                Ok(value)
            }
            Err(err) => {
                error!(
                    "event=task_action module=repo status=error action={action} error_code=rolled_back error={err}"
                );
                if let Err(rollback_err) = tx.rollback() {
                    error!(
                        "event=task_action module=repo status=error action={action} error_code=rollback_failed error={rollback_err}"
                    );
                }
                Err(err.into())
            }
        }
    }

    fn execute_action<P: Params>(
        &self,
        action: &'static str,
        sql: &str,
        params: P,
    ) -> RepoResult<usize> {
        self.in_transaction(action, |tx| tx.execute(sql, params))
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn get_tasks_by_user(&self, user_id: RowId) -> RepoResult<Vec<Task>> {
        self.query_rows(
            &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE user_id = ?1 ORDER BY tasks.id;"),
            [user_id],
            parse_task_row,
        )
    }

    fn get_tasks_by_status(&self, status: TaskStatus) -> RepoResult<Vec<Task>> {
        self.query_rows(
            &format!(
                "SELECT {TASK_COLUMNS} FROM tasks
                 WHERE status_id = (SELECT id FROM status WHERE name = ?1)
                 ORDER BY tasks.id;"
            ),
            [status.as_str()],
            parse_task_row,
        )
    }

    fn update_task_status(&self, task_id: RowId, status: TaskStatus) -> RepoResult<usize> {
        self.execute_action(
            "update_task_status",
            "UPDATE tasks
             SET status_id = (SELECT id FROM status WHERE name = ?1)
             WHERE id = ?2;",
            params![status.as_str(), task_id],
        )
    }

    fn get_users_without_tasks(&self) -> RepoResult<Vec<User>> {
        self.query_rows(
            "SELECT id, fullname, email FROM users
             WHERE id NOT IN (SELECT DISTINCT user_id FROM tasks)
             ORDER BY id;",
            [],
            parse_user_row,
        )
    }

    fn add_task(&self, task: &NewTask) -> RepoResult<RowId> {
        self.in_transaction("add_task", |tx| {
            tx.execute(
                "INSERT INTO tasks (title, description, status_id, user_id)
                 VALUES (?1, ?2, ?3, ?4);",
                params![
                    task.title.as_str(),
                    task.description.as_deref(),
                    task.status_id,
                    task.user_id,
                ],
            )?;
            Ok(tx.last_insert_rowid())
        })
    }

    fn get_incomplete_tasks(&self) -> RepoResult<Vec<Task>> {
        self.query_rows(
            &format!(
                "SELECT {TASK_COLUMNS} FROM tasks
                 WHERE status_id != (SELECT id FROM status WHERE name = ?1)
                 ORDER BY tasks.id;"
            ),
            [TaskStatus::Completed.as_str()],
            parse_task_row,
        )
    }

    fn delete_task(&self, task_id: RowId) -> RepoResult<usize> {
        self.execute_action("delete_task", "DELETE FROM tasks WHERE id = ?1;", [task_id])
    }

    fn find_users_by_email(&self, email_domain: &str) -> RepoResult<Vec<User>> {
        self.query_rows(
            "SELECT id, fullname, email FROM users WHERE email LIKE ?1 ORDER BY id;",
            [domain_pattern(email_domain)],
            parse_user_row,
        )
    }

    fn update_user_name(&self, user_id: RowId, fullname: &str) -> RepoResult<usize> {
        self.execute_action(
            "update_user_name",
            "UPDATE users SET fullname = ?1 WHERE id = ?2;",
            params![fullname, user_id],
        )
    }

    fn count_tasks_by_status(&self) -> RepoResult<Vec<StatusCount>> {
        self.query_rows(
            "SELECT status.name AS name, COUNT(*) AS task_count
             FROM tasks
             JOIN status ON tasks.status_id = status.id
             GROUP BY status.name
             ORDER BY status.name;",
            [],
            |row| {
                Ok(StatusCount {
                    status: parse_status_label(row.get("name")?)?,
                    count: row.get("task_count")?,
                })
            },
        )
    }

    fn get_tasks_by_email_domain(&self, email_domain: &str) -> RepoResult<Vec<Task>> {
        self.query_rows(
            &format!(
                "SELECT {TASK_COLUMNS} FROM tasks
                 JOIN users ON tasks.user_id = users.id
                 WHERE users.email LIKE ?1
                 ORDER BY tasks.id;"
            ),
            [domain_pattern(email_domain)],
            parse_task_row,
        )
    }

    fn get_tasks_without_description(&self) -> RepoResult<Vec<Task>> {
        self.query_rows(
            &format!(
                "SELECT {TASK_COLUMNS} FROM tasks
                 WHERE description IS NULL OR description = ''
                 ORDER BY tasks.id;"
            ),
            [],
            parse_task_row,
        )
    }

    fn get_users_and_tasks(&self, status: TaskStatus) -> RepoResult<Vec<UserTaskRow>> {
        self.query_rows(
            &format!(
                "SELECT users.id AS owner_id, users.fullname, users.email,
                        {TASK_COLUMNS}, status.name AS status_name
                 FROM users
                 INNER JOIN tasks ON users.id = tasks.user_id
                 INNER JOIN status ON tasks.status_id = status.id
                 WHERE status.name = ?1
                 ORDER BY users.id, tasks.id;"
            ),
            [status.as_str()],
            |row| {
                Ok(UserTaskRow {
                    user: User {
                        id: row.get("owner_id")?,
                        fullname: row.get("fullname")?,
                        email: row.get("email")?,
                    },
                    task: parse_task_row(row)?,
                    status: parse_status_label(row.get("status_name")?)?,
                })
            },
        )
    }

    fn get_users_with_task_counts(&self) -> RepoResult<Vec<UserTaskCount>> {
        self.query_rows(
            "SELECT users.id AS user_id, users.fullname AS fullname, COUNT(tasks.id) AS task_count
             FROM users
             LEFT JOIN tasks ON users.id = tasks.user_id
             GROUP BY users.id, users.fullname
             ORDER BY users.id;",
            [],
            |row| {
                Ok(UserTaskCount {
                    user_id: row.get("user_id")?,
                    fullname: row.get("fullname")?,
                    task_count: row.get("task_count")?,
                })
            },
        )
    }

    fn get_task(&self, task_id: RowId) -> RepoResult<Option<Task>> {
        let mut tasks = self.query_rows(
            &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1;"),
            [task_id],
            parse_task_row,
        )?;
        Ok(tasks.pop())
    }

    fn list_users(&self) -> RepoResult<Vec<User>> {
        self.query_rows(
            "SELECT id, fullname, email FROM users ORDER BY id;",
            [],
            parse_user_row,
        )
    }

    fn list_tasks(&self) -> RepoResult<Vec<Task>> {
        self.query_rows(
            &format!("SELECT {TASK_COLUMNS} FROM tasks ORDER BY tasks.id;"),
            [],
            parse_task_row,
        )
    }

    fn list_statuses(&self) -> RepoResult<Vec<Status>> {
        self.query_rows(
            "SELECT id, name FROM status ORDER BY id;",
            [],
            |row| {
                Ok(Status {
                    id: row.get("id")?,
                    name: parse_status_label(row.get("name")?)?,
                })
            },
        )
    }

    fn count_rows(&self, table: TaskTable) -> RepoResult<i64> {
        let count = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {};", table.name()),
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    Ok(Task {
        id: row.get("id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        status_id: row.get("status_id")?,
        user_id: row.get("user_id")?,
    })
}

fn parse_user_row(row: &Row<'_>) -> RepoResult<User> {
    Ok(User {
        id: row.get("id")?,
        fullname: row.get("fullname")?,
        email: row.get("email")?,
    })
}

fn parse_status_label(value: String) -> RepoResult<TaskStatus> {
    TaskStatus::parse(&value)
        .ok_or_else(|| RepoError::InvalidData(format!("invalid status `{value}` in status.name")))
}

fn domain_pattern(email_domain: &str) -> String {
    format!("%@{email_domain}")
}
