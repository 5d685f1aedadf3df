//! Fourteen-step task-store query battery.

use super::{print_rows, DemoResult};
use crate::model::task::{NewTask, RowId, TaskStatus};
use crate::repo::task_repo::{RepoResult, TaskRepository};
use log::{debug, info};
use std::fmt::Display;
use std::io::{self, Write};

pub const DEMO_USER_ID: RowId = 1;
pub const DEMO_UPDATED_TASK_ID: RowId = 1;
pub const DEMO_DELETED_TASK_ID: RowId = 2;
pub const DEMO_EMAIL_DOMAIN: &str = "example.com";
pub const DEMO_NEW_USER_NAME: &str = "John Doe";

/// Runs the full battery against `repo`, printing to `out`.
///
/// Write failures are printed and the battery moves on. The first failing
/// read aborts and is returned.
pub fn run_task_queries<R: TaskRepository>(repo: &R, out: &mut impl Write) -> DemoResult<()> {
    info!("event=demo_run module=demo status=start battery=tasks");

    writeln!(out, "1. Getting tasks by user...")?;
    print_rows(out, "Tasks by user", &repo.get_tasks_by_user(DEMO_USER_ID)?)?;

    writeln!(out, "2. Getting tasks by status...")?;
    print_rows(
        out,
        "Tasks by status",
        &repo.get_tasks_by_status(TaskStatus::Todo)?,
    )?;

    writeln!(out, "3. Updating task status...")?;
    report_write(
        out,
        "update_task_status",
        repo.update_task_status(DEMO_UPDATED_TASK_ID, TaskStatus::Completed),
        "Rows updated",
    )?;

    writeln!(out, "4. Getting users without tasks...")?;
    print_rows(out, "Users without tasks", &repo.get_users_without_tasks()?)?;

    writeln!(out, "5. Adding a new task...")?;
    let new_task = NewTask::new("New Task", 1, DEMO_USER_ID).with_description("Description here");
    report_write(out, "add_task", repo.add_task(&new_task), "New task id")?;

    writeln!(out, "6. Getting incomplete tasks...")?;
    print_rows(out, "Incomplete tasks", &repo.get_incomplete_tasks()?)?;

    writeln!(out, "7. Deleting a task...")?;
    report_write(
        out,
        "delete_task",
        repo.delete_task(DEMO_DELETED_TASK_ID),
        "Rows deleted",
    )?;

    writeln!(out, "8. Finding users by email...")?;
    print_rows(
        out,
        "Users by email",
        &repo.find_users_by_email(DEMO_EMAIL_DOMAIN)?,
    )?;

    writeln!(out, "9. Updating user name...")?;
    report_write(
        out,
        "update_user_name",
        repo.update_user_name(DEMO_USER_ID, DEMO_NEW_USER_NAME),
        "Rows updated",
    )?;

    writeln!(out, "10. Counting tasks by status...")?;
    print_rows(out, "Task counts by status", &repo.count_tasks_by_status()?)?;

    writeln!(out, "11. Getting tasks by email domain...")?;
    print_rows(
        out,
        "Tasks by email domain",
        &repo.get_tasks_by_email_domain(DEMO_EMAIL_DOMAIN)?,
    )?;

    writeln!(out, "12. Getting tasks without description...")?;
    print_rows(
        out,
        "Tasks without description",
        &repo.get_tasks_without_description()?,
    )?;

    writeln!(out, "13. Getting users and tasks by status 'InProgress'...")?;
    print_rows(
        out,
        "Users and tasks by status",
        &repo.get_users_and_tasks(TaskStatus::InProgress)?,
    )?;

    writeln!(out, "14. Getting users with task counts...")?;
    print_rows(
        out,
        "Users with task counts",
        &repo.get_users_with_task_counts()?,
    )?;

    info!("event=demo_run module=demo status=ok battery=tasks");
    Ok(())
}

fn report_write<T: Display>(
    out: &mut impl Write,
    action: &str,
    result: RepoResult<T>,
    success_label: &str,
) -> io::Result<()> {
    match result {
        Ok(value) => writeln!(out, "{success_label}: {value}"),
        Err(err) => {
            debug!("event=demo_step module=demo status=error action={action} error={err}");
            writeln!(out, "Database error: {err}")
        }
    }
}
