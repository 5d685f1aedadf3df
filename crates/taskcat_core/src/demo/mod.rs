//! Sequential demo batteries for the task store and the cats collection.
//!
//! # Responsibility
//! - Run each fixed operation list in order and print every result.
//! - Apply the continue/abort policy: write and document failures are
//!   printed and skipped, task-store read failures abort the battery.

use crate::repo::task_repo::RepoError;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::io::{self, Write};

pub mod cats;
pub mod tasks;

pub type DemoResult<T> = Result<T, DemoError>;

#[derive(Debug)]
pub enum DemoError {
    /// A read query failed; the battery stops here.
    Repo(RepoError),
    Io(io::Error),
}

impl Display for DemoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "query failed: {err}"),
            Self::Io(err) => write!(f, "failed to write demo output: {err}"),
        }
    }
}

impl Error for DemoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<RepoError> for DemoError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<io::Error> for DemoError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

fn print_rows<T: Debug>(out: &mut impl Write, label: &str, rows: &[T]) -> io::Result<()> {
    writeln!(out, "{label}: {} row(s)", rows.len())?;
    for row in rows {
        writeln!(out, "  {row:?}")?;
    }
    Ok(())
}
