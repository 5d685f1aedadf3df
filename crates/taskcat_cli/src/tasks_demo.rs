//! Task-store demo: bootstrap the schema, seed it once, run the query battery.
//!
//! Exits non-zero when a read query (or the seed) fails.

use log::info;
use std::error::Error;
use std::io;
use std::process::ExitCode;
use taskcat_core::db::open_db;
use taskcat_core::demo::tasks::run_task_queries;
use taskcat_core::{
    init_logging, seed_db, LogConfig, RelationalConfig, SeedOutcome, SqliteTaskRepository,
};

fn main() -> ExitCode {
    let log_config = LogConfig::default();
    if let Err(err) = init_logging("tasks-demo", log_config.level, &log_config.log_dir) {
        eprintln!("logging disabled: {err}");
    }

    match run(&RelationalConfig::default()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("tasks-demo failed: {err}");
            let mut source = err.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

fn run(config: &RelationalConfig) -> Result<(), Box<dyn Error>> {
    let conn = open_db(&config.db_path)?;

    match seed_db(&conn)? {
        SeedOutcome::Seeded { users, tasks, .. } => {
            println!("Data seeding completed successfully! ({users} users, {tasks} tasks)");
        }
        SeedOutcome::Skipped => println!("Database already populated; skipping seed."),
    }

    let repo = SqliteTaskRepository::new(&conn);
    let stdout = io::stdout();
    run_task_queries(&repo, &mut stdout.lock())?;

    drop(repo);
    conn.close().map_err(|(_, err)| err)?;
    info!("event=db_close module=cli status=ok");
    Ok(())
}
