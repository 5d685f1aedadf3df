//! Cats-collection demo: connect, then create/read/update/delete one cat.
//!
//! Connection failures are reported and the process still exits 0.

use log::info;
use std::io;
use std::process::ExitCode;
use taskcat_core::demo::cats::run_cat_operations;
use taskcat_core::{
    connect_document_store, init_logging, DemoResult, DocumentStoreConfig, LogConfig,
    MongoCatRepository,
};

fn main() -> ExitCode {
    let log_config = LogConfig::default();
    if let Err(err) = init_logging("cats-demo", log_config.level, &log_config.log_dir) {
        eprintln!("logging disabled: {err}");
    }

    match run(&DocumentStoreConfig::default()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("cats-demo failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &DocumentStoreConfig) -> DemoResult<()> {
    let result = match connect_document_store(config) {
        Ok(client) => {
            let repo = MongoCatRepository::from_client(&client, config);
            run_cat_operations(&repo, &mut io::stdout().lock())
        }
        Err(err) => {
            println!("MongoDB connection error: {err}");
            Ok(())
        }
    };

    // The client (if any) was dropped with the match arm above.
    info!("event=doc_close module=cli status=ok");
    println!("MongoDB connection closed.");
    result
}
