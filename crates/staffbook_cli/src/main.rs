//! Staffbook console entry point.
//!
//! # Responsibility
//! - Start file logging, open the storage session, run the menu loop.
//! - Release the session on every exit path.

mod menu;
mod session;

use log::{error, info};
use session::Session;
use staffbook_core::{
    init_logging, EmployeeService, LogConfig, SqliteEmployeeRepository, StorageHandle,
    StoreConfig,
};
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let log_config = LogConfig::from_env();
    if let Err(err) = init_logging(&log_config.level, &log_config.log_dir) {
        eprintln!("file logging disabled: {err}");
    }

    let store_config = StoreConfig::from_env();
    let mut handle = match StorageHandle::connect(&store_config) {
        Ok(handle) => handle,
        Err(err) => {
            error!("event=startup module=cli status=error error={err}");
            eprintln!(
                "Failed to connect to database `{}`: {err}",
                store_config.db_path.display()
            );
            return ExitCode::FAILURE;
        }
    };

    let outcome = run_console(&handle);

    if let Err(err) = handle.close() {
        eprintln!("Failed to close database: {err}");
    }

    match outcome {
        Ok(()) => {
            info!("event=shutdown module=cli status=ok");
            ExitCode::SUCCESS
        }
        Err(message) => {
            error!("event=shutdown module=cli status=error error={message}");
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run_console(handle: &StorageHandle) -> Result<(), String> {
    let conn = handle
        .connection()
        .map_err(|err| format!("database unavailable: {err}"))?;
    let repo = SqliteEmployeeRepository::try_new(conn)
        .map_err(|err| format!("employee table not ready: {err}"))?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(EmployeeService::new(repo), stdin.lock(), stdout.lock());
    session
        .run()
        .map_err(|err| format!("console I/O failed: {err}"))
}
