//! Shared helpers for CLI commands.

use std::sync::Arc;

use mindcare_core::{App, Config, Database, SystemClock};
use serde::Serialize;

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Open the app against the on-disk database with the host clock.
pub fn open_app() -> Result<App<Database>, Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let db = Database::open()?;
    Ok(App::open(db, Arc::new(SystemClock), config)?)
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Log drained events; stdout is reserved for command output.
pub fn log_events(app: &mut App<Database>) {
    for event in app.take_events() {
        match serde_json::to_string(&event) {
            Ok(json) => tracing::info!(target: "mindcare::events", "{json}"),
            Err(e) => tracing::warn!(error = %e, "could not encode event"),
        }
    }
}
