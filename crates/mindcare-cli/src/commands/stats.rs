use crate::common::{log_events, open_app, print_json, CliResult};

pub fn dashboard() -> CliResult {
    let mut app = open_app()?;
    let dashboard = app.dashboard()?;
    print_json(&dashboard)?;
    log_events(&mut app);
    Ok(())
}

pub fn stats() -> CliResult {
    let mut app = open_app()?;
    let ledger = app.ledger()?;
    print_json(&ledger)?;
    log_events(&mut app);
    Ok(())
}
