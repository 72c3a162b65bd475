use mindcare_core::Mood;

use crate::common::{log_events, open_app, print_json, CliResult};

pub fn run(label: &str) -> CliResult {
    let mood: Mood = label.parse()?;
    let mut app = open_app()?;
    let logged = app.log_mood(mood)?;
    print_json(&logged)?;
    log_events(&mut app);
    Ok(())
}
