use mindcare_core::Activity;

use crate::common::{log_events, open_app, print_json, CliResult};

pub fn run(name: &str, open_browser: bool) -> CliResult {
    let activity: Activity = name.parse()?;
    let mut app = open_app()?;
    let launch = app.launch_activity(activity)?;
    print_json(&launch)?;
    log_events(&mut app);

    if open_browser {
        if let Err(e) = open::that(launch.url) {
            tracing::warn!(url = launch.url, error = %e, "could not open browser");
        }
    }
    Ok(())
}
