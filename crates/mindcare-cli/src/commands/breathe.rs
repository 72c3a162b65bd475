use mindcare_core::breathing::BreathingCycle;
use mindcare_core::{spawn_breathing, BreathingSession, BreathingUpdate};

use crate::common::{log_events, open_app, print_json, CliResult};

/// Run the exercise in the foreground, one JSON line per phase change.
/// Ctrl-C ends it early; only a finished exercise counts as a session.
pub fn run(cycles: Option<u32>) -> CliResult {
    let mut app = open_app()?;
    let session = match cycles {
        Some(n) => BreathingSession::new(BreathingCycle::from(&app.config().breathing), n)?,
        None => app.breathing_session()?,
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let completed = runtime.block_on(drive(session))?;

    let outcome = app.finish_breathing(completed)?;
    print_json(&outcome)?;
    log_events(&mut app);
    Ok(())
}

/// Print updates until the session finishes (`true`) or is interrupted.
async fn drive(session: BreathingSession) -> Result<bool, serde_json::Error> {
    let mut handle = spawn_breathing(session);
    loop {
        tokio::select! {
            update = handle.next() => match update {
                Some(update) => {
                    println!("{}", serde_json::to_string(&update)?);
                    if matches!(update, BreathingUpdate::Finished { .. }) {
                        return Ok(true);
                    }
                }
                None => return Ok(false),
            },
            _ = tokio::signal::ctrl_c() => {
                handle.cancel();
                tracing::info!("breathing cancelled");
                return Ok(false);
            }
        }
    }
}
