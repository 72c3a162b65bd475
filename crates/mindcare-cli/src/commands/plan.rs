use clap::Subcommand;

use crate::common::{log_events, open_app, print_json, CliResult};

#[derive(Subcommand)]
pub enum PlanAction {
    /// Show one day (defaults to today)
    Show {
        day: Option<String>,
    },
    /// Show the whole week
    Week,
    /// Mark a task done
    Check {
        day: String,
        /// Task position, starting at 0
        index: usize,
    },
    /// Mark a task not done
    Uncheck {
        day: String,
        index: usize,
    },
}

pub fn run(action: PlanAction) -> CliResult {
    let mut app = open_app()?;

    match action {
        PlanAction::Show { day } => {
            let day = day.unwrap_or_else(|| app.todays_day().to_string());
            let view = app.day_view(&day)?;
            print_json(&view)?;
        }
        PlanAction::Week => {
            print_json(&app.week_view()?)?;
        }
        PlanAction::Check { day, index } => {
            let update = app.set_task_status(&day, index, true)?;
            print_json(&update)?;
        }
        PlanAction::Uncheck { day, index } => {
            let update = app.set_task_status(&day, index, false)?;
            print_json(&update)?;
        }
    }

    log_events(&mut app);
    Ok(())
}
