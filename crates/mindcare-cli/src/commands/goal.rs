use clap::Subcommand;

use crate::common::{log_events, open_app, print_json, CliResult};

#[derive(Subcommand)]
pub enum GoalAction {
    /// Add a goal
    Add {
        text: String,
    },
    /// Flip a goal between done and not done
    Toggle {
        id: i64,
    },
    /// List goals
    List,
}

pub fn run(action: GoalAction) -> CliResult {
    let mut app = open_app()?;

    match action {
        GoalAction::Add { text } => {
            let goal = app.add_goal(&text)?;
            print_json(&goal)?;
        }
        GoalAction::Toggle { id } => match app.toggle_goal(id)? {
            Some(goal) => print_json(&goal)?,
            None => {
                tracing::warn!(id, "no goal with that id");
                print_json(&serde_json::Value::Null)?;
            }
        },
        GoalAction::List => {
            print_json(app.goals())?;
        }
    }

    log_events(&mut app);
    Ok(())
}
