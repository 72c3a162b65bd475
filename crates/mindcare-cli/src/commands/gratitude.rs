use clap::Subcommand;

use crate::common::{log_events, open_app, print_json, CliResult};

#[derive(Subcommand)]
pub enum GratitudeAction {
    /// Save three things you are grateful for
    Save {
        #[arg(num_args = 1..=3, required = true)]
        items: Vec<String>,
    },
    /// List saved entries, newest first
    List {
        /// Show at most this many entries
        #[arg(long)]
        limit: Option<usize>,
    },
}

pub fn run(action: GratitudeAction) -> CliResult {
    let mut app = open_app()?;

    match action {
        GratitudeAction::Save { items } => {
            let saved = app.save_gratitude(&items)?;
            print_json(&saved)?;
        }
        GratitudeAction::List { limit } => {
            let mut history = app.gratitude_history()?;
            if let Some(limit) = limit {
                history.truncate(limit);
            }
            print_json(&history)?;
        }
    }

    log_events(&mut app);
    Ok(())
}
