use clap::Subcommand;
use mindcare_core::{ProfileField, Theme};

use crate::common::{log_events, open_app, print_json, CliResult};

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Print the profile
    Show,
    /// Set avatar, name or status
    Set {
        field: String,
        value: String,
    },
}

#[derive(Subcommand)]
pub enum ThemeAction {
    /// Print the theme (dark or light)
    Get,
    /// Set the theme
    Set {
        theme: String,
    },
}

pub fn run(action: ProfileAction) -> CliResult {
    let mut app = open_app()?;

    match action {
        ProfileAction::Show => {
            print_json(app.profile())?;
        }
        ProfileAction::Set { field, value } => {
            let field: ProfileField = field.parse()?;
            let profile = app.set_profile_field(field, &value)?;
            print_json(profile)?;
        }
    }

    log_events(&mut app);
    Ok(())
}

pub fn run_theme(action: ThemeAction) -> CliResult {
    let mut app = open_app()?;

    match action {
        ThemeAction::Get => {
            println!("{}", app.theme()?);
        }
        ThemeAction::Set { theme } => {
            let theme: Theme = theme.parse()?;
            app.set_theme(theme)?;
            println!("{theme}");
        }
    }

    log_events(&mut app);
    Ok(())
}
