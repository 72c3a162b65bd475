use clap::{Subcommand, ValueEnum};
use mindcare_core::storage::{BreathingConfig, ProfileDefaults};
use mindcare_core::Config;

use crate::common::{print_json, CliResult};

/// Top-level tables of `config.toml`.
#[derive(Clone, Copy, ValueEnum)]
pub enum Section {
    /// Exercise timings and cycle count
    Breathing,
    /// Name, avatar and status shown until the profile is edited
    Profile,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one value
    Get {
        /// Dotted key, e.g. "breathing.hold_secs" or "profile.name"
        key: String,
    },
    /// Change one value; breathing timings that leave nothing to run are refused
    Set {
        /// Dotted key
        key: String,
        value: String,
    },
    /// Print the whole config, or one section
    List {
        #[arg(value_enum)]
        section: Option<Section>,
    },
    /// Restore defaults, for everything or one section
    Reset {
        #[arg(value_enum)]
        section: Option<Section>,
    },
}

pub fn run(action: ConfigAction) -> CliResult {
    let mut config = Config::load()?;

    match action {
        ConfigAction::Get { key } => match config.get(&key) {
            Some(value) => println!("{value}"),
            None => return Err(format!("unknown config key: {key}").into()),
        },
        ConfigAction::Set { key, value } => {
            config.set(&key, &value)?;
            config.save()?;
            tracing::info!(%key, %value, "config updated");
            println!("{key} = {value}");
        }
        ConfigAction::List { section } => print_section(&config, section)?,
        ConfigAction::Reset { section } => {
            match section {
                Some(Section::Breathing) => config.breathing = BreathingConfig::default(),
                Some(Section::Profile) => config.profile = ProfileDefaults::default(),
                None => config = Config::default(),
            }
            config.save()?;
            print_section(&config, section)?;
        }
    }
    Ok(())
}

fn print_section(config: &Config, section: Option<Section>) -> CliResult {
    match section {
        Some(Section::Breathing) => print_json(&config.breathing),
        Some(Section::Profile) => print_json(&config.profile),
        None => print_json(config),
    }
}
