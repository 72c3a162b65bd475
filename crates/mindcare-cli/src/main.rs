use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod common;

#[derive(Parser)]
#[command(name = "mindcare-cli", version, about = "MindCare wellness tracker CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Greeting, streak, mood and today's plan
    Dashboard,
    /// Streak and session counts
    Stats,
    /// Log how you feel (great, good, okay, not-good, terrible)
    Mood {
        mood: String,
    },
    /// Weekly plan and task check-off
    Plan {
        #[command(subcommand)]
        action: commands::plan::PlanAction,
    },
    /// Gratitude journal
    Gratitude {
        #[command(subcommand)]
        action: commands::gratitude::GratitudeAction,
    },
    /// Wellness goals
    Goal {
        #[command(subcommand)]
        action: commands::goal::GoalAction,
    },
    /// Profile fields
    Profile {
        #[command(subcommand)]
        action: commands::profile::ProfileAction,
    },
    /// Light or dark theme
    Theme {
        #[command(subcommand)]
        action: commands::profile::ThemeAction,
    },
    /// Launch a guided activity (pmr, music, meditation, grounding)
    Activity {
        name: String,
        /// Also open the resource in the default browser
        #[arg(long)]
        open: bool,
    },
    /// Run the guided breathing exercise
    Breathe {
        /// Number of cycles (defaults to breathing.cycles from config)
        #[arg(long)]
        cycles: Option<u32>,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("MINDCARE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Dashboard => commands::stats::dashboard(),
        Commands::Stats => commands::stats::stats(),
        Commands::Mood { mood } => commands::mood::run(&mood),
        Commands::Plan { action } => commands::plan::run(action),
        Commands::Gratitude { action } => commands::gratitude::run(action),
        Commands::Goal { action } => commands::goal::run(action),
        Commands::Profile { action } => commands::profile::run(action),
        Commands::Theme { action } => commands::profile::run_theme(action),
        Commands::Activity { name, open } => commands::activity::run(&name, open),
        Commands::Breathe { cycles } => commands::breathe::run(cycles),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
