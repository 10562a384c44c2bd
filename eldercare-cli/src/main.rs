mod commands;
mod render;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use eldercare_core::Schedule;
use eldercare_core::ScanStrategy;
use eldercare_core::config::EldercareConfig;
use eldercare_core::date_range::DateRange;

#[derive(Parser)]
#[command(name = "eldercare")]
#[command(about = "Check care schedules for overlapping events per elder")]
struct Cli {
    /// Print debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List events that overlap for the same elder
    Conflicts {
        /// Schedule snapshot (defaults to schedule_path from config)
        #[arg(short, long)]
        schedule: Option<PathBuf>,

        /// Check events from this date (YYYY-MM-DD, or "start" for all past events)
        #[arg(long)]
        from: Option<String>,

        /// Check events until this date (YYYY-MM-DD, or "end" for all future events)
        #[arg(long)]
        to: Option<String>,

        /// "adjacent" (neighbouring events only) or "sweep" (every overlap)
        #[arg(long)]
        strategy: Option<ScanStrategy>,

        /// Only show conflicts for this elder id
        #[arg(short, long)]
        elder: Option<String>,

        /// Print conflicts as JSON
        #[arg(long)]
        json: bool,
    },
    /// List events by day
    Events {
        /// Schedule snapshot (defaults to schedule_path from config)
        #[arg(short, long)]
        schedule: Option<PathBuf>,

        /// Show events from this date (YYYY-MM-DD, or "start" for all past events)
        #[arg(long)]
        from: Option<String>,

        /// Show events until this date (YYYY-MM-DD, or "end" for all future events)
        #[arg(long)]
        to: Option<String>,

        /// Only show events for this elder id
        #[arg(short, long)]
        elder: Option<String>,
    },
    /// Show config location and effective settings
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = EldercareConfig::load()?;

    match cli.command {
        Commands::Conflicts {
            schedule,
            from,
            to,
            strategy,
            elder,
            json,
        } => {
            let schedule = load_schedule(&config, schedule.as_deref())?;
            let range = DateRange::from_args(from.as_deref(), to.as_deref(), config.window_days)?;
            let strategy = strategy.unwrap_or(config.strategy);
            commands::conflicts::run(&schedule, &range, strategy, elder.as_deref(), json)
        }
        Commands::Events {
            schedule,
            from,
            to,
            elder,
        } => {
            let schedule = load_schedule(&config, schedule.as_deref())?;
            let range = DateRange::from_args(from.as_deref(), to.as_deref(), config.window_days)?;
            commands::events::run(&schedule, &range, elder.as_deref())
        }
        Commands::Config => commands::config::run(&config),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn load_schedule(config: &EldercareConfig, path: Option<&Path>) -> Result<Schedule> {
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.schedule_path());

    Schedule::load(&path).map_err(|e| {
        anyhow::anyhow!(
            "{}\n\n\
            Point eldercare at an exported schedule with:\n  \
            eldercare conflicts --schedule <file-or-directory>\n\n\
            or set schedule_path in {}",
            e,
            EldercareConfig::config_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "the config file".to_string())
        )
    })
}
