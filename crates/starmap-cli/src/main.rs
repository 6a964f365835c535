use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use starmap_cli::commands::{closest, midpoints, route, session, CommandContext};
use starmap_cli::output::OutputFormat;
use starmap_lib::PlannerConfig;

#[derive(Parser, Debug)]
#[command(author, version, about = "Star-map routing and gateway planning")]
struct Cli {
    /// Override the dataset directory.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Maximum distance for single-origin candidates (overrides STARMAP_MAX_RANGE).
    #[arg(long, global = true)]
    max_range: Option<f64>,

    /// Number of midpoints to keep (overrides STARMAP_MIDPOINT_LIMIT).
    #[arg(long, global = true)]
    midpoint_limit: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the shortest lane route between two systems.
    Route {
        /// Starting system name, natural id, or id.
        #[arg(long = "from")]
        from: String,
        /// Destination system name, natural id, or id.
        #[arg(long = "to")]
        to: String,
    },
    /// List gateway candidates within range of a system.
    Closest {
        /// Origin system name, natural id, or id.
        system: String,
    },
    /// Rank systems that could bridge two origins.
    Midpoints {
        /// First origin.
        a: String,
        /// Second origin.
        b: String,
    },
    /// Read explorer commands from stdin.
    Session,
}

impl Cli {
    fn planner_config(&self) -> Result<PlannerConfig> {
        let mut config = PlannerConfig::from_env();
        if let Some(max_range) = self.max_range {
            config.max_range = max_range;
        }
        if let Some(limit) = self.midpoint_limit {
            config.midpoint_limit = limit;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let context = CommandContext {
        data_dir: cli.data_dir.clone(),
        format: cli.format,
        config: cli.planner_config()?,
    };

    match &cli.command {
        Command::Route { from, to } => route::handle_route_command(&context, from, to),
        Command::Closest { system } => closest::handle_closest_command(&context, system),
        Command::Midpoints { a, b } => midpoints::handle_midpoints_command(&context, a, b),
        Command::Session => session::handle_session_command(&context),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
