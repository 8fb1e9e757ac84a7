//! Behavior tree demonstration driver.
//!
//! Each subcommand builds a tree, validates it and ticks it from a fixed
//! interval loop until the root resolves.
//! Run with: `cargo run -p bt-demo -- <scenario>`

mod config;
mod driver;
mod logging;
mod scenarios;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use config::DemoConfig;

/// Reactive behavior tree demos
#[derive(Parser)]
#[command(name = "bt-demo")]
#[command(about = "Behavior tree demonstration scenarios", long_about = None)]
#[command(version)]
struct Cli {
    /// Tick interval in milliseconds (overrides BT_TICK_INTERVAL_MS)
    #[arg(long, global = true)]
    interval_ms: Option<u64>,

    /// Tick budget per run (overrides BT_MAX_TICKS)
    #[arg(long, global = true)]
    max_ticks: Option<u64>,

    /// Directory for the log file (overrides BT_LOG_DIR)
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Startup selector with a sensor check, run healthy then failing
    Basic,

    /// Device boot with I/O running on background tasks
    Async(scenarios::device::DeviceArgs),

    /// Guard AI alternating between patrol, engagement and retreat
    Patrol(scenarios::patrol::PatrolArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let mut config = DemoConfig::from_env();
    if let Some(ms) = cli.interval_ms {
        config.tick_interval = std::time::Duration::from_millis(ms.max(1));
    }
    if let Some(ticks) = cli.max_ticks {
        config.max_ticks = ticks.max(1);
    }
    if let Some(dir) = cli.log_dir {
        config.log_dir = Some(dir);
    }

    let _guard = logging::setup_logging(config.log_dir.as_deref())?;
    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        Command::Basic => scenarios::basic::run(&config).await,
        Command::Async(args) => args.execute(&config).await,
        Command::Patrol(args) => args.execute(&config).await,
    }
}
