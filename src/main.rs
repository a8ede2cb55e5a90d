mod balance_api;
mod config;
mod http;
mod message;
mod notify;
mod report;
mod run;
mod usage_api;

use anyhow::Result;
use clap::Parser;
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "traffic-monitor")]
#[command(about = "Bandwidth usage and balance monitor with push and bot notifications")]
#[command(version)]
struct Cli {
    /// Render the report without contacting the notification sinks
    #[arg(long)]
    dry_run: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.debug);

    let config = Config::from_env()?;
    run::run_check(&config, cli.dry_run);

    Ok(())
}

fn setup_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("traffic_monitor=debug")
    } else {
        EnvFilter::new("traffic_monitor=info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}
