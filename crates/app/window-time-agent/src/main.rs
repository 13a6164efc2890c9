mod cli;
mod sink;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use window_time::{ActiveWindowReceiver, ScrapeController};

use crate::{cli::Cli, sink::JsonLinesSink};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // --- Tracing ---
    let default_level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let global_filter = Targets::new()
        .with_default(LevelFilter::WARN)
        .with_target("window_time_agent", default_level)
        .with_target("window_time", default_level)
        .with_target("window_provider", default_level);

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(global_filter)
        .try_init()
        .context("Failed to initialize tracing")?;

    // --- Configuration ---
    let config = cli.resolve_config()?;
    tracing::info!(
        "Sampling every {:?}, scraping every {:?}",
        config.precision,
        config.collection_interval
    );

    // --- Receiver ---
    let mut receiver =
        ActiveWindowReceiver::new(config.clone()).context("Failed to create receiver")?;
    receiver.start().context("Failed to start sampling")?;

    let controller = ScrapeController::new(&config, JsonLinesSink::stdout());
    let cancel = CancellationToken::new();

    tokio::select! {
        _ = controller.run(&receiver, cancel.clone()) => {}
        result = tokio::signal::ctrl_c() => {
            result.context("Failed to listen for Ctrl-C")?;
            tracing::info!("Received Ctrl-C, shutting down");
            cancel.cancel();
        }
    }

    receiver
        .shutdown()
        .await
        .context("Failed to stop sampling")?;

    Ok(())
}
