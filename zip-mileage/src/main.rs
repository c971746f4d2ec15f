use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use zip_mileage::config::Cli;
use zip_mileage::pipeline;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "zip_mileage=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let report = pipeline::start(&cli)
        .await
        .context("could not start run")?;

    if let Some(e) = &report.ingest_error {
        bail!("input was not fully read: {e}");
    }
    if let Err(e) = &report.export {
        bail!("output was not written: {e}");
    }

    tracing::info!(
        rows = report.rows,
        groups = report.groups,
        resolved = report.resolve.resolved,
        failed = report.resolve.failed,
        "done"
    );
    Ok(())
}
