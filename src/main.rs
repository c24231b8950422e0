use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use valet::config::RateConfig;
use valet::model::Category;
use valet::notify::NotifyHub;
use valet::report::OutputFormat;
use valet::runner::{self, RunOptions};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // stdout carries the instruction results; logs go to stderr.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let metrics_port: Option<u16> = std::env::var("VALET_METRICS_PORT")
        .ok()
        .and_then(|s| s.parse().ok());
    valet::observability::init(metrics_port)?;

    let path = std::env::args()
        .nth(1)
        .ok_or("usage: valet <instruction file>")?;
    let format: OutputFormat = std::env::var("VALET_OUTPUT")
        .ok()
        .map(|s| s.parse::<OutputFormat>())
        .transpose()?
        .unwrap_or_default();
    let rates = RateConfig::from_env();

    info!("valet starting");
    info!("  instructions: {path}");
    info!("  output: {format:?}");
    info!("  rates: car {}/h, motorcycle {}/h", rates.car, rates.motorcycle);

    let notify = Arc::new(NotifyHub::new());
    for category in Category::ALL {
        let mut rx = notify.subscribe(category);
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(event) => debug!("{category} event: {event:?}"),
                    Err(RecvError::Lagged(n)) => debug!("{category} subscriber lagged by {n}"),
                    Err(RecvError::Closed) => break,
                }
            }
        });
    }

    let options = RunOptions { rates, format };
    let summary = runner::run_file(&path, tokio::io::stdout(), &options, notify).await?;

    info!(
        "valet stopped: {} accepted, {} rejected, {} exited, {} failed",
        summary.accepted, summary.rejected, summary.exited, summary.failed
    );
    Ok(())
}
