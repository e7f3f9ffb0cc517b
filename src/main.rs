use anyhow::{Context, Result};
use clap::Parser;
use std::time::Instant;
use tracing::info;

use lz_p2p::cli::Args;
use lz_p2p::smoke;

fn main() -> Result<()> {
    // Diagnostics go to stderr; stdout carries the buffer dumps.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("lz_p2p=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    dotenv::dotenv().ok();

    let config = Args::parse().into_config();

    let start = Instant::now();
    let report = smoke::run(&config).with_context(|| {
        format!(
            "P2P smoke test between GPU {} and GPU {} failed",
            config.local_gpu, config.remote_gpu
        )
    })?;
    info!("Smoke test finished in {:.3} seconds", start.elapsed().as_secs_f32());

    if let Some(path) = &config.report_path {
        report.write(path).context("Writing run report")?;
    }

    report.into_result().context("P2P transfer verification failed")?;
    Ok(())
}
