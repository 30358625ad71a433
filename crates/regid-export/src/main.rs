#![doc = include_str!("../README.md")]

mod config;
mod telemetry;

use anyhow::Context;
use clap::Parser;
use config::{CliArgs, ExportConfig};
use regid::{CodeAssigner, DocumentStore, HttpDirectory, OverrideTable, Pipeline, TokioSleep};
use telemetry::init_telemetry;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = ExportConfig::try_from(args)?;

    init_telemetry()?;
    log_startup_info(&config);

    let directory = HttpDirectory::new(&config.base_url, config.credential.clone(), config.timeout)
        .context("failed to set up directory client")?;
    let pipeline = Pipeline::<_, TokioSleep>::new(
        directory,
        DocumentStore::new(&config.out_dir),
        CodeAssigner::new(OverrideTable::builtin()),
    )
    .with_delay(config.delay);

    let report = pipeline.run().await.context("export aborted")?;

    // Each skipped region was already logged by the pipeline as it failed.
    if !report.is_complete() {
        let skipped: Vec<_> = report
            .failures
            .iter()
            .map(|failure| failure.region.identifier.as_str())
            .collect();
        tracing::warn!(
            "index lists {} region(s) without a document: {}",
            skipped.len(),
            skipped.join(", ")
        );
    }
    tracing::info!(
        regions = report.regions.len(),
        written = report.written.len(),
        skipped = report.failures.len(),
        index = %report.index_path.display(),
        "export finished"
    );
    Ok(())
}

fn log_startup_info(config: &ExportConfig) {
    if cfg!(debug_assertions) {
        tracing::info!("Starting export with full config: {:#?}", config);
    } else {
        tracing::info!(
            "Starting export from {} into {}",
            config.base_url,
            config.out_dir.display()
        );
    }
}
