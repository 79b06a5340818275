//! Copy the objects of a storage bucket from production to development.

use anyhow::{Context, Result};
use clap::Parser;
use groupix_backend::BackendPair;
use groupix_core::ObjectCopyConfig;
use groupix_sync::ObjectCopier;
use groupix_sync::cli::{CommonArgs, TransferArgs, init_tracing, log_key_claims};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "copy-storage")]
#[command(version, about = "Copy bucket objects from prod to dev", long_about = None)]
struct Args {
    #[command(flatten)]
    common: CommonArgs,

    #[command(flatten)]
    transfer: TransferArgs,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    init_tracing();
    let args = Args::parse();

    let layer = args.common.load_layer()?;
    let config = ObjectCopyConfig::from_layer(&layer, args.transfer.into())?;
    log_key_claims(&config.migration);

    let backends = BackendPair::from_config(&config.migration);
    let copier = ObjectCopier::new(backends.source, backends.target, &config);
    let report = copier.run().await.context("storage copy failed")?;

    if report.has_failures() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
