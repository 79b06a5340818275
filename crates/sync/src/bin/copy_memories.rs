//! Copy the most recent `memories` rows from production to development.

use anyhow::{Context, Result};
use clap::Parser;
use groupix_backend::BackendPair;
use groupix_core::{RowCopyConfig, TunableOverrides};
use groupix_sync::RowCopier;
use groupix_sync::cli::{CommonArgs, init_tracing};

#[derive(Parser, Debug)]
#[command(name = "copy-memories")]
#[command(version, about = "Copy recent memories rows from prod to dev", long_about = None)]
struct Args {
    #[command(flatten)]
    common: CommonArgs,

    /// Maximum rows to copy (overrides MEMORIES_LIMIT)
    #[arg(long)]
    limit: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let layer = args.common.load_layer()?;
    let overrides = TunableOverrides {
        limit: args.limit,
        ..Default::default()
    };
    let config = RowCopyConfig::from_layer(&layer, overrides)?;

    let backends = BackendPair::from_config(&config.migration);
    let copier = RowCopier::memories(backends.source, backends.target, &config);
    copier.run().await.context("memories copy failed")?;

    Ok(())
}
