//! Shared command-line plumbing for the copy binaries.

use clap::Args;
use groupix_core::{
    ConfigResult, DEFAULT_ENV_FILE, EnvLayer, MigrationConfig, TunableOverrides, load_env_file,
};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Options common to both copy jobs.
#[derive(Args, Clone, Debug)]
pub struct CommonArgs {
    /// Env file with KEY=VALUE overrides (missing file is ignored)
    #[arg(long, default_value = DEFAULT_ENV_FILE)]
    pub env_file: PathBuf,
}

impl CommonArgs {
    /// Build the config layer: process environment overlaid with the env file.
    pub fn load_layer(&self) -> ConfigResult<EnvLayer> {
        let file = load_env_file(&self.env_file)?;
        match &file {
            Some(file) => tracing::debug!(
                path = %self.env_file.display(),
                keys = file.len(),
                "Loaded env file"
            ),
            None => tracing::debug!(path = %self.env_file.display(), "No env file found"),
        }
        EnvLayer::from_process(file.as_ref())
    }
}

/// Tunable overrides for `copy-storage`.
#[derive(Args, Clone, Copy, Debug, Default)]
pub struct TransferArgs {
    /// Maximum objects to copy (overrides COPY_LIMIT)
    #[arg(long)]
    pub limit: Option<usize>,

    /// Maximum transfers in flight (overrides COPY_CONCURRENCY)
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Successful transfers between progress lines (overrides COPY_LOG_EVERY)
    #[arg(long)]
    pub log_every: Option<usize>,
}

impl From<TransferArgs> for TunableOverrides {
    fn from(args: TransferArgs) -> Self {
        Self {
            limit: args.limit,
            concurrency: args.concurrency,
            log_every: args.log_every,
        }
    }
}

/// Initialize logging. `RUST_LOG` overrides the default `info` filter.
///
/// Errors go to stderr, everything else to stdout.
pub fn init_tracing() {
    let writer = std::io::stderr
        .with_max_level(Level::ERROR)
        .or_else(std::io::stdout);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(writer),
        )
        .init();
}

/// Log the project ref and role encoded in each service key, so a swapped or
/// anon key is visible before any data moves.
pub fn log_key_claims(config: &MigrationConfig) {
    for (label, project) in [("Prod", &config.source), ("Dev ", &config.target)] {
        let claims = project.service_key.claims().unwrap_or_default();
        tracing::info!(
            "{label} key ref={}, role={}",
            claims.project_ref_or_unknown(),
            claims.role_or_unknown()
        );
    }
}
