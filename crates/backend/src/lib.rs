//! Backend access for the Groupix sync jobs.
//!
//! This crate provides:
//! - [`TableStore`] and [`BucketStore`], the table and blob operations the jobs need
//! - [`SupabaseClient`], the REST implementation of both
//! - [`BackendPair`], the source/target handle factory

pub mod error;
pub mod supabase;
pub mod traits;

pub use error::{BackendError, BackendResult};
pub use supabase::SupabaseClient;
pub use traits::{
    BucketStore, DownloadedObject, ListOptions, MAX_LIST_PAGE_SIZE, SortBy, SortOrder,
    TableStore, UploadOptions,
};

use groupix_core::MigrationConfig;
use std::sync::Arc;

/// Independent handles to the source (production) and target (development)
/// projects of one job run.
#[derive(Clone, Debug)]
pub struct BackendPair {
    pub source: Arc<SupabaseClient>,
    pub target: Arc<SupabaseClient>,
}

impl BackendPair {
    /// Build both handles. No network call is made here.
    pub fn from_config(config: &MigrationConfig) -> Self {
        Self {
            source: Arc::new(SupabaseClient::from_config(&config.source)),
            target: Arc::new(SupabaseClient::from_config(&config.target)),
        }
    }
}
