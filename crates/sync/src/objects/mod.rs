//! Object copy job (`copy-storage`).

pub mod enumerate;
pub mod pool;
pub mod progress;
pub mod transfer;

pub use enumerate::enumerate_objects;
pub use pool::TransferPool;
pub use progress::{TransferStats, throughput};
pub use transfer::transfer_object;

use crate::error::{SyncError, SyncResult};
use groupix_backend::{BackendResult, BucketStore};
use groupix_core::{ObjectCopyConfig, ObjectEntry};
use std::sync::Arc;
use std::time::Duration;

/// Outcome of an object copy run.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectCopyReport {
    /// Objects found by enumeration.
    pub enumerated: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub elapsed: Duration,
    /// Average successful transfers per second.
    pub rate: f64,
}

impl ObjectCopyReport {
    /// True when at least one object could not be copied.
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

/// Copies every object of a bucket from source to target.
///
/// Each transfer is its own failure domain: a failed download or upload is
/// logged and counted, and the run continues. Successful uploads are kept even
/// when others fail; re-running is safe because uploads overwrite.
pub struct ObjectCopier {
    source: Arc<dyn BucketStore>,
    target: Arc<dyn BucketStore>,
    bucket: String,
    limit: usize,
    concurrency: usize,
    log_every: usize,
}

impl ObjectCopier {
    pub fn new(
        source: Arc<dyn BucketStore>,
        target: Arc<dyn BucketStore>,
        config: &ObjectCopyConfig,
    ) -> Self {
        Self {
            source,
            target,
            bucket: config.bucket.clone(),
            limit: config.limit,
            concurrency: config.concurrency,
            log_every: config.log_every,
        }
    }

    pub async fn run(&self) -> SyncResult<ObjectCopyReport> {
        tracing::info!(
            "Listing up to {} files from bucket \"{}\"...",
            self.limit,
            self.bucket
        );
        let entries = enumerate_objects(self.source.as_ref(), &self.bucket, self.limit)
            .await
            .map_err(SyncError::backend("source listing"))?;
        tracing::info!("Found {} files.", entries.len());

        let mut stats = TransferStats::new(entries.len(), self.log_every);
        let source = self.source.as_ref();
        let target = self.target.as_ref();
        let bucket = self.bucket.as_str();

        TransferPool::new(self.concurrency)
            .run(
                entries,
                |entry: ObjectEntry| async move {
                    let result = transfer_object(source, target, bucket, &entry).await;
                    (entry, result)
                },
                |(entry, result): (ObjectEntry, BackendResult<()>)| match result {
                    Ok(()) => {
                        if stats.record_success() {
                            tracing::info!(
                                "Progress: {}/{} ({:.2} files/s)",
                                stats.succeeded(),
                                stats.total(),
                                stats.rate()
                            );
                        }
                    }
                    Err(e) => {
                        stats.record_failure();
                        let path = entry.path().unwrap_or_default();
                        tracing::error!(path = %path, error = %e, "Failed: {path}");
                    }
                },
            )
            .await;

        debug_assert!(stats.is_complete());
        let report = ObjectCopyReport {
            enumerated: stats.total(),
            succeeded: stats.succeeded(),
            failed: stats.failed(),
            elapsed: stats.elapsed(),
            rate: stats.rate(),
        };
        tracing::info!(
            "Done. Success: {}, Failed: {}. Avg rate: {:.2} files/s",
            report.succeeded,
            report.failed,
            report.rate
        );
        Ok(report)
    }
}
