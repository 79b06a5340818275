//! Row copy job (`copy-memories`).

use crate::error::{SyncError, SyncResult};
use groupix_backend::TableStore;
use groupix_core::{CREATED_AT_COLUMN, MEMORIES_TABLE, Row, RowCopyConfig, strip_identity};
use std::sync::Arc;

/// Outcome of a row copy run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RowCopyReport {
    /// Rows read from the source.
    pub fetched: usize,
    /// Rows inserted into the target.
    pub inserted: usize,
}

/// Copies the most recent rows of a table from source to target.
///
/// Rows are inserted, not upserted: running the job twice duplicates them in
/// the target. The source identity column is dropped so the target assigns
/// fresh ids.
pub struct RowCopier {
    source: Arc<dyn TableStore>,
    target: Arc<dyn TableStore>,
    table: String,
    limit: usize,
}

impl RowCopier {
    pub fn new(
        source: Arc<dyn TableStore>,
        target: Arc<dyn TableStore>,
        table: impl Into<String>,
        limit: usize,
    ) -> Self {
        Self {
            source,
            target,
            table: table.into(),
            limit,
        }
    }

    /// Copier for the `memories` table using the configured limit.
    pub fn memories(
        source: Arc<dyn TableStore>,
        target: Arc<dyn TableStore>,
        config: &RowCopyConfig,
    ) -> Self {
        Self::new(source, target, MEMORIES_TABLE, config.limit)
    }

    pub async fn run(&self) -> SyncResult<RowCopyReport> {
        tracing::info!("Fetching latest {} {} from prod...", self.limit, self.table);
        let rows = self
            .source
            .select_recent(&self.table, CREATED_AT_COLUMN, self.limit)
            .await
            .map_err(SyncError::backend("source select"))?;
        tracing::info!("Found {} {}.", rows.len(), self.table);

        if rows.is_empty() {
            return Ok(RowCopyReport::default());
        }

        let fetched = rows.len();
        let payload: Vec<Row> = rows.into_iter().map(strip_identity).collect();

        self.target
            .insert(&self.table, &payload)
            .await
            .map_err(SyncError::backend("target insert"))?;
        tracing::info!("Done. {} copied.", capitalize(&self.table));

        Ok(RowCopyReport {
            fetched,
            inserted: payload.len(),
        })
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
