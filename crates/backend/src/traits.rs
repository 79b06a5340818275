//! Backend trait definitions.

use crate::error::BackendResult;
use async_trait::async_trait;
use bytes::Bytes;
use groupix_core::{ObjectEntry, Row};
use serde::Serialize;

/// Largest page a bucket listing may return.
pub const MAX_LIST_PAGE_SIZE: usize = 1000;

/// Sort direction for listings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Listing sort order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SortBy {
    pub column: String,
    pub order: SortOrder,
}

impl SortBy {
    /// Ascending by object name.
    pub fn name_ascending() -> Self {
        Self {
            column: "name".to_string(),
            order: SortOrder::Asc,
        }
    }
}

/// Options for one page of a bucket listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ListOptions {
    pub prefix: String,
    pub limit: usize,
    pub offset: usize,
    #[serde(rename = "sortBy")]
    pub sort_by: SortBy,
}

impl ListOptions {
    /// A root-level page sorted by name.
    pub fn page(limit: usize, offset: usize) -> Self {
        Self {
            prefix: String::new(),
            limit,
            offset,
            sort_by: SortBy::name_ascending(),
        }
    }
}

/// Content of a downloaded object.
#[derive(Clone, Debug)]
pub struct DownloadedObject {
    pub data: Bytes,
    /// Content type the backend declared for the object, if any.
    pub content_type: Option<String>,
}

/// Options for an upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadOptions {
    pub content_type: String,
    /// Overwrite an existing object at the same path.
    pub upsert: bool,
}

/// Relational table access.
#[async_trait]
pub trait TableStore: Send + Sync + 'static {
    /// Select all columns of the `limit` rows with the greatest `order_column`,
    /// newest first.
    async fn select_recent(
        &self,
        table: &str,
        order_column: &str,
        limit: usize,
    ) -> BackendResult<Vec<Row>>;

    /// Insert rows in one batched call.
    ///
    /// The batch is all-or-nothing on the backend side.
    async fn insert(&self, table: &str, rows: &[Row]) -> BackendResult<()>;
}

/// Blob storage access.
#[async_trait]
pub trait BucketStore: Send + Sync + 'static {
    /// List one page of objects.
    async fn list(&self, bucket: &str, options: &ListOptions) -> BackendResult<Vec<ObjectEntry>>;

    /// Download an object's full content.
    async fn download(&self, bucket: &str, path: &str) -> BackendResult<DownloadedObject>;

    /// Upload an object.
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        data: Bytes,
        options: &UploadOptions,
    ) -> BackendResult<()>;
}
