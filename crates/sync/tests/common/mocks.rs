use async_trait::async_trait;
use bytes::Bytes;
use groupix_backend::{
    BackendError, BackendResult, BucketStore, DownloadedObject, ListOptions, TableStore,
    UploadOptions,
};
use groupix_core::{ObjectEntry, Row};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

fn api_error(status: u16, message: impl Into<String>) -> BackendError {
    BackendError::Api {
        status,
        message: message.into(),
    }
}

/// In-memory table that serves newest-first selects and records inserts.
#[allow(dead_code)]
#[derive(Default)]
pub struct MemoryTable {
    rows: Vec<Row>,
    select_error: Option<String>,
    insert_error: Option<String>,
    pub select_calls: AtomicUsize,
    pub selects: Mutex<Vec<(String, String, usize)>>,
    pub inserts: Mutex<Vec<(String, Vec<Row>)>>,
}

#[allow(dead_code)]
impl MemoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<Row>) -> Self {
        Self {
            rows,
            ..Self::default()
        }
    }

    pub fn failing_select(mut self, message: &str) -> Self {
        self.select_error = Some(message.to_string());
        self
    }

    pub fn failing_insert(mut self, message: &str) -> Self {
        self.insert_error = Some(message.to_string());
        self
    }

    pub fn insert_calls(&self) -> usize {
        self.inserts.lock().unwrap().len()
    }

    /// All rows inserted so far, across calls.
    pub fn inserted_rows(&self) -> Vec<Row> {
        self.inserts
            .lock()
            .unwrap()
            .iter()
            .flat_map(|(_, rows)| rows.clone())
            .collect()
    }
}

#[async_trait]
impl TableStore for MemoryTable {
    async fn select_recent(
        &self,
        table: &str,
        order_column: &str,
        limit: usize,
    ) -> BackendResult<Vec<Row>> {
        self.select_calls.fetch_add(1, Ordering::SeqCst);
        self.selects
            .lock()
            .unwrap()
            .push((table.to_string(), order_column.to_string(), limit));

        if let Some(message) = &self.select_error {
            return Err(api_error(500, message.clone()));
        }

        let mut rows = self.rows.clone();
        rows.sort_by(|a, b| {
            let key = |r: &Row| r.get(order_column).map(|v| v.to_string()).unwrap_or_default();
            key(b).cmp(&key(a))
        });
        rows.truncate(limit);
        Ok(rows)
    }

    async fn insert(&self, table: &str, rows: &[Row]) -> BackendResult<()> {
        if let Some(message) = &self.insert_error {
            return Err(api_error(400, message.clone()));
        }
        self.inserts
            .lock()
            .unwrap()
            .push((table.to_string(), rows.to_vec()));
        Ok(())
    }
}

/// An object held by [`MemoryBucket`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredObject {
    pub data: Bytes,
    pub content_type: Option<String>,
}

/// In-memory bucket with injectable failures and latency.
///
/// Tracks how many downloads are in flight at once, how often each path was
/// downloaded, and every listing request.
#[allow(dead_code)]
#[derive(Default)]
pub struct MemoryBucket {
    listing: Vec<ObjectEntry>,
    objects: Mutex<BTreeMap<String, StoredObject>>,
    failing_downloads: HashSet<String>,
    failing_uploads: HashSet<String>,
    latency: HashMap<String, Duration>,
    list_error: Option<String>,
    pub list_calls: Mutex<Vec<ListOptions>>,
    pub downloads: Mutex<HashMap<String, usize>>,
    pub uploads: Mutex<Vec<(String, UploadOptions)>>,
    in_flight: AtomicUsize,
    pub peak_in_flight: AtomicUsize,
}

#[allow(dead_code)]
impl MemoryBucket {
    pub fn new() -> Self {
        Self::default()
    }

    /// A bucket with `count` listed objects named `00000.jpg`, `00001.jpg`, ...
    pub fn with_files(count: usize) -> Self {
        (0..count).fold(Self::new(), |bucket, i| {
            bucket.with_object(&format!("{i:05}.jpg"), b"data", Some("image/jpeg"))
        })
    }

    /// Add a listed object whose download declares `content_type`.
    pub fn with_object(self, path: &str, data: &[u8], content_type: Option<&str>) -> Self {
        self.with_object_listed_as(path, data, content_type, content_type)
    }

    /// Add a listed object with separate declared and listing content types.
    pub fn with_object_listed_as(
        mut self,
        path: &str,
        data: &[u8],
        declared: Option<&str>,
        listed: Option<&str>,
    ) -> Self {
        let id = format!("id-{}", self.listing.len());
        self.insert_listing(ObjectEntry::file(path, id, listed));
        self.objects.get_mut().unwrap().insert(
            path.to_string(),
            StoredObject {
                data: Bytes::copy_from_slice(data),
                content_type: declared.map(str::to_string),
            },
        );
        self
    }

    /// Add a raw listing entry with no stored content.
    pub fn with_entry(mut self, entry: ObjectEntry) -> Self {
        self.insert_listing(entry);
        self
    }

    pub fn failing_download(mut self, path: &str) -> Self {
        self.failing_downloads.insert(path.to_string());
        self
    }

    pub fn failing_upload(mut self, path: &str) -> Self {
        self.failing_uploads.insert(path.to_string());
        self
    }

    pub fn failing_list(mut self, message: &str) -> Self {
        self.list_error = Some(message.to_string());
        self
    }

    pub fn with_latency(mut self, path: &str, latency: Duration) -> Self {
        self.latency.insert(path.to_string(), latency);
        self
    }

    fn insert_listing(&mut self, entry: ObjectEntry) {
        self.listing.push(entry);
        self.listing
            .sort_by(|a, b| a.name.as_deref().cmp(&b.name.as_deref()));
    }

    pub fn snapshot(&self) -> BTreeMap<String, StoredObject> {
        self.objects.lock().unwrap().clone()
    }

    pub fn get(&self, path: &str) -> Option<StoredObject> {
        self.objects.lock().unwrap().get(path).cloned()
    }

    pub fn download_count(&self, path: &str) -> usize {
        self.downloads
            .lock()
            .unwrap()
            .get(path)
            .copied()
            .unwrap_or(0)
    }

    pub fn total_downloads(&self) -> usize {
        self.downloads.lock().unwrap().values().sum()
    }

    pub fn upload_options(&self, path: &str) -> Option<UploadOptions> {
        self.uploads
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(p, _)| p == path)
            .map(|(_, options)| options.clone())
    }

    pub fn peak(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BucketStore for MemoryBucket {
    async fn list(&self, _bucket: &str, options: &ListOptions) -> BackendResult<Vec<ObjectEntry>> {
        self.list_calls.lock().unwrap().push(options.clone());
        if let Some(message) = &self.list_error {
            return Err(api_error(403, message.clone()));
        }
        let start = options.offset.min(self.listing.len());
        let end = (start + options.limit).min(self.listing.len());
        Ok(self.listing[start..end].to_vec())
    }

    async fn download(&self, _bucket: &str, path: &str) -> BackendResult<DownloadedObject> {
        *self
            .downloads
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default() += 1;

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        let latency = self
            .latency
            .get(path)
            .copied()
            .unwrap_or(Duration::from_millis(5));
        tokio::time::sleep(latency).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing_downloads.contains(path) {
            return Err(api_error(500, format!("download exploded for {path}")));
        }

        let object = self
            .get(path)
            .ok_or_else(|| api_error(404, "Object not found"))?;
        Ok(DownloadedObject {
            data: object.data,
            content_type: object.content_type,
        })
    }

    async fn upload(
        &self,
        _bucket: &str,
        path: &str,
        data: Bytes,
        options: &UploadOptions,
    ) -> BackendResult<()> {
        self.uploads
            .lock()
            .unwrap()
            .push((path.to_string(), options.clone()));

        if self.failing_uploads.contains(path) {
            return Err(api_error(413, "Payload too large"));
        }

        let mut objects = self.objects.lock().unwrap();
        if !options.upsert && objects.contains_key(path) {
            return Err(api_error(409, "The resource already exists"));
        }
        objects.insert(
            path.to_string(),
            StoredObject {
                data,
                content_type: Some(options.content_type.clone()),
            },
        );
        Ok(())
    }
}
