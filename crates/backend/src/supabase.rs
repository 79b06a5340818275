//! Supabase REST backend (PostgREST tables and Storage buckets).

use crate::error::{BackendError, BackendResult};
use crate::traits::{BucketStore, DownloadedObject, ListOptions, TableStore, UploadOptions};
use async_trait::async_trait;
use bytes::Bytes;
use groupix_core::{ObjectEntry, ProjectConfig, Row, ServiceKey};
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE, HeaderValue};
use reqwest::{RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use tracing::instrument;

const UPLOAD_CACHE_CONTROL: &str = "max-age=3600";

/// Client bound to one Supabase project.
///
/// Construction never touches the network and does not validate the URL; a
/// malformed URL is reported by the first request.
pub struct SupabaseClient {
    http: reqwest::Client,
    base_url: String,
    service_key: ServiceKey,
}

impl std::fmt::Debug for SupabaseClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl SupabaseClient {
    /// Create a client. No cookie store is configured, so nothing persists
    /// between requests beyond the service key.
    pub fn new(url: &str, service_key: ServiceKey) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: url.trim_end_matches('/').to_string(),
            service_key,
        }
    }

    pub fn from_config(config: &ProjectConfig) -> Self {
        Self::new(&config.url, config.service_key.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build `{base}/{segments...}`, percent-encoding each segment.
    fn url<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> BackendResult<Url> {
        let invalid = |reason: String| BackendError::InvalidUrl {
            url: self.base_url.clone(),
            reason,
        };
        let mut url = Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid("URL cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn object_url(&self, bucket: &str, path: &str) -> BackendResult<Url> {
        self.url(
            ["storage", "v1", "object", bucket]
                .into_iter()
                .chain(path.split('/')),
        )
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        let key = self.service_key.expose();
        req.header("apikey", key).bearer_auth(key)
    }

    async fn send(&self, req: RequestBuilder) -> BackendResult<Response> {
        let response = self.authorize(req).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(BackendError::Api {
            status: status.as_u16(),
            message: error_message(&body),
        })
    }

    async fn send_json<T: DeserializeOwned>(&self, req: RequestBuilder) -> BackendResult<T> {
        let response = self.send(req).await?;
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| BackendError::Decode(e.to_string()))
    }
}

/// Extract a readable message from an error body.
///
/// PostgREST and Storage both return JSON with `message`; some gateway errors
/// only carry `error`, and proxies may return plain text.
fn error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for field in ["message", "error"] {
            if let Some(message) = value.get(field).and_then(|v| v.as_str()) {
                return message.to_string();
            }
        }
    }
    if body.is_empty() {
        "empty response body".to_string()
    } else {
        body.to_string()
    }
}

#[async_trait]
impl TableStore for SupabaseClient {
    #[instrument(skip(self), fields(backend = "supabase"))]
    async fn select_recent(
        &self,
        table: &str,
        order_column: &str,
        limit: usize,
    ) -> BackendResult<Vec<Row>> {
        let mut url = self.url(["rest", "v1", table])?;
        url.query_pairs_mut()
            .append_pair("select", "*")
            .append_pair("order", &format!("{order_column}.desc"))
            .append_pair("limit", &limit.to_string());
        self.send_json(self.http.get(url)).await
    }

    #[instrument(skip(self, rows), fields(backend = "supabase", rows = rows.len()))]
    async fn insert(&self, table: &str, rows: &[Row]) -> BackendResult<()> {
        let url = self.url(["rest", "v1", table])?;
        let req = self
            .http
            .post(url)
            .header("Prefer", "return=minimal")
            .json(rows);
        self.send(req).await?;
        Ok(())
    }
}

#[async_trait]
impl BucketStore for SupabaseClient {
    #[instrument(skip(self), fields(backend = "supabase"))]
    async fn list(&self, bucket: &str, options: &ListOptions) -> BackendResult<Vec<ObjectEntry>> {
        let url = self.url(["storage", "v1", "object", "list", bucket])?;
        self.send_json(self.http.post(url).json(options)).await
    }

    #[instrument(skip(self), fields(backend = "supabase"))]
    async fn download(&self, bucket: &str, path: &str) -> BackendResult<DownloadedObject> {
        let url = self.object_url(bucket, path)?;
        let response = self.send(self.http.get(url)).await?;
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let data = response.bytes().await?;
        Ok(DownloadedObject { data, content_type })
    }

    #[instrument(skip(self, data), fields(backend = "supabase", bytes = data.len()))]
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        data: Bytes,
        options: &UploadOptions,
    ) -> BackendResult<()> {
        let url = self.object_url(bucket, path)?;
        let content_type = HeaderValue::from_str(&options.content_type)
            .unwrap_or_else(|_| HeaderValue::from_static(groupix_core::DEFAULT_CONTENT_TYPE));
        let req = self
            .http
            .post(url)
            .header(CONTENT_TYPE, content_type)
            .header(CACHE_CONTROL, UPLOAD_CACHE_CONTROL)
            .header("x-upsert", if options.upsert { "true" } else { "false" })
            .body(data);
        self.send(req).await?;
        Ok(())
    }
}
