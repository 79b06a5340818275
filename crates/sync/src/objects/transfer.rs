//! Single-object transfer.

use groupix_backend::{BackendError, BackendResult, BucketStore, UploadOptions};
use groupix_core::{ObjectEntry, resolve_content_type};

/// Copy one object from `source` to `target` under the same path, overwriting
/// whatever the target holds there.
///
/// The content type is the one the download declared, else the listing's
/// `mimetype`, else `application/octet-stream`. An entry without a path is
/// rejected before either store is contacted.
pub async fn transfer_object(
    source: &dyn BucketStore,
    target: &dyn BucketStore,
    bucket: &str,
    entry: &ObjectEntry,
) -> BackendResult<()> {
    let path = entry.path().ok_or(BackendError::MissingPath)?;
    let object = source.download(bucket, path).await?;
    let options = UploadOptions {
        content_type: resolve_content_type(object.content_type.as_deref(), entry.mimetype()),
        upsert: true,
    };
    target.upload(bucket, path, object.data, &options).await
}
