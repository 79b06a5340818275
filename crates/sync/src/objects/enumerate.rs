//! Bucket enumeration.

use groupix_backend::{BackendResult, BucketStore, ListOptions, MAX_LIST_PAGE_SIZE};
use groupix_core::ObjectEntry;

/// List up to `cap` transferable objects of `bucket`, ascending by name.
///
/// Pages are requested with `limit = min(1000, cap - accepted)`. Listing stops
/// once `cap` entries are accepted, or on an empty page, or on a page shorter
/// than requested. Entries without a name and folder placeholders are skipped.
/// The offset advances by the number of entries the page returned, accepted or
/// not.
pub async fn enumerate_objects(
    store: &dyn BucketStore,
    bucket: &str,
    cap: usize,
) -> BackendResult<Vec<ObjectEntry>> {
    let mut accepted = Vec::new();
    let mut offset = 0;

    while accepted.len() < cap {
        let requested = MAX_LIST_PAGE_SIZE.min(cap - accepted.len());
        let page = store
            .list(bucket, &ListOptions::page(requested, offset))
            .await?;
        let returned = page.len();
        if returned == 0 {
            break;
        }

        for entry in page {
            if entry.path().is_none() || entry.is_placeholder() {
                continue;
            }
            accepted.push(entry);
            if accepted.len() >= cap {
                break;
            }
        }

        offset += returned;
        if returned < requested {
            break;
        }
    }

    tracing::debug!(bucket, accepted = accepted.len(), offset, "enumeration finished");
    Ok(accepted)
}
