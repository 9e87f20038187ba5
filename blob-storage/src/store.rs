use async_trait::async_trait;
use tokio::io::AsyncRead;

use crate::error::BlobResult;
use crate::object::StoredObject;

/// Write-once storage of uploaded objects, located by id prefix.
///
/// Futures are not required to be `Send`, since upload streams handed in by
/// the HTTP layer are tied to their worker thread.
#[async_trait(?Send)]
pub trait BlobStore {
    type Reader: AsyncRead + Unpin;

    /// Persists everything `reader` yields under `id`, returning the byte count.
    ///
    /// Fails with `TooLarge` once more than `size_limit` bytes arrive; nothing
    /// is left behind in that case.
    async fn put<R>(&self, id: &str, original_name: &str, reader: R, size_limit: u64) -> BlobResult<u64>
    where
        R: AsyncRead + Unpin;

    /// Returns the first object whose storage name starts with `id`.
    async fn get(&self, id: &str) -> BlobResult<Option<StoredObject<Self::Reader>>>;
}
