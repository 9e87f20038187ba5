//! Identifier-addressed storage for uploaded files.
//!
//! Uploads are streamed into a [`BlobStore`] under a freshly generated id and
//! can later be located again by that id alone:
//!
//! ```rust,no_run
//! # async fn demo() -> blob_store::BlobResult<()> {
//! use blob_store::{IdGenerator, LocalFileBlobStore, Transfers};
//!
//! let store = LocalFileBlobStore::open("./uploads").await?;
//! let transfers = Transfers::new(IdGenerator::default(), store);
//!
//! let receipt = transfers.upload("a.txt", &b"hello"[..], 1024).await?;
//! if let Some(object) = transfers.download(&receipt.id).await? {
//!     println!("{} is {} bytes", object.original_name(), object.size());
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod id;
pub mod local_store;
pub mod object;
pub mod store;

use rand::rngs::OsRng;
use rand::RngCore;
use tokio::io::AsyncRead;

pub use error::{BlobError, BlobResult};
pub use id::{IdGenerator, DEFAULT_ID_LENGTH};
pub use local_store::LocalFileBlobStore;
pub use object::{ObjectMeta, StoredObject, UploadReceipt, SEPARATOR};
pub use store::BlobStore;

/// Pairs an id generator with a store to offer the upload and download
/// operations the HTTP layer calls.
#[derive(Debug)]
pub struct Transfers<S, R = OsRng> {
    ids: IdGenerator<R>,
    store: S,
}

impl<S, R> Transfers<S, R>
where
    S: BlobStore,
    R: RngCore,
{
    pub fn new(ids: IdGenerator<R>, store: S) -> Self {
        Self { ids, store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn upload<U>(&self, original_name: &str, reader: U, size_limit: u64) -> BlobResult<UploadReceipt>
    where
        U: AsyncRead + Unpin,
    {
        let id = self.ids.generate();
        let size = self.store.put(&id, original_name, reader, size_limit).await?;
        Ok(UploadReceipt {
            id,
            filename: original_name.to_string(),
            size,
        })
    }

    pub async fn download(&self, id: &str) -> BlobResult<Option<StoredObject<S::Reader>>> {
        self.store.get(id).await
    }
}
