use std::collections::BTreeMap;
use std::ops::Bound;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::fs::{self, File};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{BlobError, BlobResult};
use crate::object::{composite_name, validate_id, validate_original_name, ObjectMeta, StoredObject};
use crate::store::BlobStore;

const STAGING_DIR: &str = ".partial";

/// Stores each object as one file named `<id>_<original name>` in a flat
/// directory, with an ordered in-memory index over those names.
///
/// The index is rebuilt from the directory when the store is opened and kept
/// current by `put`, so lookups never rescan the directory.
#[derive(Debug, Clone)]
pub struct LocalFileBlobStore {
    base_path: PathBuf,
    index: Arc<RwLock<BTreeMap<String, ObjectMeta>>>,
}

impl LocalFileBlobStore {
    /// Opens the store rooted at `base_path`, creating the directory if needed.
    ///
    /// Leftover staging files from interrupted uploads are removed.
    pub async fn open(base_path: impl Into<PathBuf>) -> BlobResult<Self> {
        let base_path = base_path.into();
        fs::create_dir_all(&base_path)
            .await
            .map_err(BlobError::io("create the storage directory"))?;

        let staging = base_path.join(STAGING_DIR);
        purge_staging(&staging).await?;
        fs::create_dir_all(&staging)
            .await
            .map_err(BlobError::io("create the staging directory"))?;

        let index = scan(&base_path).await?;
        tracing::info!(
            base_path = %base_path.display(),
            objects = index.len(),
            "blob store opened"
        );

        Ok(Self {
            base_path,
            index: Arc::new(RwLock::new(index)),
        })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    pub async fn len(&self) -> usize {
        self.index.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.index.read().await.is_empty()
    }

    async fn lookup(&self, id: &str) -> Option<ObjectMeta> {
        let index = self.index.read().await;
        // Names sharing a prefix are contiguous and start right at the prefix.
        index
            .range::<str, _>((Bound::Included(id), Bound::Unbounded))
            .next()
            .filter(|(storage_name, _)| storage_name.starts_with(id))
            .map(|(_, meta)| meta.clone())
    }
}

#[async_trait(?Send)]
impl BlobStore for LocalFileBlobStore {
    type Reader = File;

    async fn put<R>(&self, id: &str, original_name: &str, reader: R, size_limit: u64) -> BlobResult<u64>
    where
        R: AsyncRead + Unpin,
    {
        validate_id(id)?;
        validate_original_name(original_name)?;

        let storage_name = composite_name(id, original_name);
        let staging = StagingFile::new(self.base_path.join(STAGING_DIR).join(Uuid::new_v4().to_string()));
        let mut file = File::create(&staging.path)
            .await
            .map_err(BlobError::io("create the staging file"))?;

        // One byte past the limit is enough to tell an oversized upload apart.
        let mut limited = reader.take(size_limit.saturating_add(1));
        let written = tokio::io::copy(&mut limited, &mut file)
            .await
            .map_err(BlobError::io("write the upload"))?;
        if written > size_limit {
            return Err(BlobError::TooLarge { limit: size_limit });
        }
        file.flush().await.map_err(BlobError::io("flush the upload"))?;
        drop(file);

        let destination = self.base_path.join(&storage_name);
        fs::rename(&staging.path, &destination)
            .await
            .map_err(BlobError::io("move the upload into place"))?;
        staging.disarm();

        let meta = ObjectMeta {
            id: id.to_string(),
            original_name: original_name.to_string(),
            size: written,
            storage_name: storage_name.clone(),
        };
        self.index.write().await.insert(storage_name, meta);
        tracing::debug!(id, size = written, "stored object");

        Ok(written)
    }

    async fn get(&self, id: &str) -> BlobResult<Option<StoredObject<File>>> {
        if id.is_empty() {
            return Err(BlobError::InvalidId(id.to_string()));
        }
        let Some(mut meta) = self.lookup(id).await else {
            return Ok(None);
        };

        let path = self.base_path.join(&meta.storage_name);
        let content = match File::open(&path).await {
            Ok(file) => file,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(storage_name = %meta.storage_name, "indexed object missing on disk");
                self.index.write().await.remove(&meta.storage_name);
                return Ok(None);
            }
            Err(err) => return Err(BlobError::io("open the stored object")(err)),
        };
        meta.size = content
            .metadata()
            .await
            .map_err(BlobError::io("stat the stored object"))?
            .len();

        Ok(Some(StoredObject { meta, content }))
    }
}

/// Removes its file on drop unless the upload was moved into place.
struct StagingFile {
    path: PathBuf,
    armed: bool,
}

impl StagingFile {
    fn new(path: PathBuf) -> Self {
        Self { path, armed: true }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for StagingFile {
    fn drop(&mut self) {
        // Drop cannot await, so the unlink runs inline on the calling thread.
        if self.armed {
            if let Err(err) = std::fs::remove_file(&self.path) {
                if err.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(path = %self.path.display(), error = %err, "failed to remove staging file");
                }
            }
        }
    }
}

async fn purge_staging(staging: &Path) -> BlobResult<()> {
    match fs::remove_dir_all(staging).await {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(BlobError::io("clear the staging directory")(err)),
    }
}

/// Indexes every regular file directly under `base_path`.
async fn scan(base_path: &Path) -> BlobResult<BTreeMap<String, ObjectMeta>> {
    let mut index = BTreeMap::new();
    let mut entries = fs::read_dir(base_path)
        .await
        .map_err(BlobError::io("read the storage directory"))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(BlobError::io("read the storage directory"))?
    {
        let metadata = entry
            .metadata()
            .await
            .map_err(BlobError::io("stat a stored object"))?;
        if !metadata.is_file() {
            continue;
        }
        let Ok(storage_name) = entry.file_name().into_string() else {
            tracing::warn!(path = %entry.path().display(), "skipping non UTF-8 file name");
            continue;
        };
        let meta = ObjectMeta::from_storage_name(&storage_name, metadata.len());
        index.insert(storage_name, meta);
    }

    Ok(index)
}
