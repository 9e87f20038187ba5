use serde::{Deserialize, Serialize};

use crate::error::{BlobError, BlobResult};

/// Joins an object id and its original file name in a storage name.
pub const SEPARATOR: char = '_';

/// Metadata for one stored object.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ObjectMeta {
    pub id: String,
    pub original_name: String,
    pub size: u64,
    /// Name of the backing file inside the store root.
    pub storage_name: String,
}

impl ObjectMeta {
    /// Recovers the metadata encoded in an existing storage name.
    pub fn from_storage_name(storage_name: &str, size: u64) -> Self {
        let (id, original_name) = split_composite(storage_name);
        Self {
            id: id.to_string(),
            original_name: original_name.to_string(),
            size,
            storage_name: storage_name.to_string(),
        }
    }
}

/// An object found by a lookup, with its content positioned at the start.
#[derive(Debug)]
pub struct StoredObject<R> {
    pub meta: ObjectMeta,
    pub content: R,
}

impl<R> StoredObject<R> {
    pub fn original_name(&self) -> &str {
        &self.meta.original_name
    }

    pub fn size(&self) -> u64 {
        self.meta.size
    }
}

/// What an upload hands back to its caller.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UploadReceipt {
    pub id: String,
    pub filename: String,
    pub size: u64,
}

pub fn composite_name(id: &str, original_name: &str) -> String {
    format!("{id}{SEPARATOR}{original_name}")
}

/// Splits a storage name at the first separator.
///
/// Names with nothing after the separator, or with no separator at all, keep
/// the whole storage name as their original name.
pub fn split_composite(storage_name: &str) -> (&str, &str) {
    match storage_name.split_once(SEPARATOR) {
        Some((id, rest)) if !rest.is_empty() => (id, rest),
        Some((id, _)) => (id, storage_name),
        None => (storage_name, storage_name),
    }
}

pub(crate) fn validate_id(id: &str) -> BlobResult<()> {
    if id.is_empty() || id.contains(SEPARATOR) || id.contains(['/', '\\', '\0']) {
        return Err(BlobError::InvalidId(id.to_string()));
    }
    Ok(())
}

pub(crate) fn validate_original_name(name: &str) -> BlobResult<()> {
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\', '\0']) {
        return Err(BlobError::InvalidName(name.to_string()));
    }
    Ok(())
}
