use thiserror::Error;

pub type BlobResult<T> = Result<T, BlobError>;

#[derive(Debug, Error)]
pub enum BlobError {
    #[error("upload exceeds the {limit} byte limit")]
    TooLarge { limit: u64 },

    #[error("invalid file name: {0:?}")]
    InvalidName(String),

    #[error("invalid object id: {0:?}")]
    InvalidId(String),

    #[error("identifier length must be at least 1")]
    InvalidIdLength,

    #[error("storage failure while trying to {action}")]
    Io {
        action: &'static str,
        #[source]
        source: std::io::Error,
    },
}

impl BlobError {
    pub(crate) fn io(action: &'static str) -> impl FnOnce(std::io::Error) -> BlobError {
        move |source| BlobError::Io { action, source }
    }
}
