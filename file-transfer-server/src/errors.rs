use actix_multipart::MultipartError;
use actix_web::{HttpResponse, ResponseError};
use blob_store::BlobError;
use thiserror::Error;


#[derive(Debug, Error)]
pub enum TransferErr {
    #[error("File too large: the limit is {limit} bytes")]
    InputTooLarge { limit: u64 },

    #[error("Invalid upload: {0}")]
    MalformedUpload(String),

    #[error("File ID required")]
    MissingId,

    #[error("File not found")]
    NotFound,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Storage failure")]
    Storage(#[source] BlobError),
}

impl From<BlobError> for TransferErr {
    fn from(err: BlobError) -> Self {
        match err {
            BlobError::TooLarge { limit } => TransferErr::InputTooLarge { limit },
            BlobError::InvalidName(name) => TransferErr::MalformedUpload(format!("unusable file name {name:?}")),
            BlobError::InvalidId(_) => TransferErr::NotFound,
            other => TransferErr::Storage(other),
        }
    }
}

impl From<MultipartError> for TransferErr {
    fn from(err: MultipartError) -> Self {
        TransferErr::MalformedUpload(err.to_string())
    }
}

impl ResponseError for TransferErr {
    fn error_response(&self) -> HttpResponse {
        match self {
            TransferErr::InputTooLarge { .. } => HttpResponse::PayloadTooLarge().body(self.to_string()),
            TransferErr::MalformedUpload(_) => HttpResponse::BadRequest().body(self.to_string()),
            TransferErr::MissingId => HttpResponse::BadRequest().body(self.to_string()),
            TransferErr::NotFound => HttpResponse::NotFound().body(self.to_string()),
            TransferErr::MethodNotAllowed => HttpResponse::MethodNotAllowed().body(self.to_string()),
            TransferErr::Storage(err) => {
                tracing::error!(error = %err, cause = ?std::error::Error::source(err), "storage failure");
                HttpResponse::InternalServerError().body(self.to_string())
            }
        }
    }
}
