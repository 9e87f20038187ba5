use std::io;

use actix_multipart::Multipart;
use actix_web::http::header::{self, ContentDisposition, DispositionParam, DispositionType};
use actix_web::web::Data;
use actix_web::{web, HttpRequest, HttpResponse};
use futures::TryStreamExt;
use serde::{Deserialize, Serialize};
use tokio_util::io::{ReaderStream, StreamReader};
use url::Url;

use crate::errors::TransferErr;
use crate::services::{TransferState, APP_TYPE_JSON};

const FILE_FIELD: &str = "file";
const APP_TYPE_OCTET: &str = "application/octet-stream";
/// Room for multipart boundaries and part headers on top of the file itself.
const FORM_OVERHEAD_ALLOWANCE: u64 = 64 * 1024;

#[derive(Serialize, Deserialize, Debug)]
pub struct UploadResponse {
    pub id: String,
    pub filename: String,
    pub size: u64,
    pub url: String,
}

pub(crate) async fn upload_file(
    req: HttpRequest,
    mut payload: Multipart,
    shared_state: Data<TransferState>,
) -> Result<HttpResponse, TransferErr> {
    let limit = shared_state.max_file_size;
    if declared_length(&req).is_some_and(|len| len > limit.saturating_add(FORM_OVERHEAD_ALLOWANCE)) {
        return Err(TransferErr::InputTooLarge { limit });
    }

    while let Some(field) = payload.try_next().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let raw_name = field
            .content_disposition()
            .and_then(|disposition| disposition.get_filename())
            .unwrap_or_default()
            .to_string();
        let file_name = client_file_name(&raw_name)
            .ok_or_else(|| TransferErr::MalformedUpload("missing file name".to_string()))?;

        let reader = StreamReader::new(Box::pin(field.map_err(|err| io::Error::other(err.to_string()))));
        let receipt = shared_state.transfers.upload(file_name, reader, limit).await.map_err(|err| {
            tracing::warn!(file_name, error = %err, "upload rejected");
            TransferErr::from(err)
        })?;

        tracing::info!(
            id = %receipt.id,
            file_name = %receipt.filename,
            size_mb = %format!("{:.2}", receipt.size as f64 / (1024.0 * 1024.0)),
            "file uploaded"
        );
        let url = download_url(&req, shared_state.public_url.as_ref(), &receipt.id);
        let resp = UploadResponse {
            id: receipt.id,
            filename: receipt.filename,
            size: receipt.size,
            url,
        };
        return Ok(HttpResponse::Ok().content_type(APP_TYPE_JSON).json(resp));
    }

    Err(TransferErr::MalformedUpload(format!("no \"{FILE_FIELD}\" field in form")))
}

pub(crate) async fn download_file(
    id: web::Path<String>,
    shared_state: Data<TransferState>,
) -> Result<HttpResponse, TransferErr> {
    let object = shared_state
        .transfers
        .download(&id)
        .await?
        .ok_or(TransferErr::NotFound)?;

    let size = object.size();
    let disposition = ContentDisposition {
        disposition: DispositionType::Attachment,
        parameters: vec![DispositionParam::Filename(object.meta.original_name.clone())],
    };
    tracing::info!(storage_name = %object.meta.storage_name, size, "file downloaded");

    Ok(HttpResponse::Ok()
        .insert_header(disposition)
        .insert_header((header::CONTENT_TYPE, APP_TYPE_OCTET))
        .no_chunking(size)
        .streaming(ReaderStream::new(object.content)))
}

pub(crate) async fn missing_id() -> Result<HttpResponse, TransferErr> {
    Err(TransferErr::MissingId)
}

pub(crate) async fn method_not_allowed() -> Result<HttpResponse, TransferErr> {
    Err(TransferErr::MethodNotAllowed)
}

fn declared_length(req: &HttpRequest) -> Option<u64> {
    req.headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse().ok())
}

/// Keeps only the last path component of a client supplied file name.
fn client_file_name(raw: &str) -> Option<&str> {
    let name = raw.rsplit(['/', '\\']).next().unwrap_or(raw);
    match name {
        "" | "." | ".." => None,
        name => Some(name),
    }
}

fn download_url(req: &HttpRequest, public_url: Option<&Url>, id: &str) -> String {
    match public_url {
        Some(base) => format!("{}/files/{}", base.as_str().trim_end_matches('/'), id),
        None => {
            let info = req.connection_info();
            format!("{}://{}/files/{}", info.scheme(), info.host(), id)
        }
    }
}
