use actix_web::web;
use blob_store::{LocalFileBlobStore, Transfers};
use url::Url;

pub mod site_service;
pub mod transfer_service;

pub const APP_TYPE_JSON: &str = "application/json";

pub struct TransferState {
    pub(crate) transfers: Transfers<LocalFileBlobStore>,
    pub(crate) max_file_size: u64,
    pub(crate) public_url: Option<Url>,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(site_service::home)
        .service(site_service::health)
        .service(
            web::resource("/upload")
                .route(web::post().to(transfer_service::upload_file))
                .default_service(web::to(transfer_service::method_not_allowed)),
        )
        .service(
            web::resource("/files/")
                .route(web::get().to(transfer_service::missing_id))
                .default_service(web::to(transfer_service::method_not_allowed)),
        )
        .service(
            web::resource("/files/{id}")
                .route(web::get().to(transfer_service::download_file))
                .default_service(web::to(transfer_service::method_not_allowed)),
        );
}

#[cfg(test)]
pub(crate) mod testing {
    use std::path::Path;

    use actix_web::web::Data;
    use blob_store::{IdGenerator, LocalFileBlobStore, Transfers};

    use super::TransferState;

    pub const BOUNDARY: &str = "----transfer-test-boundary";

    pub async fn state(dir: &Path, max_file_size: u64) -> Data<TransferState> {
        let store = LocalFileBlobStore::open(dir).await.unwrap();
        Data::new(TransferState {
            transfers: Transfers::new(IdGenerator::default(), store),
            max_file_size,
            public_url: None,
        })
    }

    pub fn multipart_content_type() -> String {
        format!("multipart/form-data; boundary={BOUNDARY}")
    }

    /// Builds a form body holding one part.
    pub fn multipart_body(field: &str, filename: Option<&str>, data: &[u8]) -> Vec<u8> {
        let disposition = match filename {
            Some(name) => format!("form-data; name=\"{field}\"; filename=\"{name}\""),
            None => format!("form-data; name=\"{field}\""),
        };
        let mut body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: {disposition}\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
        body
    }
}
