mod errors;
mod params;
mod services;

use std::io;

use actix_web::{web, App, HttpServer};
use blob_store::{IdGenerator, LocalFileBlobStore, Transfers};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use validator::Validate;

use crate::params::Args;
use crate::services::TransferState;

#[actix_web::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(errors) = args.validate() {
        tracing::error!("invalid configuration: {}", errors);
        return Err(io::Error::new(io::ErrorKind::InvalidInput, errors.to_string()));
    }

    let ids = IdGenerator::new(args.id_length).map_err(io::Error::other)?;
    let store = LocalFileBlobStore::open(&args.upload_dir)
        .await
        .map_err(|err| {
            tracing::error!(upload_dir = %args.upload_dir.display(), error = %err, "failed to open upload directory");
            io::Error::other(err)
        })?;

    tracing::info!("Server starting on {}", args.http_addr);
    tracing::info!("Upload directory: {}", args.upload_dir.display());
    tracing::info!("Max file size: {} MB", args.max_file_size / (1024 * 1024));

    let state = web::Data::new(TransferState {
        transfers: Transfers::new(ids, store),
        max_file_size: args.max_file_size,
        public_url: args.public_url.clone(),
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(services::configure)
    })
    .bind(args.http_addr.clone())?
    .run()
    .await
}
