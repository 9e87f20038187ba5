use std::path::PathBuf;

use blob_store::DEFAULT_ID_LENGTH;
use clap::Parser;
use url::Url;
use validator::Validate;

pub const DEFAULT_MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

#[derive(Parser, Validate, Debug, Clone)]
#[command(about = "Upload files and share them by a short id")]
pub struct Args {
    /// Address the HTTP server binds to.
    #[clap(long, env = "FILE_TRANSFER_HTTP_ADDR", default_value = "0.0.0.0:8080")]
    pub(crate) http_addr: String,

    /// Directory uploaded files are stored in.
    #[clap(long, env = "FILE_TRANSFER_UPLOAD_DIR", default_value = "./uploads")]
    pub(crate) upload_dir: PathBuf,

    /// Largest accepted upload, in bytes.
    #[clap(long, env = "FILE_TRANSFER_MAX_FILE_SIZE", default_value_t = DEFAULT_MAX_FILE_SIZE)]
    #[validate(range(min = 1))]
    pub(crate) max_file_size: u64,

    #[clap(long, env = "FILE_TRANSFER_ID_LENGTH", default_value_t = DEFAULT_ID_LENGTH)]
    #[validate(range(min = 4, max = 64))]
    pub(crate) id_length: usize,

    /// Base URL used in download links, e.g. `https://files.example.com/`.
    /// Defaults to the scheme and host the upload request arrived on.
    #[clap(long, env = "FILE_TRANSFER_PUBLIC_URL")]
    pub(crate) public_url: Option<Url>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["file-transfer-server"]);
        assert_eq!(args.http_addr, "0.0.0.0:8080");
        assert_eq!(args.upload_dir, PathBuf::from("./uploads"));
        assert_eq!(args.max_file_size, 104_857_600);
        assert_eq!(args.id_length, 12);
        assert!(args.public_url.is_none());
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_id_length_out_of_range() {
        let args = Args::parse_from(["file-transfer-server", "--id-length", "2"]);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_public_url_parsed() {
        let args = Args::parse_from([
            "file-transfer-server",
            "--public-url",
            "https://files.example.com/share/",
        ]);
        assert_eq!(args.public_url.unwrap().as_str(), "https://files.example.com/share/");
    }
}
