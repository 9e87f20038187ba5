use actix_web::web::Data;
use actix_web::{get, HttpRequest, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use crate::services::{TransferState, APP_TYPE_JSON};

#[derive(Serialize, Deserialize)]
struct Health {
    status: String,
    service: String,
}

#[get("/")]
async fn home(req: HttpRequest, shared_state: Data<TransferState>) -> impl Responder {
    let host = req.connection_info().host().to_string();
    let max_mb = shared_state.max_file_size / (1024 * 1024);
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(landing_page(&host, max_mb))
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok()
        .content_type(APP_TYPE_JSON)
        .json(Health {
            status: "ok".to_string(),
            service: "file-transfer".to_string(),
        })
}

fn landing_page(host: &str, max_mb: u64) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>File Transfer Service</title>
    <style>
        body {{ font-family: Arial, sans-serif; max-width: 800px; margin: 50px auto; padding: 20px; }}
        .section {{ margin: 20px 0; padding: 20px; background: #f5f5f5; border-radius: 5px; }}
        pre {{ background: #2d2d2d; color: #f8f8f8; padding: 15px; border-radius: 5px; overflow-x: auto; }}
    </style>
</head>
<body>
    <h1>File Transfer Service</h1>
    <p>Upload a file, get a short id, share the link.</p>

    <div class="section">
        <h2>Upload a File</h2>
        <pre>curl -F "file=@yourfile.pdf" http://{host}/upload</pre>
        <form action="/upload" method="post" enctype="multipart/form-data">
            <input type="file" name="file" required>
            <button type="submit">Upload</button>
        </form>
    </div>

    <div class="section">
        <h2>Download a File</h2>
        <pre>curl http://{host}/files/{{file-id}} -OJ</pre>
    </div>

    <div class="section">
        <h2>Limits</h2>
        <ul>
            <li>Max file size: {max_mb} MB</li>
        </ul>
    </div>
</body>
</html>"#
    )
}
