// Blob storage endpoints
//
// Objects live under `/storage/v1/object/{bucket}/{path}`; public
// objects are served from `/storage/v1/object/public/{bucket}/{path}`.

use bytes::Bytes;
use reqwest::Method;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

use super::client::RestGateway;
use crate::error::Error;

impl RestGateway {
    /// `POST /storage/v1/object/{bucket}/{path}`
    pub async fn upload_object(&self, bucket: &str, path: &str, bytes: Bytes) -> Result<(), Error> {
        let url = self.service_url("storage", &format!("object/{bucket}/{path}"))?;
        debug!(bucket, path, size = bytes.len(), "uploading object");
        let builder = self
            .request(Method::POST, url)
            .header(CONTENT_TYPE, content_type_for(path))
            .header("x-upsert", "false")
            .body(bytes);
        self.send_empty(builder).await
    }

    /// Public URL of a stored object.
    pub fn object_public_url(&self, bucket: &str, path: &str) -> String {
        let base = self.base_url().as_str().trim_end_matches('/');
        format!("{base}/storage/v1/object/public/{bucket}/{path}")
    }
}

/// Best-effort content type from the file extension.
fn content_type_for(path: &str) -> &'static str {
    let ext = path
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "txt" => "text/plain",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        _ => "application/octet-stream",
    }
}
