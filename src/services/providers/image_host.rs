//! Multipart image upload to a hosting endpoint.
//!
//! The endpoint receives a `file` part and answers with JSON that carries the
//! public URL, either at the top level (`{"url": ..}`) or nested the way
//! imgbb-style hosts do it (`{"data": {"url": ..}}`).

use std::path::Path;

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::Deserialize;

use crate::services::{ImageHost, ServiceError};

#[derive(Deserialize, Debug)]
struct UploadResponse {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    data: Option<UploadData>,
}

#[derive(Deserialize, Debug)]
struct UploadData {
    #[serde(default)]
    url: Option<String>,
}

impl UploadResponse {
    fn into_url(self) -> Option<String> {
        let present = |url: &String| !url.is_empty();
        self.url
            .filter(present)
            .or_else(|| self.data.and_then(|d| d.url).filter(present))
    }
}

/// Guesses a MIME type from the file extension. The hosting side sniffs the
/// bytes anyway, this only has to be plausible.
pub fn mime_for(file_name: &str) -> &'static str {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    }
}

pub struct HttpImageHost {
    upload_url: String,
    client: reqwest::Client,
}

impl HttpImageHost {
    pub fn new(upload_url: String) -> Self {
        Self {
            upload_url,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl ImageHost for HttpImageHost {
    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, ServiceError> {
        if self.upload_url.is_empty() {
            return Err(ServiceError::NotConfigured("no upload URL".to_string()));
        }

        info!("Uploading {} ({} bytes)", file_name, bytes.len());

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(mime_for(file_name))
            .map_err(|e| ServiceError::Parse(e.to_string()))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ServiceError::Network(e.to_string()))?;

        debug!("Upload response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Upload failed: {} - {}", status, err_body);
            return Err(ServiceError::Api {
                status,
                message: err_body,
            });
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| ServiceError::Parse(e.to_string()))?;

        body.into_url()
            .ok_or_else(|| ServiceError::Parse("upload response carried no url".to_string()))
    }
}
