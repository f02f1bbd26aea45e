#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Evidence upload client for the third-party media host.
//!
//! The host takes unsigned multipart uploads — `file`, `upload_preset`,
//! and a client-generated `public_id` — and answers with the hosted URL.
//! Uploads are called with client-side credentials (the preset), the same
//! trust model the browser app used.
//!
//! Unlike geocoding, an upload failure is **not** swallowed: submission
//! flows require at least one hosted evidence URL, so the error is
//! surfaced and the flow halts.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

/// Errors from evidence uploads.
#[derive(Debug, Error)]
pub enum UploadError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The host rejected the upload.
    #[error("Upload rejected (HTTP {status}): {message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Host-supplied rejection reason.
        message: String,
    },

    /// The host's response did not contain a hosted URL.
    #[error("Upload response parse error: {message}")]
    Parse {
        /// Description of the parsing failure.
        message: String,
    },
}

/// A file queued for upload: raw bytes plus the original filename.
#[derive(Debug, Clone)]
pub struct EvidenceFile {
    /// Original filename (used for the multipart part and extension).
    pub filename: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl EvidenceFile {
    /// Wraps raw bytes as an uploadable file.
    #[must_use]
    pub fn new(filename: &str, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.to_owned(),
            bytes,
        }
    }
}

/// Anything that can host evidence files. The seam for in-memory fakes
/// in submission-flow tests; [`MediaUploader`] is the production impl.
#[async_trait]
pub trait EvidenceHost: Send + Sync {
    /// Uploads one file and returns its hosted URL.
    ///
    /// # Errors
    ///
    /// Returns [`UploadError`] when the upload fails; callers halt their
    /// flow on it.
    async fn upload(&self, file: EvidenceFile) -> Result<String, UploadError>;
}

/// Client for the unsigned-preset upload endpoint.
pub struct MediaUploader {
    client: reqwest::Client,
    upload_url: String,
    upload_preset: String,
}

impl MediaUploader {
    /// Creates an uploader for the given endpoint and preset.
    #[must_use]
    pub fn new(upload_url: &str, upload_preset: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            upload_url: upload_url.to_owned(),
            upload_preset: upload_preset.to_owned(),
        }
    }

    /// Uploads one file and returns its hosted URL.
    ///
    /// # Errors
    ///
    /// Returns [`UploadError`] if the request fails, the host rejects
    /// the file, or the response carries no URL.
    pub async fn upload(&self, file: EvidenceFile) -> Result<String, UploadError> {
        let public_id = format!("evidence/{}", Uuid::new_v4());
        log::info!(
            "Uploading evidence '{}' ({} bytes) as {public_id}",
            file.filename,
            file.bytes.len()
        );

        let part = reqwest::multipart::Part::bytes(file.bytes).file_name(file.filename.clone());
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("upload_preset", self.upload_preset.clone())
            .text("public_id", public_id);

        let response = self
            .client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body: serde_json::Value = response.json().await?;

        if !(200..300).contains(&status) {
            return Err(UploadError::Rejected {
                status,
                message: rejection_message(&body),
            });
        }

        parse_hosted_url(&body)
    }

    /// Uploads several files, failing fast on the first error.
    ///
    /// The returned URLs preserve input order. A partial failure leaves
    /// earlier files hosted but unused — the host garbage-collects
    /// unreferenced uploads.
    ///
    /// # Errors
    ///
    /// Returns the first [`UploadError`] encountered.
    pub async fn upload_all(
        &self,
        files: Vec<EvidenceFile>,
    ) -> Result<Vec<String>, UploadError> {
        let mut urls = Vec::with_capacity(files.len());
        for file in files {
            urls.push(self.upload(file).await?);
        }
        Ok(urls)
    }
}

#[async_trait]
impl EvidenceHost for MediaUploader {
    async fn upload(&self, file: EvidenceFile) -> Result<String, UploadError> {
        Self::upload(self, file).await
    }
}

/// Extracts the hosted URL from an upload response, preferring the TLS
/// variant.
fn parse_hosted_url(body: &serde_json::Value) -> Result<String, UploadError> {
    body.get("secureUrl")
        .or_else(|| body.get("secure_url"))
        .or_else(|| body.get("url"))
        .and_then(serde_json::Value::as_str)
        .map(ToOwned::to_owned)
        .ok_or_else(|| UploadError::Parse {
            message: "response carries neither secure_url nor url".to_owned(),
        })
}

/// Extracts the host's rejection reason, with a generic fallback.
fn rejection_message(body: &serde_json::Value) -> String {
    body.pointer("/error/message")
        .or_else(|| body.get("message"))
        .and_then(serde_json::Value::as_str)
        .map_or_else(|| "upload failed".to_owned(), ToOwned::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_secure_url() {
        let body = serde_json::json!({
            "secure_url": "https://media.example/e1.jpg",
            "url": "http://media.example/e1.jpg"
        });
        assert_eq!(
            parse_hosted_url(&body).unwrap(),
            "https://media.example/e1.jpg"
        );
    }

    #[test]
    fn falls_back_to_plain_url() {
        let body = serde_json::json!({"url": "http://media.example/e1.jpg"});
        assert_eq!(
            parse_hosted_url(&body).unwrap(),
            "http://media.example/e1.jpg"
        );
    }

    #[test]
    fn missing_url_is_a_parse_error() {
        let body = serde_json::json!({"asset_id": "abc"});
        assert!(matches!(
            parse_hosted_url(&body),
            Err(UploadError::Parse { .. })
        ));
    }

    #[test]
    fn rejection_message_reads_nested_error() {
        let body = serde_json::json!({"error": {"message": "Invalid upload preset"}});
        assert_eq!(rejection_message(&body), "Invalid upload preset");
        assert_eq!(
            rejection_message(&serde_json::json!({})),
            "upload failed"
        );
    }
}
