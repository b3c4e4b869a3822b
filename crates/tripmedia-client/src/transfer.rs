//! Direct-to-storage transfer execution.
//!
//! Executes one upload descriptor with one HTTP request. This is the minimal
//! stand-in for a full upload widget: no retries, no chunking, no progress
//! reporting. A `PUT` descriptor sends the raw bytes with the descriptor's
//! headers; a `POST` descriptor sends a multipart form carrying the
//! descriptor's fields followed by the file part.

use reqwest::Client;
use tripmedia_core::{UploadDescriptor, UploadFile, UploadMethod};

use crate::error::{HandshakeError, HandshakeResult};

/// Single-request executor for upload descriptors.
#[derive(Clone, Debug, Default)]
pub struct DirectTransfer {
    client: Client,
}

impl DirectTransfer {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Perform the authorized write.
    ///
    /// On success the file's metadata is stamped with its storage key, taken
    /// from the descriptor's `key` field when the signing backend provides
    /// one, otherwise from the upload URL's path.
    pub async fn send(
        &self,
        descriptor: &UploadDescriptor,
        file: &mut UploadFile,
        data: Vec<u8>,
    ) -> HandshakeResult<()> {
        let mut request = match descriptor.method {
            UploadMethod::Put => self.client.put(&descriptor.url).body(data),
            UploadMethod::Post => {
                let mut form = reqwest::multipart::Form::new();
                for (name, value) in &descriptor.fields {
                    form = form.text(name.clone(), value.clone());
                }
                // The file part must come after the policy fields.
                form = form.part(
                    "file",
                    reqwest::multipart::Part::bytes(data)
                        .file_name(file.name.clone())
                        .mime_str(&file.content_type)?,
                );
                self.client.post(&descriptor.url).multipart(form)
            }
        };

        for (name, value) in &descriptor.headers {
            request = request.header(name, value);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(HandshakeError::Status { status, body });
        }

        file.meta.key = Some(storage_key(descriptor));

        tracing::debug!(
            filename = %file.name,
            key = ?file.meta.key,
            "Transferred file to storage"
        );

        Ok(())
    }
}

/// Storage key for a completed transfer: the descriptor's `key` field when
/// present, otherwise the path component of the upload URL.
fn storage_key(descriptor: &UploadDescriptor) -> String {
    if let Some(key) = descriptor.fields.get("key") {
        return key.clone();
    }
    match reqwest::Url::parse(&descriptor.url) {
        Ok(url) => url.path().trim_start_matches('/').to_string(),
        Err(_) => descriptor.url.clone(),
    }
}
