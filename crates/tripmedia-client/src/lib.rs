//! Upload handshake client for the tripmedia backend.
//!
//! Bridges an upload surface to the backend that issues temporary, scoped
//! write authorizations for object storage and records completed transfers.
//! The client implements the [`AuthorizationProvider`] and
//! [`CompletionReporter`] capabilities; performing the transfer itself is the
//! surface's job ([`DirectTransfer`] is the minimal built-in executor, and
//! [`UploadPipeline`] wires the three steps together per file).

pub mod error;
pub mod hooks;
pub mod pipeline;
pub mod transfer;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use validator::Validate;

use tripmedia_core::{
    HandshakeConfig, TripId, UploadAuthorizationRequest, UploadCompletion, UploadDescriptor,
    UploadFile,
};

use crate::hooks::{AuthorizationProvider, CompletionReporter};

// Re-export the pieces most callers need.
pub use error::{HandshakeError, HandshakeResult};
pub use pipeline::UploadPipeline;
pub use transfer::DirectTransfer;

/// HTTP client for the upload handshake endpoints.
///
/// Holds one trip's context; every authorization issued through it is scoped
/// to that trip. Construction takes explicit configuration, no ambient state.
#[derive(Clone, Debug)]
pub struct HandshakeClient {
    client: Client,
    config: HandshakeConfig,
    trip: TripId,
}

impl HandshakeClient {
    pub fn new(config: HandshakeConfig, trip: TripId) -> HandshakeResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(HandshakeError::Client)?;

        Ok(Self {
            client,
            config,
            trip,
        })
    }

    pub fn trip(&self) -> &TripId {
        &self.trip
    }

    /// POST a JSON body with the handshake header shape and deserialize the
    /// JSON response. No retries at this layer.
    async fn post_json<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        url: &str,
        body: &B,
    ) -> HandshakeResult<T> {
        let response = self
            .client
            .post(url)
            .header("Accept", "application/json")
            .header("X-CSRFToken", &self.config.csrf_token)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(HandshakeError::Status { status, body });
        }

        Ok(response.json().await?)
    }

    /// Request a one-time upload authorization for `file`.
    ///
    /// Sends the file's name, content type, and the client's trip context to
    /// the authorize endpoint. On success the file's metadata is stamped with
    /// the trip context for the later completion report, and the issued
    /// descriptor is returned for the surface to perform the transfer.
    pub async fn request_authorization(
        &self,
        file: &mut UploadFile,
    ) -> HandshakeResult<UploadDescriptor> {
        let request = UploadAuthorizationRequest {
            filename: file.name.clone(),
            content_type: file.content_type.clone(),
            trip_uuid: self.trip.clone(),
        };
        request
            .validate()
            .map_err(|e| HandshakeError::InvalidRequest(e.to_string()))?;

        let descriptor: UploadDescriptor = self
            .post_json(&self.config.authorize_url, &request)
            .await?;

        file.meta.trip_uuid = Some(self.trip.clone());

        tracing::debug!(
            trip = %self.trip,
            filename = %file.name,
            method = ?descriptor.method,
            "Received upload descriptor"
        );

        Ok(descriptor)
    }

    /// Report a completed transfer to the backend.
    ///
    /// Reads the storage key and trip context from the file's metadata. The
    /// response body is ignored beyond a successful JSON parse. A failure
    /// here leaves the uploaded object without a backend record; nothing
    /// reconciles that.
    pub async fn report_success(&self, file: &UploadFile) -> HandshakeResult<()> {
        let s3_key = file
            .meta
            .key
            .clone()
            .ok_or(HandshakeError::MissingMeta("key"))?;
        let trip_uuid = file
            .meta
            .trip_uuid
            .clone()
            .ok_or(HandshakeError::MissingMeta("tripUUID"))?;

        let report = UploadCompletion { s3_key, trip_uuid };
        let _: serde_json::Value = self.post_json(&self.config.completion_url, &report).await?;

        tracing::info!(
            trip = %report.trip_uuid,
            key = %report.s3_key,
            "Reported upload completion"
        );

        Ok(())
    }
}

#[async_trait]
impl AuthorizationProvider for HandshakeClient {
    async fn upload_parameters(&self, file: &mut UploadFile) -> HandshakeResult<UploadDescriptor> {
        self.request_authorization(file).await
    }
}

#[async_trait]
impl CompletionReporter for HandshakeClient {
    async fn upload_succeeded(&self, file: &UploadFile) -> HandshakeResult<()> {
        self.report_success(file).await
    }
}
