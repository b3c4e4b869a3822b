use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use validator::Validate;

/// Opaque identifier correlating an upload to a trip on the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TripId(String);

impl TripId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Request for a scoped upload authorization. Field names match the backend
/// wire format.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UploadAuthorizationRequest {
    /// Original filename
    #[validate(length(
        min = 1,
        max = 255,
        message = "Filename must be between 1 and 255 characters"
    ))]
    pub filename: String,
    /// Content type (MIME type)
    #[serde(rename = "contentType")]
    #[validate(length(
        min = 1,
        max = 255,
        message = "Content type must be between 1 and 255 characters"
    ))]
    pub content_type: String,
    /// Trip the upload belongs to
    #[serde(rename = "tripUUID")]
    pub trip_uuid: TripId,
}

/// HTTP method a descriptor authorizes for the direct-to-storage write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UploadMethod {
    Put,
    Post,
}

/// The method/URL/fields/headers bundle authorizing a single
/// direct-to-storage write. Consumed by exactly one transfer and discarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadDescriptor {
    pub method: UploadMethod,
    pub url: String,
    /// Form fields to include in a POST upload
    #[serde(default)]
    pub fields: HashMap<String, String>,
    /// Headers required on the upload request
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

/// Completion report for an object that finished uploading. Sent once; no
/// retry state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadCompletion {
    /// Storage key assigned to the uploaded object
    #[serde(rename = "s3Key")]
    pub s3_key: String,
    /// Trip the upload was authorized for
    #[serde(rename = "tripUUID")]
    pub trip_uuid: TripId,
}

/// Metadata stamped onto a file as the handshake progresses.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadMeta {
    /// Storage key, known once the transfer has succeeded.
    pub key: Option<String>,
    /// Trip context, stamped when authorization is requested.
    pub trip_uuid: Option<TripId>,
}

/// A file queued for upload. Per-file and ephemeral; never persisted.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub name: String,
    pub content_type: String,
    /// Size in bytes, used only for restriction checks.
    pub size: u64,
    pub meta: UploadMeta,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            size,
            meta: UploadMeta::default(),
        }
    }
}
