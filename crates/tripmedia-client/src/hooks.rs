//! Capability interfaces between an upload surface and the handshake backend.
//!
//! An upload surface (a dashboard widget, the CLI pipeline) drives these
//! hooks: it asks an [`AuthorizationProvider`] for per-file upload parameters
//! before transferring, and notifies a [`CompletionReporter`] once a transfer
//! has succeeded. [`crate::HandshakeClient`] implements both against the
//! backend; tests substitute fakes.

use async_trait::async_trait;
use tripmedia_core::{UploadDescriptor, UploadFile};

use crate::error::HandshakeResult;

/// Issues one-time upload authorizations.
#[async_trait]
pub trait AuthorizationProvider: Send + Sync {
    /// Obtain upload parameters for a queued file.
    ///
    /// Implementations stamp the file's metadata with the trip context on
    /// success, so a later completion report carries the same identifier the
    /// authorization was requested with.
    async fn upload_parameters(&self, file: &mut UploadFile) -> HandshakeResult<UploadDescriptor>;
}

/// Records completed transfers with the backend.
#[async_trait]
pub trait CompletionReporter: Send + Sync {
    /// Notify the backend that `file` finished uploading.
    ///
    /// Only valid for files whose transfer succeeded with an issued
    /// descriptor; the storage key and trip context are read from the file's
    /// metadata.
    async fn upload_succeeded(&self, file: &UploadFile) -> HandshakeResult<()>;
}
