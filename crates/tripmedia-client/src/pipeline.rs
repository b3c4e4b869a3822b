//! Per-file upload pipeline: authorize, transfer, report.

use std::sync::Arc;

use futures::future::join_all;
use tripmedia_core::UploadFile;

use crate::error::HandshakeResult;
use crate::hooks::{AuthorizationProvider, CompletionReporter};
use crate::transfer::DirectTransfer;

/// Drives the handshake for queued files.
///
/// Each file runs authorize -> transfer -> report; a failure at any step
/// abandons that file, so a completion report is never sent for a file whose
/// transfer did not succeed. Files are independent of each other: batches run
/// their pipelines concurrently with no ordering guarantee between files and
/// no batching of requests.
pub struct UploadPipeline {
    provider: Arc<dyn AuthorizationProvider>,
    reporter: Arc<dyn CompletionReporter>,
    transfer: DirectTransfer,
}

impl UploadPipeline {
    pub fn new(
        provider: Arc<dyn AuthorizationProvider>,
        reporter: Arc<dyn CompletionReporter>,
    ) -> Self {
        Self {
            provider,
            reporter,
            transfer: DirectTransfer::new(),
        }
    }

    /// Pipeline where one [`crate::HandshakeClient`] plays both roles.
    pub fn for_client(client: crate::HandshakeClient) -> Self {
        let client = Arc::new(client);
        Self::new(client.clone(), client)
    }

    /// Upload one file end to end.
    pub async fn upload(&self, file: &mut UploadFile, data: Vec<u8>) -> HandshakeResult<()> {
        let descriptor = self.provider.upload_parameters(file).await?;
        self.transfer.send(&descriptor, file, data).await?;
        self.reporter.upload_succeeded(file).await?;
        Ok(())
    }

    /// Upload a batch concurrently. Results come back in input order; each
    /// file's outcome is independent of the others.
    pub async fn upload_all(
        &self,
        files: Vec<(UploadFile, Vec<u8>)>,
    ) -> Vec<(UploadFile, HandshakeResult<()>)> {
        join_all(files.into_iter().map(|(mut file, data)| async move {
            let result = self.upload(&mut file, data).await;
            (file, result)
        }))
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HandshakeError;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use tripmedia_core::{TripId, UploadDescriptor, UploadMethod};

    struct FixedProvider {
        descriptor: Option<UploadDescriptor>,
    }

    #[async_trait]
    impl AuthorizationProvider for FixedProvider {
        async fn upload_parameters(
            &self,
            file: &mut UploadFile,
        ) -> HandshakeResult<UploadDescriptor> {
            match &self.descriptor {
                Some(descriptor) => {
                    file.meta.trip_uuid = Some(TripId::new("trip-42"));
                    Ok(descriptor.clone())
                }
                None => Err(HandshakeError::Status {
                    status: reqwest::StatusCode::FORBIDDEN,
                    body: "denied".to_string(),
                }),
            }
        }
    }

    #[derive(Default)]
    struct RecordingReporter {
        reported: Mutex<Vec<(Option<String>, Option<String>)>>,
    }

    #[async_trait]
    impl CompletionReporter for RecordingReporter {
        async fn upload_succeeded(&self, file: &UploadFile) -> HandshakeResult<()> {
            self.reported
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .push((
                    file.meta.key.clone(),
                    file.meta.trip_uuid.as_ref().map(|t| t.as_str().to_string()),
                ));
            Ok(())
        }
    }

    fn descriptor_for(server: &mockito::ServerGuard, key: &str) -> UploadDescriptor {
        let mut fields = HashMap::new();
        fields.insert("key".to_string(), key.to_string());
        UploadDescriptor {
            method: UploadMethod::Put,
            url: format!("{}/store/{}", server.url(), key),
            fields,
            headers: HashMap::new(),
        }
    }

    #[tokio::test]
    async fn upload_reports_completion_after_transfer() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("PUT", "/store/obj-1")
            .with_status(200)
            .expect(1)
            .create_async()
            .await;

        let reporter = Arc::new(RecordingReporter::default());
        let pipeline = UploadPipeline::new(
            Arc::new(FixedProvider {
                descriptor: Some(descriptor_for(&server, "obj-1")),
            }),
            reporter.clone(),
        );

        let mut file = UploadFile::new("a.jpg", "image/jpeg", 3);
        pipeline.upload(&mut file, b"abc".to_vec()).await.unwrap();

        let reported = reporter.reported.lock().unwrap_or_else(|e| e.into_inner());
        assert_eq!(
            reported.as_slice(),
            [(Some("obj-1".to_string()), Some("trip-42".to_string()))]
        );
    }

    #[tokio::test]
    async fn failed_authorization_sends_no_completion_report() {
        let reporter = Arc::new(RecordingReporter::default());
        let pipeline = UploadPipeline::new(
            Arc::new(FixedProvider { descriptor: None }),
            reporter.clone(),
        );

        let mut file = UploadFile::new("a.jpg", "image/jpeg", 3);
        let err = pipeline.upload(&mut file, b"abc".to_vec()).await.unwrap_err();

        assert!(matches!(err, HandshakeError::Status { .. }));
        assert!(reporter
            .reported
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .is_empty());
    }

    #[tokio::test]
    async fn failed_transfer_sends_no_completion_report() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("PUT", "/store/obj-1")
            .with_status(500)
            .create_async()
            .await;

        let reporter = Arc::new(RecordingReporter::default());
        let pipeline = UploadPipeline::new(
            Arc::new(FixedProvider {
                descriptor: Some(descriptor_for(&server, "obj-1")),
            }),
            reporter.clone(),
        );

        let mut file = UploadFile::new("a.jpg", "image/jpeg", 3);
        assert!(pipeline.upload(&mut file, b"abc".to_vec()).await.is_err());
        assert!(reporter
            .reported
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .is_empty());
    }

    #[tokio::test]
    async fn upload_all_keeps_files_independent() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("PUT", "/store/obj-1")
            .with_status(200)
            .create_async()
            .await;
        server
            .mock("PUT", "/store/obj-2")
            .with_status(500)
            .create_async()
            .await;

        let reporter = Arc::new(RecordingReporter::default());

        // Each file gets its own authorization; simulate by racing two
        // pipelines over a shared reporter, one per descriptor.
        let ok_pipeline = UploadPipeline::new(
            Arc::new(FixedProvider {
                descriptor: Some(descriptor_for(&server, "obj-1")),
            }),
            reporter.clone(),
        );
        let failing_pipeline = UploadPipeline::new(
            Arc::new(FixedProvider {
                descriptor: Some(descriptor_for(&server, "obj-2")),
            }),
            reporter.clone(),
        );

        let ok_batch = ok_pipeline
            .upload_all(vec![(UploadFile::new("a.jpg", "image/jpeg", 3), b"abc".to_vec())])
            .await;
        let failed_batch = failing_pipeline
            .upload_all(vec![(UploadFile::new("b.jpg", "image/jpeg", 3), b"abc".to_vec())])
            .await;

        assert!(ok_batch[0].1.is_ok());
        assert_eq!(ok_batch[0].0.meta.key.as_deref(), Some("obj-1"));
        assert!(failed_batch[0].1.is_err());
        assert_eq!(
            reporter
                .reported
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .len(),
            1
        );
    }
}
