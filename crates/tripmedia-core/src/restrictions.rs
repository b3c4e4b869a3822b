//! Upload restriction policy.
//!
//! Display-time limits passed through to an upload surface before any
//! handshake begins. These are policy, not correctness constraints of the
//! handshake itself; the unrestricted default is equally valid.

use crate::error::AppError;
use crate::models::upload::UploadFile;

const PHOTO_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;
const PHOTO_MAX_FILES: usize = 40;

/// Limits applied to a batch of queued files. Empty/`None` values disable
/// the corresponding check.
#[derive(Debug, Clone, Default)]
pub struct UploadRestrictions {
    /// Maximum size per file, in bytes.
    pub max_file_size: Option<u64>,
    /// Maximum number of files per batch.
    pub max_files: Option<usize>,
    /// Allowed MIME patterns, exact (`image/png`) or wildcard (`image/*`).
    pub allowed_content_types: Vec<String>,
}

impl UploadRestrictions {
    /// Preset used by the photo gallery surface: images only, 10 MiB per
    /// file, 40 files per batch.
    pub fn photo_gallery() -> Self {
        Self {
            max_file_size: Some(PHOTO_MAX_FILE_SIZE),
            max_files: Some(PHOTO_MAX_FILES),
            allowed_content_types: vec!["image/*".to_string()],
        }
    }

    /// Check a single file against the size and content-type limits.
    pub fn check_file(&self, file: &UploadFile) -> Result<(), AppError> {
        if let Some(max) = self.max_file_size {
            if file.size > max {
                return Err(AppError::PayloadTooLarge(format!(
                    "{} is {} bytes, limit is {} bytes",
                    file.name, file.size, max
                )));
            }
        }

        if !self.allowed_content_types.is_empty()
            && !self
                .allowed_content_types
                .iter()
                .any(|pattern| matches_pattern(pattern, &file.content_type))
        {
            return Err(AppError::InvalidInput(format!(
                "{}: content type {} is not allowed",
                file.name, file.content_type
            )));
        }

        Ok(())
    }

    /// Check a batch before any upload starts.
    pub fn check_files(&self, files: &[UploadFile]) -> Result<(), AppError> {
        if let Some(max) = self.max_files {
            if files.len() > max {
                return Err(AppError::InvalidInput(format!(
                    "{} files queued, limit is {}",
                    files.len(),
                    max
                )));
            }
        }

        for file in files {
            self.check_file(file)?;
        }

        Ok(())
    }
}

/// Match a content type against an exact MIME type or a `type/*` wildcard.
fn matches_pattern(pattern: &str, content_type: &str) -> bool {
    match pattern.strip_suffix("/*") {
        Some(prefix) => content_type
            .split('/')
            .next()
            .is_some_and(|main| main.eq_ignore_ascii_case(prefix)),
        None => pattern.eq_ignore_ascii_case(content_type),
    }
}
