//! Helpers shared by the tripmedia binary.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tripmedia_core::UploadFile;

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

/// Build an [`UploadFile`] for a local path, guessing the content type from
/// the file extension.
pub fn file_from_path(path: &Path) -> Result<UploadFile> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow::anyhow!("Invalid file name: {}", path.display()))?;

    let metadata = std::fs::metadata(path)
        .with_context(|| format!("Failed to stat file: {}", path.display()))?;

    let content_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .to_string();

    Ok(UploadFile::new(name, content_type, metadata.len()))
}

/// Location of the preference file: explicit flag, then `TRIPMEDIA_PREFS`,
/// then `~/.tripmedia/prefs.json` (falling back to the working directory
/// when HOME is unset).
pub fn prefs_path(flag: Option<PathBuf>) -> PathBuf {
    if let Some(path) = flag {
        return path;
    }
    if let Ok(path) = std::env::var("TRIPMEDIA_PREFS") {
        return PathBuf::from(path);
    }
    match std::env::var("HOME") {
        Ok(home) => Path::new(&home).join(".tripmedia").join("prefs.json"),
        Err(_) => PathBuf::from(".tripmedia/prefs.json"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn file_from_path_guesses_content_type_and_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.jpg");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(b"abc").unwrap();

        let file = file_from_path(&path).unwrap();
        assert_eq!(file.name, "photo.jpg");
        assert_eq!(file.content_type, "image/jpeg");
        assert_eq!(file.size, 3);
    }

    #[test]
    fn file_from_path_defaults_to_octet_stream() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.unknownext");
        std::fs::File::create(&path).unwrap();

        let file = file_from_path(&path).unwrap();
        assert_eq!(file.content_type, "application/octet-stream");
    }

    #[test]
    fn file_from_path_missing_file_errors() {
        assert!(file_from_path(Path::new("/nonexistent/a.jpg")).is_err());
    }

    #[test]
    fn prefs_path_prefers_explicit_flag() {
        let flag = PathBuf::from("/tmp/custom-prefs.json");
        assert_eq!(prefs_path(Some(flag.clone())), flag);
    }
}
