//! Uploaded file storage

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::fs;
use tracing::debug;
use uuid::Uuid;

/// Persists uploaded spreadsheets under unique names until the dispatcher
/// has processed and removed them.
#[derive(Clone, Debug)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    /// Create a store rooted at `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Write uploaded bytes to a uniquely named file, keeping the original
    /// extension so the spreadsheet reader can pick a parser.
    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("failed to create upload dir {}", self.dir.display()))?;

        let extension = Path::new(original_name)
            .extension()
            .and_then(OsStr::to_str)
            .map(|ext| format!(".{ext}"))
            .unwrap_or_default();

        let path = self.dir.join(format!("upload-{}{}", Uuid::now_v7(), extension));

        fs::write(&path, bytes)
            .await
            .with_context(|| format!("failed to write upload {}", path.display()))?;

        debug!(path = %path.display(), "stored uploaded file");

        Ok(path)
    }
}
