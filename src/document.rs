//! Model document offered for download next to the calculator.
//!
//! The PDF is read once at startup and kept in memory. A missing file is not
//! fatal: scoring keeps working and the download route reports the problem.

use anyhow::{Context, Result};
use axum::body::Bytes;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// File name suggested to the browser.
pub const DOWNLOAD_FILE_NAME: &str = "Inflamacija_Celijski_Barometar_Stresa.pdf";
pub const CONTENT_TYPE: &str = "application/pdf";

#[derive(Debug, Clone)]
pub struct ModelDocument {
    path: PathBuf,
    bytes: Option<Bytes>,
}

impl ModelDocument {
    /// Read the document; on failure keep the path and log why.
    pub async fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        match read_bytes(&path).await {
            Ok(bytes) => {
                info!(path = %path.display(), size = bytes.len(), "model document loaded");
                Self {
                    path,
                    bytes: Some(bytes),
                }
            }
            Err(e) => {
                warn!(path = %path.display(), "model document unavailable: {e:#}");
                Self { path, bytes: None }
            }
        }
    }

    pub fn bytes(&self) -> Option<&Bytes> {
        self.bytes.as_ref()
    }

    pub fn is_available(&self) -> bool {
        self.bytes.is_some()
    }

    /// Message shown to the user when the file could not be read.
    pub fn missing_message(&self) -> String {
        format!(
            "model document '{}' was not found; place it next to the server binary",
            self.path.display()
        )
    }
}

async fn read_bytes(path: &Path) -> Result<Bytes> {
    let data = tokio::fs::read(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    Ok(Bytes::from(data))
}
