//! Filesystem-backed image storage.
//!
//! Uploaded files land in one flat directory under generated names of the form
//! `<timestamp-micros>-<original-filename>`. Records refer to them by public path
//! (`/<prefix>/<generated-name>`), which the HTTP layer serves statically.

use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tokio::task::JoinHandle;

/// Name used when the client sends a file part without a usable filename.
const FALLBACK_FILE_NAME: &str = "upload";

/// Result of storing one upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    /// Generated name inside the upload directory.
    pub file_name: String,
    /// Path clients use to fetch the file, e.g. `/uploads/<file_name>`.
    pub public_path: String,
}

#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
    prefix: String,
}

impl ImageStore {
    /// `prefix` is the route segment the directory is served under (without slashes).
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into().trim_matches('/').to_string(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the upload directory if it does not exist yet. Safe to call on every startup.
    pub async fn ensure_dir(&self) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await
    }

    /// Persist `bytes` under a generated unique name.
    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> io::Result<StoredImage> {
        let file_name = generated_name(Utc::now().timestamp_micros(), original_name);
        tokio::fs::write(self.dir.join(&file_name), bytes).await?;

        tracing::debug!(file = %file_name, size = bytes.len(), "stored upload");

        Ok(StoredImage {
            public_path: self.public_path(&file_name),
            file_name,
        })
    }

    /// Public path for a stored file. The name segment is percent-encoded so
    /// characters such as `#`, `?` and `%` survive as part of a URL.
    pub fn public_path(&self, file_name: &str) -> String {
        format!("/{}/{}", self.prefix, urlencoding::encode(file_name))
    }

    /// On-disk location of the file referenced by a stored public path.
    ///
    /// The last segment is percent-decoded and only its final path component
    /// is used, so a reference can never point outside the upload directory.
    pub fn path_for(&self, public_path: &str) -> Option<PathBuf> {
        let segment = public_path.rsplit('/').next()?;
        let decoded = urlencoding::decode(segment).ok()?;
        let name = Path::new(decoded.as_ref()).file_name()?;
        Some(self.dir.join(name))
    }

    /// Delete the file referenced by `public_path`.
    pub async fn remove(&self, public_path: &str) -> io::Result<()> {
        let path = self.path_for(public_path).ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("no file name in image path {public_path:?}"),
            )
        })?;
        tokio::fs::remove_file(path).await
    }

    /// Delete a file without making the caller wait on the outcome.
    ///
    /// Failures are logged and dropped. The returned handle may be ignored.
    pub fn remove_in_background(&self, public_path: String) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            match store.remove(&public_path).await {
                Ok(()) => tracing::debug!(image = %public_path, "removed image file"),
                Err(e) => tracing::warn!(image = %public_path, "image cleanup failed: {e}"),
            }
        })
    }
}

fn generated_name(timestamp: i64, original_name: &str) -> String {
    let base = Path::new(original_name)
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(FALLBACK_FILE_NAME);
    format!("{timestamp}-{base}")
}
