use actix_multipart::Field;
use futures_util::StreamExt;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::models::media::{Kind, MAX_UPLOAD_BYTES};

/// Why an upload was rejected or failed.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("File is too large")]
    TooLarge,
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),
    #[error("Missing content type")]
    MissingContentType,
    #[error("Upload stream error: {0}")]
    Stream(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A fully written upload, ready to be recorded as a media row.
#[derive(Debug, Clone)]
pub struct StoredUpload {
    pub file_name: String,
    pub mime_type: String,
    pub kind: Kind,
    /// Path relative to the uploads root, e.g. `images/<uuid>.png`.
    pub relative_path: String,
    pub size_bytes: i64,
}

/// Local-disk media store rooted at the uploads directory.
///
/// Files land under `{root}/{images,videos,audio,misc}/<uuid>[.ext]`; the
/// same root is served statically at `/uploads`.
#[derive(Clone)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Create the kind subdirectories; called once at startup.
    pub async fn ensure_dirs(&self) -> std::io::Result<()> {
        for kind in [Kind::Image, Kind::Video, Kind::Audio, Kind::Misc] {
            fs::create_dir_all(self.root.join(kind.subdir())).await?;
        }
        Ok(())
    }

    /// Stream one multipart field to disk, enforcing the size limit and the
    /// mime whitelist. On any failure the partial file is removed — a media
    /// row is only ever written for a fully stored file.
    pub async fn store_field(&self, field: &mut Field) -> Result<StoredUpload, UploadError> {
        let mime_type = field
            .content_type()
            .map(|m| m.to_string())
            .ok_or(UploadError::MissingContentType)?;

        let kind =
            Kind::from_mime(&mime_type).ok_or_else(|| UploadError::UnsupportedType(mime_type.clone()))?;

        let original_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .unwrap_or("upload")
            .to_string();

        let ext = Path::new(&original_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{e}"))
            .unwrap_or_default();

        let relative_path = format!("{}/{}{ext}", kind.subdir(), Uuid::new_v4());
        let full_path = self.root.join(&relative_path);

        let mut file = fs::File::create(&full_path).await?;
        let mut size: u64 = 0;

        while let Some(chunk) = field.next().await {
            let chunk = match chunk {
                Ok(c) => c,
                Err(e) => {
                    self.discard(&full_path).await;
                    return Err(UploadError::Stream(e.to_string()));
                }
            };

            size += chunk.len() as u64;
            if size > MAX_UPLOAD_BYTES {
                self.discard(&full_path).await;
                return Err(UploadError::TooLarge);
            }

            if let Err(e) = file.write_all(&chunk).await {
                self.discard(&full_path).await;
                return Err(e.into());
            }
        }

        file.flush().await?;

        Ok(StoredUpload {
            file_name: original_name,
            mime_type,
            kind,
            relative_path,
            size_bytes: size as i64,
        })
    }

    /// Remove a stored file by its relative path (media delete path).
    pub async fn remove(&self, relative_path: &str) -> std::io::Result<()> {
        fs::remove_file(self.root.join(relative_path)).await
    }

    async fn discard(&self, full_path: &Path) {
        let _ = fs::remove_file(full_path).await;
    }
}
