//! # Image Store
//!
//! Team, news and event entries may carry one image. Uploads are written below
//! the configured upload directory as `<folder>/<folder>_<uuid>.<ext>` and
//! referenced from the database by their public path `/uploads/<folder>/<file>`,
//! which the server exposes as static files.
//!
//! Only JPEG, PNG and GIF uploads are kept. Any other content type is ignored
//! and the command carries on without an image.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use eyre::{Result, WrapErr};
use tracing::{debug, warn};
use uuid::Uuid;

/// Public URL prefix under which the upload directory is served.
pub const PUBLIC_PREFIX: &str = "/uploads";

/// Content types accepted for uploaded images, with the extension used on disk.
pub const ACCEPTED_IMAGE_TYPES: [(&str, &str); 3] = [
    ("image/jpeg", "jpg"),
    ("image/png", "png"),
    ("image/gif", "gif"),
];

/// An image file received in a multipart form.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadedImage {
    /// Extension to store the file under, or `None` if the type is not accepted.
    pub fn extension(&self) -> Option<&'static str> {
        let content_type = self.content_type.as_deref()?;
        ACCEPTED_IMAGE_TYPES
            .iter()
            .find(|(accepted, _)| accepted.eq_ignore_ascii_case(content_type))
            .map(|(_, extension)| *extension)
    }
}

/// Upload folder, one per entry kind that carries images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFolder {
    Team,
    News,
    Events,
}

impl ImageFolder {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageFolder::Team => "team",
            ImageFolder::News => "news",
            ImageFolder::Events => "events",
        }
    }
}

#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Stores an upload and returns its public path, or `None` when the
    /// upload is not an accepted image.
    async fn store(&self, folder: ImageFolder, image: &UploadedImage) -> Result<Option<String>>;

    /// Removes a previously stored image given its public path.
    async fn remove(&self, public_path: &str) -> Result<()>;
}

/// [`ImageStore`] writing to a directory on the local disk.
#[derive(Debug, Clone)]
pub struct LocalImageStore {
    root: PathBuf,
}

impl LocalImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a public path back to a file below the root. Paths outside the
    /// upload prefix or climbing out of it are rejected.
    pub fn resolve(&self, public_path: &str) -> Option<PathBuf> {
        let relative = public_path.strip_prefix(PUBLIC_PREFIX)?.strip_prefix('/')?;
        let relative = Path::new(relative);

        let is_plain = relative.components().count() > 0
            && relative
                .components()
                .all(|component| matches!(component, Component::Normal(_)));

        is_plain.then(|| self.root.join(relative))
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn store(&self, folder: ImageFolder, image: &UploadedImage) -> Result<Option<String>> {
        let Some(extension) = image.extension() else {
            warn!(
                "Ignoring upload {:?} with unsupported type {:?}",
                image.file_name, image.content_type
            );
            return Ok(None);
        };

        let directory = self.root.join(folder.as_str());
        tokio::fs::create_dir_all(&directory)
            .await
            .wrap_err_with(|| format!("Failed to create upload directory {}", directory.display()))?;

        let file_name = format!("{}_{}.{}", folder.as_str(), Uuid::new_v4().simple(), extension);
        let path = directory.join(&file_name);
        tokio::fs::write(&path, &image.bytes)
            .await
            .wrap_err_with(|| format!("Failed to write upload {}", path.display()))?;

        debug!("Stored {} bytes at {}", image.bytes.len(), path.display());

        Ok(Some(format!("{}/{}/{}", PUBLIC_PREFIX, folder.as_str(), file_name)))
    }

    async fn remove(&self, public_path: &str) -> Result<()> {
        let Some(path) = self.resolve(public_path) else {
            warn!("Refusing to remove image outside the upload directory: {}", public_path);
            return Ok(());
        };

        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                debug!("Removed image {}", path.display());
                Ok(())
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => {
                Err(err).wrap_err_with(|| format!("Failed to remove image {}", path.display()))
            }
        }
    }
}
