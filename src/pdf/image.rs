use std::path::Path;

use crate::errors::ServiceError;

/// File checks and pixel size lookups for images placed on documents.
pub trait ImageProbe: Send + Sync {
    fn exists(&self, path: &Path) -> bool;

    /// `(width, height)` in pixels.
    fn dimensions(&self, path: &Path) -> Result<(u32, u32), ServiceError>;
}

/// Reads images from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsImageProbe;

impl ImageProbe for FsImageProbe {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn dimensions(&self, path: &Path) -> Result<(u32, u32), ServiceError> {
        let size = imagesize::size(path)
            .map_err(|e| ServiceError::ImageError(format!("{}: {}", path.display(), e)))?;

        let width = u32::try_from(size.width)
            .map_err(|_| ServiceError::ImageError(format!("{}: width overflow", path.display())))?;
        let height = u32::try_from(size.height)
            .map_err(|_| ServiceError::ImageError(format!("{}: height overflow", path.display())))?;
        Ok((width, height))
    }
}
