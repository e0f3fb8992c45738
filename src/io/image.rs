//! Image decoding into pixel buffers and PNG export

use crate::buffer::PixelBuffer;
use crate::io::error::{Result, SortError};
use std::path::Path;

/// Decode any supported image file into an RGBA pixel buffer
///
/// # Errors
///
/// Returns an image load error if the file can't be opened or decoded
pub fn load_image(path: &Path) -> Result<PixelBuffer> {
    let image = image::open(path).map_err(|e| SortError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(PixelBuffer::from_image(&image))
}

/// Save a pixel buffer, creating parent directories as needed
///
/// The encoding follows the file extension; sorted output uses PNG.
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or written to the specified path
pub fn save_image(buffer: &PixelBuffer, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| SortError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    buffer
        .to_image()
        .save(path)
        .map_err(|e| SortError::ImageExport {
            path: path.to_path_buf(),
            source: e,
        })
}
