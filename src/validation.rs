use crate::error::{ResizeError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Check that the batch root exists, is a directory and can be listed.
///
/// Runs before traversal so that a bad root never touches any file.
pub fn validate_root_directory(path: &Path) -> Result<PathBuf> {
    if !path.exists() {
        return Err(ResizeError::DirectoryNotFound(path.to_path_buf()));
    }

    if !path.is_dir() {
        return Err(ResizeError::NotADirectory(path.to_path_buf()));
    }

    fs::read_dir(path).map_err(|source| ResizeError::DirectoryInaccessible {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(path.to_path_buf())
}

/// Scale factors must be finite and strictly positive.
pub fn validate_scale_factor(scale_factor: f64) -> Result<f64> {
    if !scale_factor.is_finite() || scale_factor <= 0.0 {
        return Err(ResizeError::InvalidScaleFactor(scale_factor));
    }
    Ok(scale_factor)
}
