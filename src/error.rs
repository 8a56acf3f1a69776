use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResizeError {
    #[error("Invalid scaling factor: {0}. Must be a finite number greater than 0")]
    InvalidScaleFactor(f64),

    #[error("Invalid interpolation method: {0}. Must be between 0 and 4")]
    InvalidInterpolation(i64),

    #[error("Unknown interpolation method: {0}. Try nearest, bilinear, bicubic, area or lanczos")]
    UnknownInterpolation(String),

    #[error("Invalid quality value: {0}. Must be between 1 and 100")]
    InvalidQuality(u8),

    #[error("Directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Directory not accessible: {path}: {source}")]
    DirectoryInaccessible {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Walkdir error: {0}")]
    WalkdirError(#[from] walkdir::Error),

    #[error("Failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unable to decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Unable to encode image: {0}")]
    Encode(#[source] image::ImageError),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Scaled size {0}x{1} is empty")]
    EmptyTarget(u64, u64),

    #[error("Scaled size {0}x{1} exceeds the maximum of {2}x{2}")]
    TargetTooLarge(u64, u64, u32),
}

impl ResizeError {
    /// Errors that abort the whole run before any file is rewritten.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            ResizeError::InvalidScaleFactor(_)
                | ResizeError::InvalidInterpolation(_)
                | ResizeError::UnknownInterpolation(_)
                | ResizeError::InvalidQuality(_)
                | ResizeError::DirectoryNotFound(_)
                | ResizeError::NotADirectory(_)
                | ResizeError::DirectoryInaccessible { .. }
                | ResizeError::WalkdirError(_)
                | ResizeError::ThreadPool(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ResizeError>;
