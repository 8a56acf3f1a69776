//! Image file formats accepted by the batch
//!
//! Files are selected and re-encoded by the suffix of their file name, so a
//! `.jpg` file is always written back as JPEG even if its content was
//! something else.

use std::fmt;
use std::path::Path;

/// Formats a matched file can be written back as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFileFormat {
    /// JPEG, encoded with the request's quality setting
    Jpeg,
    /// PNG, lossless
    Png,
}

/// Accepted file-name suffixes. Matching is case-sensitive.
const SUFFIX_FORMATS: &[(&str, ImageFileFormat)] = &[
    (".jpeg", ImageFileFormat::Jpeg),
    (".jpg", ImageFileFormat::Jpeg),
    (".png", ImageFileFormat::Png),
];

impl ImageFileFormat {
    /// Resolve the format from the file name's suffix
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.as_encoded_bytes();
        SUFFIX_FORMATS
            .iter()
            .find(|(suffix, _)| name.ends_with(suffix.as_bytes()))
            .map(|(_, format)| *format)
    }
}

impl fmt::Display for ImageFileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ImageFileFormat::Jpeg => "JPEG",
            ImageFileFormat::Png => "PNG",
        };
        write!(f, "{}", name)
    }
}

/// Whether a path names a file the batch should process
pub fn is_image_file(path: &Path) -> bool {
    ImageFileFormat::from_path(path).is_some()
}
