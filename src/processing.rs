use crate::constants::{DEFAULT_JPEG_QUALITY, MAX_QUALITY, MAX_TARGET_DIMENSION, MIN_QUALITY};
use crate::error::{ResizeError, Result};
use crate::formats::ImageFileFormat;
use crate::interpolation::Interpolation;
use crate::utils::scale_dimension;
use crate::validation::validate_scale_factor;
use crate::verbose;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ColorType, DynamicImage, GenericImageView, ImageReader};
use std::borrow::Cow;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Everything a batch run needs to know, built once from the command line.
#[derive(Debug, Clone)]
pub struct ScaleRequest {
    pub root_directory: PathBuf,
    pub scale_factor: f64,
    pub interpolation: Interpolation,
    pub quality: u8,
    pub atomic: bool,
}

impl ScaleRequest {
    pub fn new(
        root_directory: impl Into<PathBuf>,
        scale_factor: f64,
        interpolation: Interpolation,
        quality: Option<u8>,
    ) -> Result<Self> {
        let scale_factor = validate_scale_factor(scale_factor)?;

        let quality = quality.unwrap_or(DEFAULT_JPEG_QUALITY);
        if !(MIN_QUALITY..=MAX_QUALITY).contains(&quality) {
            return Err(ResizeError::InvalidQuality(quality));
        }

        Ok(Self {
            root_directory: root_directory.into(),
            scale_factor,
            interpolation,
            quality,
            atomic: false,
        })
    }

    /// Write through a temp file in the same directory and rename it over
    /// the original instead of rewriting the file in place.
    pub fn with_atomic_writes(mut self, atomic: bool) -> Self {
        self.atomic = atomic;
        self
    }

    /// Size of a `width` x `height` image after scaling.
    pub fn target_dimensions(&self, width: u32, height: u32) -> Result<(u32, u32)> {
        let target_width = scale_dimension(width, self.scale_factor);
        let target_height = scale_dimension(height, self.scale_factor);

        if target_width < 1.0 || target_height < 1.0 {
            return Err(ResizeError::EmptyTarget(
                target_width as u64,
                target_height as u64,
            ));
        }

        let max = f64::from(MAX_TARGET_DIMENSION);
        if target_width > max || target_height > max {
            return Err(ResizeError::TargetTooLarge(
                target_width as u64,
                target_height as u64,
                MAX_TARGET_DIMENSION,
            ));
        }

        Ok((target_width as u32, target_height as u32))
    }
}

/// Properties of a decoded source image, reported alongside the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceInfo {
    pub width: u32,
    pub height: u32,
    pub channels: u8,
    pub color: ColorType,
}

impl SourceInfo {
    pub fn of(img: &DynamicImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            channels: img.color().channel_count(),
            color: img.color(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The file matched the filter but could not be decoded
    Unreadable(String),
    /// The scaled size is empty or too large
    InvalidTarget(String),
    /// Encoding or writing the resized image failed
    WriteFailed(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Unreadable(_) => write!(f, "unable to read"),
            SkipReason::InvalidTarget(detail) => write!(f, "{}", detail),
            SkipReason::WriteFailed(detail) => write!(f, "unable to write: {}", detail),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessingOutcome {
    Resized { width: u32, height: u32 },
    Skipped(SkipReason),
}

impl ProcessingOutcome {
    pub fn is_resized(&self) -> bool {
        matches!(self, ProcessingOutcome::Resized { .. })
    }
}

/// What happened to one file of the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    /// `None` when the file could not be decoded
    pub source: Option<SourceInfo>,
    pub outcome: ProcessingOutcome,
}

impl fmt::Display for FileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Processing {}", self.path.display())?;
        if let Some(source) = &self.source {
            write!(
                f,
                ", width = {}, height = {}, channels = {}, type = {:?}",
                source.width, source.height, source.channels, source.color
            )?;
        }
        match &self.outcome {
            ProcessingOutcome::Resized { width, height } => write!(f, " -> {}x{}", width, height),
            ProcessingOutcome::Skipped(reason) => write!(f, " - {}, skipping...", reason),
        }
    }
}

/// Decode an image without converting its channels or bit depth.
///
/// The format is sniffed from the content first and from the extension
/// second.
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    let reader = ImageReader::open(path)?
        .with_guessed_format()
        .map_err(ResizeError::Io)?;
    reader.decode().map_err(ResizeError::Decode)
}

/// Resample to exactly `width` x `height`. Same-size requests return the
/// image untouched.
pub fn resize_image(
    img: DynamicImage,
    width: u32,
    height: u32,
    interpolation: Interpolation,
) -> DynamicImage {
    if img.dimensions() == (width, height) {
        return img;
    }
    interpolation.resample(&img, width, height)
}

/// Encode `img` with the encoder for `format`.
///
/// JPEG only stores 8-bit gray or RGB, so deeper or alpha-carrying content is
/// narrowed first. PNG keeps the color type as decoded.
pub fn encode_image(img: &DynamicImage, format: ImageFileFormat, quality: u8) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let encoded = match format {
        ImageFileFormat::Jpeg => jpeg_compatible(img)
            .write_with_encoder(JpegEncoder::new_with_quality(&mut buffer, quality)),
        ImageFileFormat::Png => img.write_with_encoder(PngEncoder::new(&mut buffer)),
    };
    encoded.map_err(ResizeError::Encode)?;
    Ok(buffer)
}

/// Overwrite `path` with `img`, encoded for the path's extension.
///
/// The image is encoded in memory before the file is opened, so an encoder
/// error leaves the original untouched. Returns the number of bytes written.
pub fn save_image(img: &DynamicImage, path: &Path, request: &ScaleRequest) -> Result<u64> {
    let format = ImageFileFormat::from_path(path)
        .ok_or_else(|| ResizeError::UnsupportedFormat(path.display().to_string()))?;
    let bytes = encode_image(img, format, request.quality)?;

    if request.atomic {
        write_atomically(path, &bytes)?;
    } else {
        fs::write(path, &bytes)?;
    }

    Ok(bytes.len() as u64)
}

fn jpeg_compatible(img: &DynamicImage) -> Cow<'_, DynamicImage> {
    match img.color() {
        ColorType::L8 | ColorType::Rgb8 => Cow::Borrowed(img),
        ColorType::L16 | ColorType::La8 | ColorType::La16 => {
            Cow::Owned(DynamicImage::ImageLuma8(img.to_luma8()))
        }
        _ => Cow::Owned(DynamicImage::ImageRgb8(img.to_rgb8())),
    }
}

fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    // replace the file a symlink points at, not the link itself
    let target = fs::canonicalize(path)?;
    let dir = target.parent().unwrap_or_else(|| Path::new("."));
    let permissions = fs::metadata(&target)?.permissions();

    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(bytes)?;
    temp.as_file().sync_all()?;
    fs::set_permissions(temp.path(), permissions)?;
    temp.persist(&target).map_err(|e| ResizeError::Io(e.error))?;
    Ok(())
}

/// Decode, scale and overwrite a single file.
///
/// Never fails: every per-file problem becomes a skipped outcome so the
/// batch can move on to the next file.
pub fn resize_file(path: &Path, request: &ScaleRequest) -> FileReport {
    let img = match load_image(path) {
        Ok(img) => img,
        Err(e) => {
            verbose!("{}: {}", path.display(), e);
            return FileReport {
                path: path.to_path_buf(),
                source: None,
                outcome: ProcessingOutcome::Skipped(SkipReason::Unreadable(e.to_string())),
            };
        }
    };

    let source = SourceInfo::of(&img);
    let outcome = match scale_and_save(img, path, request) {
        Ok((width, height)) => ProcessingOutcome::Resized { width, height },
        Err(e @ (ResizeError::EmptyTarget(..) | ResizeError::TargetTooLarge(..))) => {
            ProcessingOutcome::Skipped(SkipReason::InvalidTarget(e.to_string()))
        }
        Err(e) => ProcessingOutcome::Skipped(SkipReason::WriteFailed(e.to_string())),
    };

    FileReport {
        path: path.to_path_buf(),
        source: Some(source),
        outcome,
    }
}

fn scale_and_save(img: DynamicImage, path: &Path, request: &ScaleRequest) -> Result<(u32, u32)> {
    let (width, height) = request.target_dimensions(img.width(), img.height())?;
    let resized = resize_image(img, width, height, request.interpolation);
    let written = save_image(&resized, path, request)?;
    verbose!("Wrote {} ({} bytes)", path.display(), written);
    Ok((width, height))
}
