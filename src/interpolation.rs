use crate::error::{ResizeError, Result};
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};
use std::fmt;
use std::str::FromStr;

/// Resampling algorithm used when mapping the source grid onto the scaled one.
///
/// The numeric codes are the ones accepted by `--interpolation-method`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interpolation {
    Nearest,
    #[default]
    Bilinear,
    Bicubic,
    /// Pixel-area averaging. Only meaningful when shrinking.
    Area,
    Lanczos,
}

impl Interpolation {
    pub fn from_code(code: i64) -> Result<Self> {
        match code {
            0 => Ok(Interpolation::Nearest),
            1 => Ok(Interpolation::Bilinear),
            2 => Ok(Interpolation::Bicubic),
            3 => Ok(Interpolation::Area),
            4 => Ok(Interpolation::Lanczos),
            _ => Err(ResizeError::InvalidInterpolation(code)),
        }
    }

    pub fn code(self) -> i64 {
        match self {
            Interpolation::Nearest => 0,
            Interpolation::Bilinear => 1,
            Interpolation::Bicubic => 2,
            Interpolation::Area => 3,
            Interpolation::Lanczos => 4,
        }
    }

    fn filter(self) -> FilterType {
        match self {
            Interpolation::Nearest | Interpolation::Area => FilterType::Nearest,
            Interpolation::Bilinear => FilterType::Triangle,
            Interpolation::Bicubic => FilterType::CatmullRom,
            Interpolation::Lanczos => FilterType::Lanczos3,
        }
    }

    /// Resample `img` to exactly `width` x `height`, keeping its color type.
    pub fn resample(self, img: &DynamicImage, width: u32, height: u32) -> DynamicImage {
        let (src_width, src_height) = img.dimensions();
        if self == Interpolation::Area && width <= src_width && height <= src_height {
            return img.thumbnail_exact(width, height);
        }
        // Area falls back to nearest-neighbour when enlarging
        img.resize_exact(width, height, self.filter())
    }
}

impl FromStr for Interpolation {
    type Err = ResizeError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if let Ok(code) = trimmed.parse::<i64>() {
            return Interpolation::from_code(code);
        }
        match trimmed.to_lowercase().as_str() {
            "nearest" => Ok(Interpolation::Nearest),
            "bilinear" | "linear" => Ok(Interpolation::Bilinear),
            "bicubic" | "cubic" => Ok(Interpolation::Bicubic),
            "area" => Ok(Interpolation::Area),
            "lanczos" => Ok(Interpolation::Lanczos),
            _ => Err(ResizeError::UnknownInterpolation(s.to_string())),
        }
    }
}

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Interpolation::Nearest => "nearest",
            Interpolation::Bilinear => "bilinear",
            Interpolation::Bicubic => "bicubic",
            Interpolation::Area => "area",
            Interpolation::Lanczos => "lanczos",
        };
        write!(f, "{}", name)
    }
}
