pub const DEFAULT_INTERPOLATION: &str = "1";

pub const DEFAULT_JPEG_QUALITY: u8 = 95;
pub const MIN_QUALITY: u8 = 1;
pub const MAX_QUALITY: u8 = 100;

/// Largest width or height a scaled image may have.
pub const MAX_TARGET_DIMENSION: u32 = 65_535;

/// `--jobs` value meaning "one thread per CPU core".
pub const AUTO_JOBS: usize = 0;
pub const DEFAULT_JOBS: usize = 1;

pub const EXIT_USAGE: u8 = 1;
pub const EXIT_CONFIGURATION_ERROR: u8 = 255;

pub const USAGE: &str = "Usage: \n> resize-images -d=/path/to/images -s=0.5";

pub const PROGRESS_BAR_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}";
pub const PROGRESS_BAR_CHARS: &str = "#>-";
