pub mod batch;
pub mod cli;
pub mod constants;
pub mod error;
pub mod formats;
pub mod interpolation;
pub mod logger;
pub mod processing;
pub mod utils;
pub mod validation;

pub use batch::{batch_resize_images, collect_image_files, BatchResizer, BatchSummary};
pub use cli::Args;
pub use error::{ResizeError, Result};
pub use formats::{is_image_file, ImageFileFormat};
pub use interpolation::Interpolation;
pub use processing::{
    encode_image, load_image, resize_file, resize_image, save_image, FileReport,
    ProcessingOutcome, ScaleRequest, SkipReason, SourceInfo,
};
