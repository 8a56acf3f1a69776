use crate::constants::{DEFAULT_INTERPOLATION, DEFAULT_JOBS};
use crate::error::Result;
use crate::interpolation::Interpolation;
use crate::logger::Verbosity;
use crate::processing::ScaleRequest;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "resize-images",
    about = "Batch-resize images",
    long_about = "resize-images walks a directory tree and rescales every .jpeg, .jpg and .png file \
                  by a fixed factor, overwriting each file in place. Files that cannot be decoded \
                  are reported and skipped; the rest of the batch carries on.",
    version,
    after_help = "EXAMPLES:\n  \
    resize-images -d ./photos -s 0.5\n  \
    resize-images -d=./icons -s=2 -i 0\n  \
    resize-images --directory ./scans --scaling-factor 0.25 --interpolation-method area -j 0"
)]
pub struct Args {
    #[arg(
        short = 'd',
        long,
        value_name = "PATH",
        help = "The directory where to search for input files"
    )]
    pub directory: PathBuf,

    #[arg(
        short = 's',
        long = "scaling-factor",
        value_name = "FACTOR",
        allow_negative_numbers = true,
        help = "Try >1 to upscale, and <1 to downscale"
    )]
    pub scaling_factor: f64,

    #[arg(
        short = 'i',
        long = "interpolation-method",
        value_name = "METHOD",
        default_value = DEFAULT_INTERPOLATION,
        allow_negative_numbers = true,
        help = "Try 0 for nearest neighbor, 1 for bilinear, 2 for bicubic, 3 for pixel area, or 4 for Lanczos",
        long_help = "Resampling method, by code or name: 0/nearest, 1/bilinear, 2/bicubic, \
                     3/area (pixel-area averaging when shrinking), 4/lanczos."
    )]
    pub interpolation_method: String,

    #[arg(
        short = 'q',
        long,
        help = "JPEG quality (1-100, default: 95)",
        long_help = "Quality used when re-encoding .jpg and .jpeg files. PNG files are always lossless."
    )]
    pub quality: Option<u8>,

    #[arg(
        short = 'j',
        long,
        default_value_t = DEFAULT_JOBS,
        help = "Number of files to process in parallel (0 = one per CPU core)"
    )]
    pub jobs: usize,

    #[arg(
        long,
        help = "Write through a temporary file and rename it over the original",
        long_help = "Write each resized image to a temporary file in the same directory and rename it \
                     over the original, so an interrupted write never leaves a truncated image."
    )]
    pub atomic: bool,

    #[arg(long, conflicts_with = "verbose", help = "Only print errors")]
    pub quiet: bool,

    #[arg(short = 'v', long, help = "Print decode errors and written sizes")]
    pub verbose: bool,
}

impl Args {
    /// Validate the parsed flags into an immutable request.
    pub fn to_request(&self) -> Result<ScaleRequest> {
        let interpolation: Interpolation = self.interpolation_method.parse()?;
        Ok(ScaleRequest::new(
            self.directory.clone(),
            self.scaling_factor,
            interpolation,
            self.quality,
        )?
        .with_atomic_writes(self.atomic))
    }

    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }
}
