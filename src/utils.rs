//! Helpers shared by the batch and processing modules

use crate::constants::{PROGRESS_BAR_CHARS, PROGRESS_BAR_TEMPLATE};
use indicatif::{ProgressBar, ProgressStyle};

/// Progress bar for a batch of `len` files, drawn on stderr.
///
/// Returns a hidden bar in quiet mode so callers never need to branch.
pub fn create_progress_bar(len: u64) -> ProgressBar {
    if crate::logger::is_quiet() {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::with_template(PROGRESS_BAR_TEMPLATE)
            .map(|style| style.progress_chars(PROGRESS_BAR_CHARS))
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    pb
}

/// Scale one side of an image, rounding ties to the even neighbour.
///
/// Returned as `f64` so callers can range-check before narrowing.
pub fn scale_dimension(value: u32, scale_factor: f64) -> f64 {
    (f64::from(value) * scale_factor).round_ties_even()
}
