use crate::constants::AUTO_JOBS;
use crate::error::Result;
use crate::formats::is_image_file;
use crate::processing::{resize_file, FileReport, ProcessingOutcome, ScaleRequest, SkipReason};
use crate::utils::create_progress_bar;
use crate::validation::validate_root_directory;
use crate::{info, warn};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use walkdir::WalkDir;

/// Walks a directory tree and rescales every matching image in place.
pub struct BatchResizer {
    request: ScaleRequest,
    jobs: usize,
}

impl BatchResizer {
    /// `jobs` of 1 processes files one after another; 0 uses every core.
    pub fn new(request: ScaleRequest, jobs: usize) -> Self {
        let jobs = if jobs == AUTO_JOBS { num_cpus::get() } else { jobs };
        Self { request, jobs }
    }

    pub fn jobs(&self) -> usize {
        self.jobs
    }

    /// Process every image under the request's root directory.
    ///
    /// Fails only if the root cannot be traversed, and then before any file
    /// is touched. Per-file problems are reported in the returned list, which
    /// is in traversal order. Status lines are printed as files finish.
    pub fn run(&self) -> Result<Vec<FileReport>> {
        let root = validate_root_directory(&self.request.root_directory)?;

        info!("Searching for images in {} ...", root.display());
        let image_files = collect_image_files(&root)?;
        info!("Found {} files, now resizing ...", image_files.len());
        if image_files.is_empty() {
            warn!("No .jpeg, .jpg or .png files under {}", root.display());
        }

        let progress = create_progress_bar(image_files.len() as u64);
        let process = |path: &PathBuf| {
            let report = resize_file(path, &self.request);
            progress.suspend(|| info!("{}", report));
            progress.inc(1);
            report
        };

        let reports: Vec<FileReport> = if self.jobs <= 1 {
            image_files.iter().map(&process).collect()
        } else {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.jobs)
                .build()?;
            pool.install(|| image_files.par_iter().map(&process).collect::<Vec<_>>())
        };

        progress.finish_and_clear();
        Ok(reports)
    }
}

/// Recursively list every file under `root` whose name has an accepted suffix.
///
/// Entries are sorted by file name within each directory. Hidden files and
/// directories are included, and symlinks are followed. Any traversal error,
/// including a symlink loop, aborts the listing.
pub fn collect_image_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut image_files = Vec::new();

    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() && is_image_file(entry.path()) {
            image_files.push(entry.into_path());
        }
    }

    Ok(image_files)
}

/// Tally of a finished batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub resized: usize,
    pub unreadable: usize,
    pub invalid_target: usize,
    pub write_failed: usize,
    pub elapsed: Duration,
}

impl BatchSummary {
    pub fn from_reports(reports: &[FileReport], elapsed: Duration) -> Self {
        let mut summary = Self {
            elapsed,
            ..Self::default()
        };
        for report in reports {
            match &report.outcome {
                ProcessingOutcome::Resized { .. } => summary.resized += 1,
                ProcessingOutcome::Skipped(SkipReason::Unreadable(_)) => summary.unreadable += 1,
                ProcessingOutcome::Skipped(SkipReason::InvalidTarget(_)) => {
                    summary.invalid_target += 1
                }
                ProcessingOutcome::Skipped(SkipReason::WriteFailed(_)) => summary.write_failed += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.resized + self.skipped()
    }

    pub fn skipped(&self) -> usize {
        self.unreadable + self.invalid_target + self.write_failed
    }

    pub fn print(&self) {
        info!("\n📊 Batch Resize Summary:");
        info!("  📁 Total files: {}", self.total());
        info!("  ✅ Resized: {}", self.resized);
        if self.skipped() > 0 {
            info!("  ⚠️  Unreadable: {}", self.unreadable);
            info!("  ⚠️  Invalid target size: {}", self.invalid_target);
            info!("  ⚠️  Write failures: {}", self.write_failed);
        }
        info!("  ⏱️  Total time: {:?}", self.elapsed);
    }
}

/// Run a batch and print its summary.
pub fn batch_resize_images(request: ScaleRequest, jobs: usize) -> Result<BatchSummary> {
    let start_time = Instant::now();
    let resizer = BatchResizer::new(request, jobs);

    let reports = resizer.run()?;
    let summary = BatchSummary::from_reports(&reports, start_time.elapsed());
    summary.print();

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResizeError;
    use crate::interpolation::Interpolation;
    use std::fs::{self, File};
    use tempfile::TempDir;

    fn names(files: &[PathBuf], root: &Path) -> Vec<String> {
        files
            .iter()
            .map(|f| f.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn test_collect_image_files_recursive_and_filtered() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("sub/deeper")).unwrap();

        File::create(root.join("b.png")).unwrap();
        File::create(root.join("a.jpg")).unwrap();
        File::create(root.join("notes.txt")).unwrap();
        File::create(root.join("upper.JPG")).unwrap();
        File::create(root.join("sub/c.jpeg")).unwrap();
        File::create(root.join("sub/deeper/d.png")).unwrap();
        File::create(root.join("sub/deeper/e.webp")).unwrap();

        let files = collect_image_files(root).unwrap();
        assert_eq!(
            names(&files, root),
            vec!["a.jpg", "b.png", "sub/c.jpeg", "sub/deeper/d.png"]
        );
    }

    #[test]
    fn test_collect_image_files_skips_directories_with_image_names() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir(root.join("album.png")).unwrap();
        File::create(root.join("album.png/inner.png")).unwrap();

        let files = collect_image_files(root).unwrap();
        assert_eq!(names(&files, root), vec!["album.png/inner.png"]);
    }

    #[test]
    fn test_collect_image_files_includes_hidden() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir(root.join(".cache")).unwrap();
        File::create(root.join(".cache/thumb.png")).unwrap();

        let files = collect_image_files(root).unwrap();
        assert_eq!(files.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_names_are_listed_and_resized() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let path = root.join(OsStr::from_bytes(b"caf\xE9.png"));
        image::DynamicImage::new_rgb8(10, 10).save(&path).unwrap();

        assert_eq!(collect_image_files(root).unwrap(), vec![path.clone()]);

        let request = ScaleRequest::new(root, 2.0, Interpolation::Bilinear, None).unwrap();
        let reports = BatchResizer::new(request, 1).run().unwrap();
        assert_eq!(reports.len(), 1);
        assert!(reports[0].outcome.is_resized());
        assert_eq!(image::image_dimensions(&path).unwrap(), (20, 20));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_images_are_followed() {
        let temp_dir = TempDir::new().unwrap();
        let outside = temp_dir.path().join("outside");
        let root = temp_dir.path().join("root");
        fs::create_dir_all(&outside).unwrap();
        fs::create_dir_all(&root).unwrap();
        let real = outside.join("real.png");
        image::DynamicImage::new_rgb8(10, 10).save(&real).unwrap();
        std::os::unix::fs::symlink(&real, root.join("link.png")).unwrap();

        let files = collect_image_files(&root).unwrap();
        assert_eq!(names(&files, &root), vec!["link.png"]);

        let request = ScaleRequest::new(&root, 0.5, Interpolation::Area, None).unwrap();
        BatchResizer::new(request, 1).run().unwrap();
        assert_eq!(image::image_dimensions(&real).unwrap(), (5, 5));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_loop_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir(root.join("sub")).unwrap();
        std::os::unix::fs::symlink(root, root.join("sub/back")).unwrap();

        assert!(matches!(
            collect_image_files(root),
            Err(ResizeError::WalkdirError(_))
        ));
    }

    #[test]
    fn test_collect_image_files_empty() {
        let temp_dir = TempDir::new().unwrap();
        assert!(collect_image_files(temp_dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_run_missing_root_is_fatal() {
        let request =
            ScaleRequest::new("/nonexistent/photos", 2.0, Interpolation::Bilinear, None).unwrap();
        let result = BatchResizer::new(request, 1).run();
        assert!(matches!(result, Err(ResizeError::DirectoryNotFound(_))));
    }

    #[test]
    fn test_jobs_auto_uses_all_cores() {
        let request = ScaleRequest::new(".", 1.0, Interpolation::Nearest, None).unwrap();
        assert_eq!(BatchResizer::new(request.clone(), 0).jobs(), num_cpus::get());
        assert_eq!(BatchResizer::new(request, 3).jobs(), 3);
    }

    #[test]
    fn test_summary_counts() {
        let report = |outcome| FileReport {
            path: PathBuf::from("x.png"),
            source: None,
            outcome,
        };
        let reports = vec![
            report(ProcessingOutcome::Resized {
                width: 2,
                height: 2,
            }),
            report(ProcessingOutcome::Skipped(SkipReason::Unreadable(
                "bad".to_string(),
            ))),
            report(ProcessingOutcome::Skipped(SkipReason::WriteFailed(
                "disk full".to_string(),
            ))),
        ];

        let summary = BatchSummary::from_reports(&reports, Duration::from_secs(1));
        assert_eq!(summary.resized, 1);
        assert_eq!(summary.unreadable, 1);
        assert_eq!(summary.write_failed, 1);
        assert_eq!(summary.invalid_target, 0);
        assert_eq!(summary.skipped(), 2);
        assert_eq!(summary.total(), 3);
    }
}
