// resize-batch/src/processors/batch.rs
use crate::core::{ImageProcessor, ProcessingStats, ResizeConfig, ResizeError, Result};
use crate::utils::{calculate_savings, format_file_size, is_jpeg_path};
use indicatif::{ProgressBar, ProgressIterator, ProgressStyle};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// JPEG files directly inside a directory, in file-name order.
///
/// Listing is lazy and starts over on every call to [`JpegFiles::iter`].
#[derive(Debug, Clone)]
pub struct JpegFiles {
    dir: PathBuf,
    case_sensitive: bool,
}

impl JpegFiles {
    pub fn new(dir: impl Into<PathBuf>, case_sensitive: bool) -> Self {
        Self {
            dir: dir.into(),
            case_sensitive,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = PathBuf> + '_ {
        WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    log::warn!("Skipping unreadable entry: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(move |path| is_jpeg_path(path, self.case_sensitive))
    }
}

impl<'a> IntoIterator for &'a JpegFiles {
    type Item = PathBuf;
    type IntoIter = Box<dyn Iterator<Item = PathBuf> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

pub struct BatchProcessor {
    config: ResizeConfig,
    processor: ImageProcessor,
    show_progress: bool,
}

impl BatchProcessor {
    pub fn new(config: ResizeConfig) -> Result<Self> {
        config.validate()?;
        let processor = ImageProcessor::new(config.clone());
        Ok(Self {
            config,
            processor,
            show_progress: true,
        })
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn process_directory(&self, input_dir: &Path, output_dir: &Path) -> Result<ProcessingStats> {
        self.validate_paths(input_dir, output_dir)?;

        std::fs::create_dir_all(output_dir)?;

        let files = JpegFiles::new(input_dir, self.config.case_sensitive);
        let total = files.iter().count();

        if total == 0 {
            log::warn!("No JPEG files found in {}", input_dir.display());
            return Ok(ProcessingStats::default());
        }

        log::info!(
            "Processing {} images from {} into {}",
            total,
            input_dir.display(),
            output_dir.display()
        );

        let pb = self.create_progress_bar(total);
        let mut stats = ProcessingStats::default();

        // Sequential on purpose: one decoded image in memory at a time
        for input_path in files.iter().progress_with(pb.clone()) {
            let output_path = match input_path.file_name() {
                Some(name) => output_dir.join(name),
                None => continue,
            };

            match self.processor.process(&input_path, &output_path) {
                Ok(report) => stats.record(&report),
                Err(e) if self.config.keep_going => {
                    log::error!("{}", e);
                    stats.errors.push((input_path.display().to_string(), e.to_string()));
                }
                Err(e) => {
                    pb.abandon();
                    return Err(e);
                }
            }
        }

        pb.finish_and_clear();

        log::info!(
            "Processed {} images ({} resized, {} left as is, {} failed): {} -> {} ({:.1}% saved)",
            stats.processed_count,
            stats.resized_count,
            stats.skipped_count,
            stats.errors.len(),
            format_file_size(stats.total_size_before),
            format_file_size(stats.total_size_after),
            calculate_savings(stats.total_size_before, stats.total_size_after)
        );

        if stats.grown_count > 0 {
            log::warn!("{} output files are larger than their source", stats.grown_count);
        }

        Ok(stats)
    }

    fn create_progress_bar(&self, total: usize) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(total as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb
    }

    pub fn validate_paths(&self, input_dir: &Path, output_dir: &Path) -> Result<()> {
        if !input_dir.is_dir() {
            return Err(ResizeError::InvalidParameter(format!(
                "Source is not a directory: {}",
                input_dir.display()
            )));
        }

        if output_dir.exists() && !output_dir.is_dir() {
            return Err(ResizeError::InvalidParameter(format!(
                "Destination exists but is not a directory: {}",
                output_dir.display()
            )));
        }

        // Outputs keep their file names, so this would overwrite the sources
        if output_dir.exists() && input_dir.canonicalize()? == output_dir.canonicalize()? {
            return Err(ResizeError::InvalidParameter(
                "Source and destination directories cannot be the same".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;
    use assert_fs::TempDir;

    #[test]
    fn test_listing_filters_and_sorts() {
        let dir = TempDir::new().unwrap();
        for name in ["b.jpg", "a.jpeg", "c.JPG", "notes.txt", "d.png"] {
            dir.child(name).touch().unwrap();
        }
        dir.child("nested").create_dir_all().unwrap();
        dir.child("nested/e.jpg").touch().unwrap();

        let names = |files: &JpegFiles| -> Vec<String> {
            files
                .iter()
                .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
                .collect()
        };

        let insensitive = JpegFiles::new(dir.path(), false);
        assert_eq!(names(&insensitive), vec!["a.jpeg", "b.jpg", "c.JPG"]);

        let sensitive = JpegFiles::new(dir.path(), true);
        assert_eq!(names(&sensitive), vec!["a.jpeg", "b.jpg"]);
    }

    #[test]
    fn test_listing_is_restartable() {
        let dir = TempDir::new().unwrap();
        dir.child("one.jpg").touch().unwrap();

        let files = JpegFiles::new(dir.path(), false);
        assert_eq!(files.iter().count(), 1);
        assert_eq!((&files).into_iter().count(), 1);

        dir.child("two.jpg").touch().unwrap();
        assert_eq!(files.iter().count(), 2);
    }

    #[test]
    fn test_same_directory_rejected() {
        let dir = TempDir::new().unwrap();
        let batch = BatchProcessor::new(ResizeConfig::default()).unwrap();

        let result = batch.validate_paths(dir.path(), &dir.path().join("."));
        assert!(matches!(result, Err(ResizeError::InvalidParameter(_))));
    }

    #[test]
    fn test_destination_must_be_directory() {
        let dir = TempDir::new().unwrap();
        let file = dir.child("out");
        file.touch().unwrap();
        let batch = BatchProcessor::new(ResizeConfig::default()).unwrap();

        assert!(batch.validate_paths(dir.path(), file.path()).is_err());
    }

    #[test]
    fn test_empty_directory() {
        let dir = TempDir::new().unwrap();
        let batch = BatchProcessor::new(ResizeConfig::default()).unwrap().with_progress(false);

        let stats = batch.process_directory(dir.path(), &dir.path().join("out")).unwrap();
        assert_eq!(stats.processed_count, 0);
        assert!(dir.path().join("out").is_dir());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ResizeConfig { quality: 0, ..Default::default() };
        assert!(BatchProcessor::new(config).is_err());
    }
}
