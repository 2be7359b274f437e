// resize-batch/src/core/mod.rs
pub mod processor;

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub use processor::ImageProcessor;

pub const DEFAULT_TARGET: TargetSize = TargetSize { width: 2288, height: 1525 };
pub const DEFAULT_QUALITY: u8 = 83;
const MAX_DIMENSION: u32 = 100_000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResizeAlgorithm {
    Nearest,
    Bilinear,
    Bicubic,
    Lanczos3,
}

/// Lower bound both edges of the output must reach. Given in landscape
/// order; the resizer swaps it for portrait images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetSize {
    pub width: u32,
    pub height: u32,
}

impl TargetSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn swapped(self) -> Self {
        Self { width: self.height, height: self.width }
    }
}

impl Default for TargetSize {
    fn default() -> Self {
        DEFAULT_TARGET
    }
}

impl fmt::Display for TargetSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.width, self.height)
    }
}

impl FromStr for TargetSize {
    type Err = ResizeError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || {
            ResizeError::InvalidParameter(format!(
                "Target must look like \"W,H\" with positive integers, got \"{}\"",
                s
            ))
        };

        let (w, h) = s.split_once(',').ok_or_else(invalid)?;
        let width: u32 = w.trim().parse().map_err(|_| invalid())?;
        let height: u32 = h.trim().parse().map_err(|_| invalid())?;

        if width == 0 || height == 0 {
            return Err(invalid());
        }

        Ok(Self { width, height })
    }
}

#[derive(Debug, Clone)]
pub struct ResizeConfig {
    pub target: TargetSize,
    pub quality: u8,
    pub strip_gps: bool,
    pub allow_upscale: bool,
    pub case_sensitive: bool,
    pub algorithm: ResizeAlgorithm,
    pub keep_going: bool,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            target: DEFAULT_TARGET,
            quality: DEFAULT_QUALITY,
            strip_gps: true,
            allow_upscale: false,
            case_sensitive: false,
            algorithm: ResizeAlgorithm::Lanczos3,
            keep_going: false,
        }
    }
}

impl ResizeConfig {
    pub fn validate(&self) -> Result<()> {
        if self.target.width == 0 || self.target.height == 0 {
            return Err(ResizeError::InvalidParameter(
                "Target dimensions must be positive".to_string(),
            ));
        }

        if self.target.width > MAX_DIMENSION || self.target.height > MAX_DIMENSION {
            return Err(ResizeError::InvalidParameter(
                "Target dimensions too large (max 100,000 pixels)".to_string(),
            ));
        }

        if self.quality == 0 || self.quality > 100 {
            return Err(ResizeError::InvalidParameter(
                "Quality must be between 1 and 100".to_string(),
            ));
        }

        Ok(())
    }
}

/// Outcome of one file going through the pipeline.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub file_name: String,
    pub original_dimensions: (u32, u32),
    pub final_dimensions: (u32, u32),
    pub rotated: bool,
    /// `None` when the resize was skipped.
    pub scale_factor: Option<f64>,
    pub gps_stripped: bool,
    pub size_before: u64,
    pub size_after: u64,
}

impl FileReport {
    pub fn resized(&self) -> bool {
        self.scale_factor.is_some()
    }

    pub fn grew(&self) -> bool {
        self.size_after > self.size_before
    }
}

#[derive(Debug, Default)]
pub struct ProcessingStats {
    pub processed_count: usize,
    pub resized_count: usize,
    pub skipped_count: usize,
    pub grown_count: usize,
    pub total_size_before: u64,
    pub total_size_after: u64,
    pub errors: Vec<(String, String)>,
}

impl ProcessingStats {
    pub fn record(&mut self, report: &FileReport) {
        self.processed_count += 1;
        if report.resized() {
            self.resized_count += 1;
        } else {
            self.skipped_count += 1;
        }
        if report.grew() {
            self.grown_count += 1;
        }
        self.total_size_before += report.size_before;
        self.total_size_after += report.size_after;
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

#[derive(Error, Debug)]
pub enum ResizeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("EXIF error: {0}")]
    Exif(#[from] exif::Error),

    #[error("JPEG container error: {0}")]
    Container(#[from] img_parts::Error),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Failed to process {file}: {source}")]
    ProcessingError {
        file: String,
        #[source]
        source: Box<ResizeError>,
    },
}

pub type Result<T> = std::result::Result<T, ResizeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_target() {
        assert_eq!("2288,1525".parse::<TargetSize>().unwrap(), TargetSize::new(2288, 1525));
        assert_eq!(" 800 , 600 ".parse::<TargetSize>().unwrap(), TargetSize::new(800, 600));
    }

    #[test]
    fn test_parse_target_rejects_garbage() {
        assert!("2288x1525".parse::<TargetSize>().is_err());
        assert!("0,100".parse::<TargetSize>().is_err());
        assert!("100,".parse::<TargetSize>().is_err());
        assert!("-1,5".parse::<TargetSize>().is_err());
    }

    #[test]
    fn test_target_display_matches_cli_format() {
        assert_eq!(DEFAULT_TARGET.to_string(), "2288,1525");
        assert_eq!(DEFAULT_TARGET.swapped(), TargetSize::new(1525, 2288));
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = ResizeConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.quality, 83);
        assert!(config.strip_gps);
    }

    #[test]
    fn test_validate_rejects_bad_quality() {
        let config = ResizeConfig { quality: 0, ..Default::default() };
        assert!(config.validate().is_err());

        let config = ResizeConfig { quality: 101, ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_stats_record() {
        let mut stats = ProcessingStats::default();
        let report = FileReport {
            file_name: "a.jpg".to_string(),
            original_dimensions: (4000, 3000),
            final_dimensions: (2288, 1716),
            rotated: false,
            scale_factor: Some(0.572),
            gps_stripped: true,
            size_before: 1000,
            size_after: 1200,
        };
        stats.record(&report);
        stats.record(&FileReport { scale_factor: None, size_after: 500, ..report });

        assert_eq!(stats.processed_count, 2);
        assert_eq!(stats.resized_count, 1);
        assert_eq!(stats.skipped_count, 1);
        assert_eq!(stats.grown_count, 1);
        assert_eq!(stats.total_size_before, 2000);
        assert_eq!(stats.total_size_after, 1700);
    }
}
