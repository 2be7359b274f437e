// resize-batch/src/cli.rs
use crate::core::{ResizeAlgorithm, ResizeConfig, TargetSize, DEFAULT_QUALITY};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "resize")]
#[command(version, about = "Rotate, downsize and re-encode every JPEG in a directory", long_about = None)]
pub struct Cli {
    /// Output directory, created if missing
    pub destination: PathBuf,

    /// Minimum size both edges must reach, as "W,H" in landscape order
    #[arg(short, long, default_value = "2288,1525", value_parser = parse_target)]
    pub target: TargetSize,

    /// JPEG quality (1-100)
    #[arg(short, long, default_value_t = DEFAULT_QUALITY, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: u8,

    /// Keep the GPS block in the output EXIF
    #[arg(long)]
    pub keep_gps: bool,

    /// Directory to scan for JPEG files
    #[arg(short, long, default_value = ".")]
    pub source: PathBuf,

    /// Enlarge images smaller than the target instead of skipping them
    #[arg(long)]
    pub allow_upscale: bool,

    /// Only match lower-case .jpg/.jpeg extensions
    #[arg(long)]
    pub case_sensitive: bool,

    /// Resampling filter
    #[arg(short, long, value_enum, default_value_t = Algorithm::Lanczos3)]
    pub algorithm: Algorithm,

    /// Log failed files and carry on with the rest
    #[arg(long)]
    pub keep_going: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Algorithm {
    Nearest,
    Bilinear,
    Bicubic,
    Lanczos3,
}

impl From<Algorithm> for ResizeAlgorithm {
    fn from(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Nearest => ResizeAlgorithm::Nearest,
            Algorithm::Bilinear => ResizeAlgorithm::Bilinear,
            Algorithm::Bicubic => ResizeAlgorithm::Bicubic,
            Algorithm::Lanczos3 => ResizeAlgorithm::Lanczos3,
        }
    }
}

fn parse_target(s: &str) -> Result<TargetSize, String> {
    s.parse::<TargetSize>().map_err(|e| e.to_string())
}

impl Cli {
    pub fn to_config(&self) -> ResizeConfig {
        ResizeConfig {
            target: self.target,
            quality: self.quality,
            strip_gps: !self.keep_gps,
            allow_upscale: self.allow_upscale,
            case_sensitive: self.case_sensitive,
            algorithm: self.algorithm.into(),
            keep_going: self.keep_going,
        }
    }
}
