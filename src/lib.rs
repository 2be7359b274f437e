mod cli;
mod core;
mod processors;
mod utils;

pub use crate::cli::{Algorithm, Cli};
pub use crate::core::{
    FileReport, ImageProcessor, ProcessingStats, ResizeAlgorithm, ResizeConfig, ResizeError, Result,
    TargetSize, DEFAULT_QUALITY, DEFAULT_TARGET,
};
pub use crate::processors::{
    is_landscape, BatchProcessor, Compressor, JpegFiles, LoadedImage, Loader, Metadata, MetadataProcessor,
    Orientation, OrientationNormalizer, Resizer, ScalePlan,
};
pub use crate::utils::{calculate_aspect_ratio, calculate_savings, format_file_size, is_jpeg_path};

pub mod prelude {
    pub use crate::processors::prelude::*;
    pub use crate::{ImageProcessor, ResizeAlgorithm, ResizeConfig, TargetSize};
}

// Re-export commonly used types
pub use image::DynamicImage;
