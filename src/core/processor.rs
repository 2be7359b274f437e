// resize-batch/src/core/processor.rs
use super::{FileReport, ResizeConfig, ResizeError, Result};
use crate::processors::{
    Compressor, Loader, MetadataProcessor, Orientation, OrientationNormalizer, Resizer, ScalePlan,
};
use crate::utils::{calculate_aspect_ratio, format_file_size};
use image::GenericImageView;
use std::path::Path;

/// Runs one file through load, orientation, resize, metadata rewrite and save.
pub struct ImageProcessor {
    config: ResizeConfig,
    loader: Loader,
    normalizer: OrientationNormalizer,
    resizer: Resizer,
    metadata_processor: MetadataProcessor,
    compressor: Compressor,
}

impl ImageProcessor {
    pub fn new(config: ResizeConfig) -> Self {
        let resizer = Resizer::new(config.algorithm, config.allow_upscale);
        let metadata_processor = MetadataProcessor::new(config.strip_gps);
        let compressor = Compressor::new(config.quality);

        Self {
            config,
            loader: Loader::new(),
            normalizer: OrientationNormalizer::new(),
            resizer,
            metadata_processor,
            compressor,
        }
    }

    pub fn process<P: AsRef<Path>, Q: AsRef<Path>>(&self, input_path: P, output_path: Q) -> Result<FileReport> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        self.process_single(input_path, output_path)
            .map_err(|e| ResizeError::ProcessingError {
                file: input_path.display().to_string(),
                source: Box::new(e),
            })
    }

    fn process_single(&self, input_path: &Path, output_path: &Path) -> Result<FileReport> {
        let file_name = input_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                ResizeError::InvalidParameter(format!("Invalid file name: {}", input_path.display()))
            })?;

        let loaded = self.loader.load(input_path)?;
        let original_dimensions = loaded.image.dimensions();
        let mut metadata = loaded.metadata;

        log::info!(
            "{}: {}x{}, ratio {:.3}, {}",
            file_name,
            original_dimensions.0,
            original_dimensions.1,
            calculate_aspect_ratio(original_dimensions.0, original_dimensions.1),
            format_file_size(loaded.file_size)
        );

        let orientation = Orientation::from_exif(metadata.as_ref().and_then(|m| m.orientation()));
        let (mut image, rotated) = self.normalizer.normalize(loaded.image, orientation);

        // Dimensions may have swapped above
        let (plan, resized) = self.resizer.resize(&image, self.config.target);
        let scale_factor = match resized {
            Some(resized) => {
                log::info!(
                    "{}: resize factor {:.4}, new size {}x{}",
                    file_name,
                    plan.factor,
                    plan.new_width,
                    plan.new_height
                );
                image = resized;
                Some(plan.factor)
            }
            None => {
                log::warn!("{}", skip_message(&file_name, image.dimensions(), &plan));
                None
            }
        };

        let (width, height) = image.dimensions();
        let gps_stripped = match metadata.as_mut() {
            Some(metadata) => self.metadata_processor.rewrite(metadata, width, height, rotated),
            None => false,
        };

        let size_after = self.compressor.save(&image, metadata.as_ref(), output_path)?;

        let report = FileReport {
            file_name,
            original_dimensions,
            final_dimensions: (width, height),
            rotated,
            scale_factor,
            gps_stripped,
            size_before: loaded.file_size,
            size_after,
        };

        if report.grew() {
            log::warn!(
                "ALARM {}: output is larger than input ({} > {})",
                report.file_name,
                format_file_size(report.size_after),
                format_file_size(report.size_before)
            );
        } else {
            log::info!(
                "{}: saved {}x{}, {} -> {}",
                report.file_name,
                width,
                height,
                format_file_size(report.size_before),
                format_file_size(report.size_after)
            );
        }

        Ok(report)
    }
}

fn skip_message(file_name: &str, (width, height): (u32, u32), plan: &ScalePlan) -> String {
    if plan.factor > 1.0 {
        format!(
            "{}: {}x{} smaller than target {}, not upscaled (factor {:.4})",
            file_name, width, height, plan.target, plan.factor
        )
    } else {
        format!("{}: {}x{} already matches target {}, not resized", file_name, width, height, plan.target)
    }
}
