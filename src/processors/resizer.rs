// resize-batch/src/processors/resizer.rs
use crate::core::{ResizeAlgorithm, TargetSize};
use image::{imageops::FilterType, DynamicImage, GenericImageView};

/// Result of fitting an image's dimensions against the target bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalePlan {
    /// Target after the portrait swap.
    pub target: TargetSize,
    pub factor: f64,
    pub new_width: u32,
    pub new_height: u32,
}

impl ScalePlan {
    /// Cover semantics: the larger of the two ratios wins so both target
    /// edges are met or exceeded. Axes are rounded independently.
    pub fn compute(width: u32, height: u32, target: TargetSize) -> Self {
        let target = if is_landscape(width, height) { target } else { target.swapped() };

        let factor = f64::max(
            target.width as f64 / width as f64,
            target.height as f64 / height as f64,
        );

        let new_width = ((width as f64 * factor).round() as u32).max(1);
        let new_height = ((height as f64 * factor).round() as u32).max(1);

        Self { target, factor, new_width, new_height }
    }

    pub fn is_downscale(&self) -> bool {
        self.factor < 1.0
    }
}

pub fn is_landscape(width: u32, height: u32) -> bool {
    width >= height
}

pub struct Resizer {
    algorithm: ResizeAlgorithm,
    allow_upscale: bool,
}

impl Resizer {
    pub fn new(algorithm: ResizeAlgorithm, allow_upscale: bool) -> Self {
        Self { algorithm, allow_upscale }
    }

    pub fn plan(&self, image: &DynamicImage, target: TargetSize) -> ScalePlan {
        let (width, height) = image.dimensions();
        ScalePlan::compute(width, height, target)
    }

    /// Whether the plan should be carried out. A factor of exactly 1 never is.
    pub fn should_resize(&self, plan: &ScalePlan) -> bool {
        plan.is_downscale() || (self.allow_upscale && plan.factor > 1.0)
    }

    /// Resizes to the planned size, or returns `None` when the resize is
    /// skipped. The caller keeps its original image untouched in that case.
    pub fn resize(&self, image: &DynamicImage, target: TargetSize) -> (ScalePlan, Option<DynamicImage>) {
        let plan = self.plan(image, target);

        if !self.should_resize(&plan) {
            return (plan, None);
        }

        if plan.new_width == image.width() && plan.new_height == image.height() {
            log::debug!("Image dimensions unchanged, skipping resize");
            return (plan, None);
        }

        log::debug!(
            "Resizing image from {}x{} to {}x{} ({:?})",
            image.width(),
            image.height(),
            plan.new_width,
            plan.new_height,
            self.algorithm
        );

        let resized = image.resize_exact(plan.new_width, plan.new_height, self.get_filter_type());
        (plan, Some(resized))
    }

    fn get_filter_type(&self) -> FilterType {
        match self.algorithm {
            ResizeAlgorithm::Nearest => FilterType::Nearest,
            ResizeAlgorithm::Bilinear => FilterType::Triangle,
            ResizeAlgorithm::Bicubic => FilterType::CatmullRom,
            ResizeAlgorithm::Lanczos3 => FilterType::Lanczos3,
        }
    }
}
