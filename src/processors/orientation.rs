// resize-batch/src/processors/orientation.rs
use image::DynamicImage;

/// The EXIF orientations this tool acts on. Mirrored and upside-down
/// variants fall under `Other` and are left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Normal,
    /// Tag 6: stored rotated, displayed after a 90° clockwise turn.
    Rotate90Cw,
    /// Tag 8: stored rotated, displayed after a 90° counter-clockwise turn.
    Rotate90Ccw,
    Other(u32),
}

impl Orientation {
    pub fn from_exif(value: Option<u32>) -> Self {
        match value {
            None | Some(1) => Orientation::Normal,
            Some(6) => Orientation::Rotate90Cw,
            Some(8) => Orientation::Rotate90Ccw,
            Some(other) => Orientation::Other(other),
        }
    }
}

pub struct OrientationNormalizer;

impl OrientationNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Returns the upright image and whether any rotation was applied.
    /// Rotations by quarter turns always expand the canvas to the swapped size.
    pub fn normalize(&self, image: DynamicImage, orientation: Orientation) -> (DynamicImage, bool) {
        match orientation {
            // 270° counter-clockwise
            Orientation::Rotate90Cw => {
                log::debug!("Orientation 6, rotating 90° clockwise");
                (image.rotate90(), true)
            }
            // 90° counter-clockwise
            Orientation::Rotate90Ccw => {
                log::debug!("Orientation 8, rotating 90° counter-clockwise");
                (image.rotate270(), true)
            }
            Orientation::Other(value) => {
                log::debug!("Orientation {} not handled, leaving pixels as stored", value);
                (image, false)
            }
            Orientation::Normal => (image, false),
        }
    }
}

impl Default for OrientationNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
