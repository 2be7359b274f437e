// resize-batch/src/processors/mod.rs
mod batch;
mod compressor;
mod loader;
mod metadata;
mod orientation;
mod resizer;

pub use batch::{BatchProcessor, JpegFiles};
pub use compressor::Compressor;
pub use loader::{LoadedImage, Loader};
pub use metadata::{Metadata, MetadataProcessor};
pub use orientation::{Orientation, OrientationNormalizer};
pub use resizer::{is_landscape, Resizer, ScalePlan};

pub mod prelude {
    pub use super::{BatchProcessor, Compressor, Loader, MetadataProcessor, OrientationNormalizer, Resizer};
}
