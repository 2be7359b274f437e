// resize-batch/src/processors/loader.rs
use crate::core::{ResizeError, Result};
use crate::processors::Metadata;
use image::{DynamicImage, GenericImageView, ImageFormat};
use std::path::Path;

/// A decoded JPEG together with the EXIF block it was stored with.
pub struct LoadedImage {
    pub image: DynamicImage,
    pub metadata: Option<Metadata>,
    pub file_size: u64,
}

#[derive(Clone)]
pub struct Loader {
    max_dimensions: Option<(u32, u32)>,
}

impl Loader {
    pub fn new() -> Self {
        Self {
            max_dimensions: Some((100_000, 100_000)),
        }
    }

    pub fn with_max_dimensions(mut self, width: u32, height: u32) -> Self {
        self.max_dimensions = Some((width, height));
        self
    }

    pub fn load(&self, path: &Path) -> Result<LoadedImage> {
        log::debug!("Loading image from: {}", path.display());

        let data = std::fs::read(path)?;
        if data.is_empty() {
            return Err(ResizeError::InvalidParameter(format!(
                "File is empty: {}",
                path.display()
            )));
        }

        let mut loaded = self.load_from_bytes(&data)?;
        loaded.file_size = data.len() as u64;
        Ok(loaded)
    }

    pub fn load_from_bytes(&self, data: &[u8]) -> Result<LoadedImage> {
        let image = image::load_from_memory_with_format(data, ImageFormat::Jpeg)?;

        if let Some((max_w, max_h)) = self.max_dimensions {
            let (width, height) = image.dimensions();
            if width > max_w || height > max_h {
                return Err(ResizeError::InvalidParameter(format!(
                    "Image dimensions {}x{} exceed maximum {}x{}",
                    width, height, max_w, max_h
                )));
            }
        }

        let metadata = Metadata::from_jpeg_bytes(data)?;

        log::debug!(
            "Decoded {}x{} {:?}, EXIF: {}",
            image.width(),
            image.height(),
            image.color(),
            if metadata.is_some() { "yes" } else { "no" }
        );

        Ok(LoadedImage {
            image,
            metadata,
            file_size: data.len() as u64,
        })
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::codecs::jpeg::JpegEncoder;
    use image::RgbImage;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::new(width, height));
        let mut buf = Vec::new();
        img.write_with_encoder(JpegEncoder::new_with_quality(&mut buf, 90)).unwrap();
        buf
    }

    #[test]
    fn test_load_without_exif() {
        let data = jpeg_bytes(40, 30);
        let loaded = Loader::new().load_from_bytes(&data).unwrap();

        assert_eq!(loaded.image.dimensions(), (40, 30));
        assert!(loaded.metadata.is_none());
        assert_eq!(loaded.file_size, data.len() as u64);
    }

    #[test]
    fn test_rejects_non_jpeg() {
        let result = Loader::new().load_from_bytes(b"definitely not a jpeg");
        assert!(matches!(result, Err(ResizeError::Image(_))));
    }

    #[test]
    fn test_dimension_limit() {
        let data = jpeg_bytes(64, 16);
        let result = Loader::new().with_max_dimensions(32, 32).load_from_bytes(&data);
        assert!(matches!(result, Err(ResizeError::InvalidParameter(_))));
    }

    #[test]
    fn test_load_from_file_records_size() {
        let data = jpeg_bytes(20, 10);
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&data).unwrap();

        let loaded = Loader::new().load(file.path()).unwrap();
        assert_eq!(loaded.image.dimensions(), (20, 10));
        assert_eq!(loaded.file_size, data.len() as u64);
    }

    #[test]
    fn test_empty_file_rejected() {
        let file = NamedTempFile::new().unwrap();
        let result = Loader::new().load(file.path());
        assert!(matches!(result, Err(ResizeError::InvalidParameter(_))));
    }
}
