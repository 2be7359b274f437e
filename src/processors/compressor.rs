// resize-batch/src/processors/compressor.rs
use crate::core::Result;
use crate::processors::Metadata;
use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;
use img_parts::jpeg::Jpeg;
use img_parts::{Bytes, ImageEXIF};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub struct Compressor {
    quality: u8,
}

impl Compressor {
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }

    /// Encodes as JPEG and writes to `path`, returning the written size.
    pub fn save(&self, image: &DynamicImage, metadata: Option<&Metadata>, path: &Path) -> Result<u64> {
        log::debug!(
            "Saving image to {} as JPEG, quality: {}",
            path.display(),
            self.quality
        );

        let data = self.compress_to_bytes(image, metadata)?;

        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(&data)?;
        writer.flush()?;

        let file_size = std::fs::metadata(path)?.len();
        log::debug!("Saved image: {} ({} bytes)", path.display(), file_size);
        Ok(file_size)
    }

    pub fn compress_to_bytes(&self, image: &DynamicImage, metadata: Option<&Metadata>) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        match image {
            DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) => {
                image.write_with_encoder(JpegEncoder::new_with_quality(&mut buffer, self.quality))?
            }
            // JPEG has no alpha or 16-bit samples
            _ => DynamicImage::ImageRgb8(image.to_rgb8())
                .write_with_encoder(JpegEncoder::new_with_quality(&mut buffer, self.quality))?,
        }

        match metadata.filter(|m| !m.is_empty()) {
            Some(metadata) => self.embed_exif(buffer, metadata),
            None => Ok(buffer),
        }
    }

    fn embed_exif(&self, encoded: Vec<u8>, metadata: &Metadata) -> Result<Vec<u8>> {
        let tiff = metadata.to_tiff_bytes()?;

        let mut jpeg = Jpeg::from_bytes(Bytes::from(encoded))?;
        jpeg.set_exif(Some(Bytes::from(tiff)));

        let mut output = Vec::new();
        jpeg.encoder().write_to(&mut output)?;
        Ok(output)
    }
}

impl Default for Compressor {
    fn default() -> Self {
        Self::new(crate::core::DEFAULT_QUALITY)
    }
}
