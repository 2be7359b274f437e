// resize-batch/src/processors/metadata.rs
use crate::core::Result;
use exif::experimental::Writer;
use exif::{Context, Exif, Field, In, Reader, Tag, Value};
use std::io::Cursor;

/// Tags the EXIF writer synthesizes itself.
const POINTER_TAGS: [Tag; 3] = [Tag::ExifIFDPointer, Tag::GPSInfoIFDPointer, Tag::InteropIFDPointer];

/// Primary-image EXIF fields of one file.
///
/// Thumbnail (IFD1) fields are not kept: the embedded thumbnail shows the
/// unrotated source and its offsets do not survive re-encoding.
#[derive(Debug, Clone)]
pub struct Metadata {
    fields: Vec<Field>,
    little_endian: bool,
}

impl Metadata {
    pub fn new(fields: Vec<Field>, little_endian: bool) -> Self {
        let fields = fields.into_iter().filter(Self::is_writable).collect();
        Self { fields, little_endian }
    }

    pub fn from_exif(exif: &Exif) -> Self {
        Self::new(exif.fields().cloned().collect(), exif.little_endian())
    }

    /// Parses the EXIF block of a JPEG file. `Ok(None)` when the file has none.
    pub fn from_jpeg_bytes(data: &[u8]) -> Result<Option<Self>> {
        let result = Reader::new()
            .continue_on_error(true)
            .read_from_container(&mut Cursor::new(data))
            .or_else(|e| {
                e.distill_partial_result(|errors| {
                    for err in errors {
                        log::warn!("Ignoring malformed EXIF field: {}", err);
                    }
                })
            });

        match result {
            Ok(exif) => Ok(Some(Self::from_exif(&exif))),
            Err(exif::Error::NotFound(_)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn is_writable(field: &Field) -> bool {
        field.ifd_num == In::PRIMARY
            && !POINTER_TAGS.contains(&field.tag)
            && !matches!(field.value, Value::Unknown(..))
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field(&self, tag: Tag) -> Option<&Field> {
        self.fields.iter().find(|f| f.tag == tag)
    }

    pub fn set_field(&mut self, tag: Tag, value: Value) {
        match self.fields.iter_mut().find(|f| f.tag == tag) {
            Some(field) => field.value = value,
            None => self.fields.push(Field {
                tag,
                ifd_num: In::PRIMARY,
                value,
            }),
        }
    }

    pub fn orientation(&self) -> Option<u32> {
        self.field(Tag::Orientation).and_then(|f| f.value.get_uint(0))
    }

    pub fn set_orientation(&mut self, orientation: u16) {
        self.set_field(Tag::Orientation, Value::Short(vec![orientation]));
    }

    /// Recorded pixel dimensions (`PixelXDimension`, `PixelYDimension`).
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        let width = self.field(Tag::PixelXDimension)?.value.get_uint(0)?;
        let height = self.field(Tag::PixelYDimension)?.value.get_uint(0)?;
        Some((width, height))
    }

    pub fn set_dimensions(&mut self, width: u32, height: u32) {
        self.set_field(Tag::PixelXDimension, Value::Long(vec![width]));
        self.set_field(Tag::PixelYDimension, Value::Long(vec![height]));

        if self.field(Tag::ImageWidth).is_some() {
            self.set_field(Tag::ImageWidth, Value::Long(vec![width]));
        }
        if self.field(Tag::ImageLength).is_some() {
            self.set_field(Tag::ImageLength, Value::Long(vec![height]));
        }
    }

    pub fn has_gps(&self) -> bool {
        self.fields.iter().any(|f| f.tag.context() == Context::Gps)
    }

    /// Removes the GPS block. Returns whether anything was removed.
    pub fn strip_gps(&mut self) -> bool {
        if !self.has_gps() {
            return false;
        }
        self.fields.retain(|f| f.tag.context() != Context::Gps);
        true
    }

    pub fn gps_coordinates(&self) -> Option<(f64, f64, Option<f64>)> {
        let lat = self.field(Tag::GPSLatitude)?;
        let lat_ref = self.field(Tag::GPSLatitudeRef)?;
        let lon = self.field(Tag::GPSLongitude)?;
        let lon_ref = self.field(Tag::GPSLongitudeRef)?;

        let latitude = degrees_to_decimal(lat, lat_ref)?;
        let longitude = degrees_to_decimal(lon, lon_ref)?;
        let altitude = self.field(Tag::GPSAltitude).and_then(|a| {
            let mut altitude = match &a.value {
                Value::Rational(v) => v.first()?.to_f64(),
                _ => return None,
            };

            // Ref 1 means below sea level
            if let Some(ref_field) = self.field(Tag::GPSAltitudeRef) {
                if ref_field.value.get_uint(0) == Some(1) {
                    altitude = -altitude;
                }
            }
            Some(altitude)
        });

        Some((latitude, longitude, altitude))
    }

    /// Serializes the fields into a TIFF-structured EXIF blob, without the
    /// `Exif\0\0` APP1 prefix.
    pub fn to_tiff_bytes(&self) -> Result<Vec<u8>> {
        let mut writer = Writer::new();
        for field in &self.fields {
            writer.push_field(field);
        }

        let mut buf = Cursor::new(Vec::new());
        writer.write(&mut buf, self.little_endian)?;
        Ok(buf.into_inner())
    }
}

fn degrees_to_decimal(degrees: &Field, ref_field: &Field) -> Option<f64> {
    let components = match &degrees.value {
        Value::Rational(v) if v.len() >= 3 => v,
        _ => return None,
    };

    let decimal = components[0].to_f64() + components[1].to_f64() / 60.0 + components[2].to_f64() / 3600.0;

    match &ref_field.value {
        Value::Ascii(v) => match v.first().map(|s| s.as_slice()) {
            Some(b"S") | Some(b"W") => Some(-decimal),
            _ => Some(decimal),
        },
        _ => Some(decimal),
    }
}

pub struct MetadataProcessor {
    strip_gps: bool,
}

impl MetadataProcessor {
    pub fn new(strip_gps: bool) -> Self {
        Self { strip_gps }
    }

    /// Brings the metadata in line with the pixels that are about to be
    /// written. Returns whether a GPS block was removed.
    pub fn rewrite(&self, metadata: &mut Metadata, width: u32, height: u32, rotated: bool) -> bool {
        if rotated {
            log::debug!("Resetting orientation tag, rotation is baked into the pixels");
            metadata.set_orientation(1);
        }

        if let Some((old_w, old_h)) = metadata.dimensions() {
            if (old_w, old_h) != (width, height) {
                log::debug!("Updating recorded size {}x{} -> {}x{}", old_w, old_h, width, height);
            }
        }
        metadata.set_dimensions(width, height);

        if !self.strip_gps {
            return false;
        }

        if let Some((lat, lon, _)) = metadata.gps_coordinates() {
            log::debug!("Stripping GPS position {:.5}, {:.5}", lat, lon);
        }
        metadata.strip_gps()
    }
}

impl Default for MetadataProcessor {
    fn default() -> Self {
        Self::new(true)
    }
}
