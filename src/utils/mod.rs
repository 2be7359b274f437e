// resize-batch/src/utils/mod.rs
use std::path::Path;

const JPEG_EXTENSIONS: [&str; 2] = ["jpg", "jpeg"];

pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let base = 1024_f64;
    let bytes_f64 = bytes as f64;
    let exponent = ((bytes_f64.log10() / base.log10()).floor() as usize).min(UNITS.len() - 1);
    let size = bytes_f64 / base.powi(exponent as i32);

    format!("{:.2} {}", size, UNITS[exponent])
}

/// Long edge over short edge, so portrait and landscape compare alike.
pub fn calculate_aspect_ratio(width: u32, height: u32) -> f64 {
    let (long, short) = if width >= height { (width, height) } else { (height, width) };
    if short == 0 {
        0.0
    } else {
        long as f64 / short as f64
    }
}

/// Percentage saved, negative when the output grew.
pub fn calculate_savings(original_size: u64, new_size: u64) -> f64 {
    if original_size == 0 {
        return 0.0;
    }

    (original_size as f64 - new_size as f64) / original_size as f64 * 100.0
}

pub fn is_jpeg_path(path: &Path, case_sensitive: bool) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            if case_sensitive {
                JPEG_EXTENSIONS.contains(&ext)
            } else {
                JPEG_EXTENSIONS.contains(&ext.to_lowercase().as_str())
            }
        })
        .unwrap_or(false)
}
