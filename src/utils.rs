/// Utility functions for common operations
///
/// Helpers shared by the compression pipeline and the reorganizer:
/// extension checks, path mirroring, size formatting and progress bars.
use crate::constants::{COMPRESSIBLE_EXTENSIONS, PROGRESS_BAR_TEMPLATE};
use crate::error::{Result, SqueezeError};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};

/// Lower-cased extension of `path`, without the dot.
pub fn lowercase_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| ext.to_lowercase())
}

/// Check if a file path has one of the extensions the compression
/// pipeline accepts (case-insensitive).
pub fn is_image_file(path: &Path) -> bool {
    lowercase_extension(path)
        .map(|ext| COMPRESSIBLE_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

/// Map `source` under `input_root` to the same relative path under
/// `output_root`.
pub fn mirror_path(input_root: &Path, source: &Path, output_root: &Path) -> Result<PathBuf> {
    let relative = source
        .strip_prefix(input_root)
        .map_err(|_| SqueezeError::OutsideInputRoot(source.to_path_buf()))?;
    Ok(output_root.join(relative))
}

/// Create a progress bar with consistent styling. Hidden when `visible` is
/// false so tests and `--quiet` runs stay silent.
pub fn create_progress_bar(len: u64, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::default_bar().template(PROGRESS_BAR_TEMPLATE) {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb
}

/// Format file size in human-readable format
///
/// # Returns
/// * Human-readable size string (e.g., "1.2 MB", "512 B")
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    const THRESHOLD: f64 = 1024.0;

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= THRESHOLD && unit_index < UNITS.len() - 1 {
        size /= THRESHOLD;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}

/// Compression ratio as a percentage (positive means reduction, negative
/// means the output grew).
pub fn calculate_compression_ratio(original_size: u64, compressed_size: u64) -> f64 {
    if original_size == 0 {
        return 0.0;
    }
    ((original_size as f64 - compressed_size as f64) / original_size as f64) * 100.0
}
