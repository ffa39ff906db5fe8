use crate::error::{Result, SqueezeError};
use std::fs;
use std::path::Path;
use tracing::info;

/// The input root must exist and be a directory.
pub fn validate_input_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(SqueezeError::FileNotFound(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(SqueezeError::NotADirectory(path.to_path_buf()));
    }
    Ok(())
}

/// Create `path` (and parents) if missing. Returns true when the directory
/// was created by this call. Tolerates another worker creating it first.
pub fn ensure_dir(path: &Path) -> Result<bool> {
    if path.is_dir() {
        return Ok(false);
    }
    fs::create_dir_all(path).map_err(|_| SqueezeError::DirectoryCreationFailed(path.to_path_buf()))?;
    info!("Created directory: {}", path.display());
    Ok(true)
}
