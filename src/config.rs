//! Classifier vocabulary.
//!
//! Everything the reorganizer matches against lives in one immutable
//! [`ClassifierConfig`]. The defaults describe the gallery's monthly
//! layout; a TOML file may override any subset of fields:
//!
//! ```toml
//! devices = ["Laptop", "Phone", "iPad"]
//! recognized_devices = ["laptop", "phone", "tablet"]
//!
//! [aliases]
//! iPad = "tablet"
//! ```

use crate::constants::{
    CLASSIFIER_EXTENSIONS, DEVICES, DEVICE_ALIASES, EXCLUDED_WALLPAPER_DIRS, MONTHS,
    RECOGNIZED_DEVICES, THUMBNAIL_DIR_NAME,
};
use crate::error::{Result, SqueezeError};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassifierConfig {
    /// Month directory names, processed in this order.
    pub months: Vec<String>,
    /// Device tokens matched at the start of a filename. Order matters
    /// when one token is a prefix of another: earlier wins.
    pub devices: Vec<String>,
    /// Matched token → canonical device name. Keys compare case-insensitively.
    pub aliases: BTreeMap<String, String>,
    /// Canonical names the gallery understands; anything else stays put.
    pub recognized_devices: Vec<String>,
    /// Extensions (lower-case, no dot) eligible for a move.
    pub allowed_extensions: Vec<String>,
    /// Directory names pruned from the wallpaper pass (exact match).
    pub excluded_dirs: Vec<String>,
    /// Directory name holding thumbnails (case-insensitive).
    pub thumbnail_dir: String,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            months: MONTHS.iter().map(|m| m.to_string()).collect(),
            devices: DEVICES.iter().map(|d| d.to_string()).collect(),
            aliases: DEVICE_ALIASES
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
            recognized_devices: RECOGNIZED_DEVICES.iter().map(|d| d.to_string()).collect(),
            allowed_extensions: CLASSIFIER_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            excluded_dirs: EXCLUDED_WALLPAPER_DIRS.iter().map(|d| d.to_string()).collect(),
            thumbnail_dir: THUMBNAIL_DIR_NAME.to_string(),
        }
    }
}

impl ClassifierConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: ClassifierConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SqueezeError::FileNotFound(path.to_path_buf()));
        }
        let source = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&source)?;
        info!("Loaded classifier configuration from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.months.is_empty() {
            return Err(SqueezeError::InvalidConfig("no months configured".to_string()));
        }
        if self.devices.iter().all(|d| d.trim().is_empty()) {
            return Err(SqueezeError::InvalidConfig("no devices configured".to_string()));
        }
        if self.recognized_devices.is_empty() {
            return Err(SqueezeError::InvalidConfig(
                "no recognized devices configured".to_string(),
            ));
        }
        if self.thumbnail_dir.trim().is_empty() {
            return Err(SqueezeError::InvalidConfig(
                "thumbnail directory name is empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Lower-cased canonical name for a matched device token.
    pub fn canonical_device(&self, matched: &str) -> String {
        self.aliases
            .iter()
            .find(|(alias, _)| alias.eq_ignore_ascii_case(matched))
            .map(|(_, canonical)| canonical.as_str())
            .unwrap_or(matched)
            .to_lowercase()
    }

    pub fn is_recognized(&self, canonical: &str) -> bool {
        self.recognized_devices
            .iter()
            .any(|d| d.eq_ignore_ascii_case(canonical))
    }

    pub fn is_allowed_extension(&self, extension: &str) -> bool {
        self.allowed_extensions
            .iter()
            .any(|e| e.eq_ignore_ascii_case(extension))
    }

    pub fn is_excluded_dir(&self, name: &str) -> bool {
        self.excluded_dirs.iter().any(|d| d == name)
    }

    pub fn is_thumbnail_dir(&self, name: &str) -> bool {
        name.eq_ignore_ascii_case(&self.thumbnail_dir)
    }
}
