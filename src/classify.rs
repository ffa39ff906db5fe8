use crate::config::ClassifierConfig;
use crate::error::{Result, SqueezeError};
use crate::utils::lowercase_extension;
use regex::Regex;
use std::path::Path;

/// A file name that resolved to a recognized device and allowed extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedFile {
    /// Canonical, lower-cased device name.
    pub device: String,
    /// Lower-cased extension without the dot.
    pub extension: String,
}

impl ClassifiedFile {
    pub fn destination_name(&self) -> String {
        format!("{}.{}", self.device, self.extension)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// The name does not start with a device token.
    NoDeviceMatch,
    /// A device token matched but the extension is not eligible.
    DisallowedExtension {
        matched: String,
        extension: Option<String>,
    },
    /// The token resolved to a device the gallery does not display.
    UnrecognizedDevice { matched: String, canonical: String },
    Eligible(ClassifiedFile),
}

/// Matches device tokens at the start of file names. A token must be
/// followed by the end of the name or a character that is not a letter or
/// digit in any script, so `Laptop_dark.jpg` and `Laptop.png` match but
/// `Laptops.png` and `Laptopé.png` do not.
#[derive(Debug, Clone)]
pub struct DeviceMatcher {
    pattern: Regex,
    config: ClassifierConfig,
}

impl DeviceMatcher {
    pub fn new(config: ClassifierConfig) -> Result<Self> {
        config.validate()?;

        let alternation = config
            .devices
            .iter()
            .map(|device| device.trim())
            .filter(|device| !device.is_empty())
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join("|");

        if alternation.is_empty() {
            return Err(SqueezeError::InvalidConfig("no devices configured".to_string()));
        }

        let pattern = Regex::new(&format!(r"(?i)^({})(?:[^\p{{L}}\p{{N}}]|$)", alternation))?;
        Ok(Self { pattern, config })
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classify a bare file name. Does not touch the filesystem.
    pub fn classify(&self, file_name: &str) -> Classification {
        let matched = match self.pattern.captures(file_name).and_then(|caps| caps.get(1)) {
            Some(token) => token.as_str().to_string(),
            None => return Classification::NoDeviceMatch,
        };

        let extension = lowercase_extension(Path::new(file_name));
        let extension = match extension {
            Some(ext) if self.config.is_allowed_extension(&ext) => ext,
            other => {
                return Classification::DisallowedExtension {
                    matched,
                    extension: other,
                }
            }
        };

        let canonical = self.config.canonical_device(&matched);
        if !self.config.is_recognized(&canonical) {
            return Classification::UnrecognizedDevice { matched, canonical };
        }

        Classification::Eligible(ClassifiedFile {
            device: canonical,
            extension,
        })
    }
}
