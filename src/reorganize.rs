use crate::classify::{Classification, DeviceMatcher};
use crate::config::ClassifierConfig;
use crate::constants::{SUCCESS_PREFIX, SUMMARY_PREFIX, WARNING_PREFIX};
use crate::error::{Result, SqueezeError};
use crate::traversal::TraversalPolicy;
use crate::validation::ensure_dir;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetCategory {
    Wallpaper,
    Thumbnail,
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetCategory::Wallpaper => write!(f, "wallpaper"),
            AssetCategory::Thumbnail => write!(f, "thumbnail"),
        }
    }
}

/// Roots of the two destination trees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationLayout {
    pub wallpapers: PathBuf,
    pub thumbnails: PathBuf,
}

impl DestinationLayout {
    pub fn new(wallpapers: impl Into<PathBuf>, thumbnails: impl Into<PathBuf>) -> Self {
        Self {
            wallpapers: wallpapers.into(),
            thumbnails: thumbnails.into(),
        }
    }

    pub fn root_for(&self, category: AssetCategory) -> &Path {
        match category {
            AssetCategory::Wallpaper => &self.wallpapers,
            AssetCategory::Thumbnail => &self.thumbnails,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    /// A file already at the destination was overwritten.
    Replaced,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReorganizeReport {
    pub moved: usize,
    pub overwritten: usize,
    pub no_device_match: usize,
    pub disallowed_extension: usize,
    pub unrecognized_device: usize,
    pub failed: usize,
    pub missing_months: Vec<String>,
}

impl ReorganizeReport {
    pub fn print_summary(&self) {
        println!("\n{} Reorganization Summary:", SUMMARY_PREFIX);
        println!("  📁 Files moved: {}", self.moved);
        println!("  🔁 Destinations overwritten: {}", self.overwritten);
        println!("  ⏭️  No device match: {}", self.no_device_match);
        println!("  ⏭️  Extension not allowed: {}", self.disallowed_extension);
        println!("  ⏭️  Unrecognized device: {}", self.unrecognized_device);
        if !self.missing_months.is_empty() {
            println!("  📅 Missing months: {}", self.missing_months.join(", "));
        }
        if self.failed > 0 {
            println!("  {}  Failed moves: {}", WARNING_PREFIX, self.failed);
        } else {
            println!("{} Processing completed.", SUCCESS_PREFIX);
        }
    }
}

/// Moves device wallpapers and thumbnails out of a month-organized source
/// tree into `<category>/<month>/<device>.<ext>`.
///
/// Files are handled one at a time in sorted traversal order. When two
/// files in the same month resolve to the same destination name, the one
/// visited later replaces the earlier one (a warning is logged).
pub struct AssetClassifier {
    matcher: DeviceMatcher,
    layout: DestinationLayout,
    wallpapers: TraversalPolicy,
    thumbnails: TraversalPolicy,
}

impl AssetClassifier {
    pub fn new(config: ClassifierConfig, layout: DestinationLayout) -> Result<Self> {
        let wallpapers = TraversalPolicy::wallpapers(&config);
        let thumbnails = TraversalPolicy::thumbnails(&config);
        let matcher = DeviceMatcher::new(config)?;

        Ok(Self {
            matcher,
            layout,
            wallpapers,
            thumbnails,
        })
    }

    pub fn config(&self) -> &ClassifierConfig {
        self.matcher.config()
    }

    pub fn layout(&self) -> &DestinationLayout {
        &self.layout
    }

    /// Process every configured month under `source_root`. Months without a
    /// directory are skipped.
    pub fn reorganize(&self, source_root: &Path) -> ReorganizeReport {
        let mut report = ReorganizeReport::default();

        for month in &self.config().months {
            let month_path = source_root.join(month);
            if !month_path.is_dir() {
                info!("Month directory not found: {}. Skipping.", month_path.display());
                report.missing_months.push(month.clone());
                continue;
            }

            info!("=== Processing Month: {} ===", month);
            self.reorganize_month(&month_path, month, &mut report);
        }

        report
    }

    /// Wallpaper pass, then thumbnail pass, for one month directory.
    pub fn reorganize_month(&self, month_path: &Path, month: &str, report: &mut ReorganizeReport) {
        self.run_pass(AssetCategory::Wallpaper, month_path, month, report);
        self.run_pass(AssetCategory::Thumbnail, month_path, month, report);
    }

    fn run_pass(
        &self,
        category: AssetCategory,
        month_path: &Path,
        month: &str,
        report: &mut ReorganizeReport,
    ) {
        info!("Processing {}s for {}...", category, month);

        let policy = match category {
            AssetCategory::Wallpaper => &self.wallpapers,
            AssetCategory::Thumbnail => &self.thumbnails,
        };

        for file in policy.candidates(month_path) {
            self.process_candidate(&file, category, month, report);
        }
    }

    fn process_candidate(
        &self,
        file: &Path,
        category: AssetCategory,
        month: &str,
        report: &mut ReorganizeReport,
    ) {
        let file_name = match file.file_name() {
            Some(name) => name.to_string_lossy(),
            None => return,
        };

        match self.matcher.classify(&file_name) {
            Classification::NoDeviceMatch => {
                info!("Skipped {} (no device match): {}", category, file.display());
                report.no_device_match += 1;
            }
            Classification::DisallowedExtension { matched, extension } => {
                debug!(
                    "Ignoring {} for device '{}' with extension {:?}",
                    file.display(),
                    matched,
                    extension
                );
                report.disallowed_extension += 1;
            }
            Classification::UnrecognizedDevice { matched, .. } => {
                warn!(
                    "Skipping unrecognized device '{}' in {}: {}",
                    matched,
                    category,
                    file.display()
                );
                report.unrecognized_device += 1;
            }
            Classification::Eligible(classified) => {
                let dest_dir = self.layout.root_for(category).join(month);
                match move_file(file, &dest_dir, &classified.destination_name()) {
                    Ok(outcome) => {
                        report.moved += 1;
                        if outcome == MoveOutcome::Replaced {
                            report.overwritten += 1;
                        }
                    }
                    Err(e) => {
                        warn!("{}", e);
                        report.failed += 1;
                    }
                }
            }
        }
    }
}

/// Move `source` to `dest_dir/new_name`, creating `dest_dir` first. An
/// existing destination file is replaced. Falls back to copy-and-delete
/// when the rename would cross filesystems.
pub fn move_file(source: &Path, dest_dir: &Path, new_name: &str) -> Result<MoveOutcome> {
    ensure_dir(dest_dir)?;
    let destination = dest_dir.join(new_name);

    let replaced = destination.is_file();
    if replaced {
        warn!(
            "Overwriting {} with {}",
            destination.display(),
            source.display()
        );
    }

    let moved = match fs::rename(source, &destination) {
        Err(e) if e.kind() == ErrorKind::CrossesDevices => {
            debug!("Rename crosses devices, copying {}", source.display());
            fs::copy(source, &destination).and_then(|_| fs::remove_file(source))
        }
        other => other,
    };

    moved.map_err(|e| SqueezeError::MoveFailed {
        from: source.to_path_buf(),
        to: destination.clone(),
        source: e,
    })?;

    info!("Moved: {} -> {}", source.display(), destination.display());
    Ok(if replaced {
        MoveOutcome::Replaced
    } else {
        MoveOutcome::Moved
    })
}
