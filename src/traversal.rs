use crate::config::ClassifierConfig;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::{DirEntry, WalkDir};

type DirPredicate = Box<dyn Fn(&str) -> bool + Send + Sync>;

/// How a month directory is walked: which subdirectories are never entered,
/// and which directories' direct files are candidates. Both predicates see
/// only the directory's base name.
pub struct TraversalPolicy {
    prune: DirPredicate,
    eligible: DirPredicate,
}

impl TraversalPolicy {
    pub fn new<P, E>(prune: P, eligible: E) -> Self
    where
        P: Fn(&str) -> bool + Send + Sync + 'static,
        E: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self {
            prune: Box::new(prune),
            eligible: Box::new(eligible),
        }
    }

    /// Every file except those under the excluded directories.
    pub fn wallpapers(config: &ClassifierConfig) -> Self {
        let excluded = config.excluded_dirs.clone();
        Self::new(move |name| excluded.iter().any(|dir| dir == name), |_| true)
    }

    /// Only files sitting directly in a thumbnail directory, wherever it is.
    pub fn thumbnails(config: &ClassifierConfig) -> Self {
        let thumbnail_dir = config.thumbnail_dir.clone();
        Self::new(|_| false, move |name| name.eq_ignore_ascii_case(&thumbnail_dir))
    }

    pub fn prunes(&self, dir_name: &str) -> bool {
        (self.prune)(dir_name)
    }

    pub fn accepts_files_in(&self, dir_name: &str) -> bool {
        (self.eligible)(dir_name)
    }

    /// Candidate files under `root`, in sorted depth-first order. The root
    /// itself is never pruned. Unreadable entries are logged and skipped.
    pub fn candidates(&self, root: &Path) -> Vec<PathBuf> {
        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.is_pruned(entry));

        let mut files = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let parent_name = path
                .parent()
                .and_then(Path::file_name)
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();

            if self.accepts_files_in(&parent_name) {
                files.push(path.to_path_buf());
            }
        }
        files
    }

    fn is_pruned(&self, entry: &DirEntry) -> bool {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && self.prunes(&entry.file_name().to_string_lossy())
    }
}
