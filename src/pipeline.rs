use crate::constants::{SUCCESS_PREFIX, SUMMARY_PREFIX, WARNING_PREFIX};
use crate::error::{FailureKind, Result, SqueezeError};
use crate::processing::{reencode, ImageAsset, ReencodeOptions};
use crate::remote::RemoteOptimizer;
use crate::utils::{
    calculate_compression_ratio, create_progress_bar, format_file_size, is_image_file, mirror_path,
};
use crate::validation::ensure_dir;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{info, warn};
use walkdir::WalkDir;

/// Sizes for one successfully written file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileOutcome {
    pub original_size: u64,
    pub optimized_size: u64,
}

#[derive(Debug, Clone, Default)]
pub struct CompressionReport {
    pub processed: usize,
    pub failures: BTreeMap<FailureKind, usize>,
    pub bytes_before: u64,
    pub bytes_after: u64,
    pub elapsed: Duration,
}

impl CompressionReport {
    pub fn failed(&self) -> usize {
        self.failures.values().sum()
    }

    pub fn failures_of(&self, kind: FailureKind) -> usize {
        self.failures.get(&kind).copied().unwrap_or(0)
    }

    pub fn compression_ratio(&self) -> f64 {
        calculate_compression_ratio(self.bytes_before, self.bytes_after)
    }

    fn record(&mut self, result: &Result<FileOutcome>) {
        match result {
            Ok(outcome) => {
                self.processed += 1;
                self.bytes_before += outcome.original_size;
                self.bytes_after += outcome.optimized_size;
            }
            Err(e) => *self.failures.entry(e.failure_kind()).or_insert(0) += 1,
        }
    }

    pub fn print_summary(&self) {
        println!("\n{} Compression Summary:", SUMMARY_PREFIX);
        println!("  📁 Files compressed: {}", self.processed);
        println!(
            "  📊 Total original size: {} ({} bytes)",
            format_file_size(self.bytes_before),
            self.bytes_before
        );
        println!(
            "  📊 Total optimized size: {} ({} bytes)",
            format_file_size(self.bytes_after),
            self.bytes_after
        );
        println!("  🎯 Overall compression ratio: {:.1}%", self.compression_ratio());
        println!("  ⏱️  Total time: {:.2?}", self.elapsed);

        if self.failed() == 0 {
            println!("{} Image compression process completed.", SUCCESS_PREFIX);
            return;
        }

        println!("  {}  Failed files: {}", WARNING_PREFIX, self.failed());
        for kind in FailureKind::ALL {
            let count = self.failures_of(kind);
            if count > 0 {
                println!("    - {}: {}", kind, count);
            }
        }
    }
}

/// Re-encodes every image under an input root, sends it through a remote
/// optimizer and writes the result to the mirrored path under an output
/// root.
pub struct CompressionPipeline<'a> {
    optimizer: &'a dyn RemoteOptimizer,
    options: ReencodeOptions,
    jobs: usize,
    show_progress: bool,
}

impl<'a> CompressionPipeline<'a> {
    pub fn new(optimizer: &'a dyn RemoteOptimizer) -> Self {
        Self {
            optimizer,
            options: ReencodeOptions::default(),
            jobs: num_cpus::get(),
            show_progress: false,
        }
    }

    pub fn with_options(mut self, options: ReencodeOptions) -> Self {
        self.options = options;
        self
    }

    /// Number of worker threads; `1` processes files strictly in order.
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn compress(&self, input_root: &Path, output_root: &Path) -> Result<CompressionReport> {
        let start_time = Instant::now();
        let image_files = collect_image_files(input_root);

        if image_files.is_empty() {
            warn!("No image files found under {}", input_root.display());
            return Ok(CompressionReport::default());
        }

        info!(
            "Found {} image files, using {} worker threads",
            image_files.len(),
            self.jobs
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()
            .map_err(|e| SqueezeError::ThreadPool(e.to_string()))?;

        let progress = create_progress_bar(image_files.len() as u64, self.show_progress);

        let results: Vec<Result<FileOutcome>> = pool.install(|| {
            image_files
                .par_iter()
                .map(|source| {
                    let result = self.process_file(source, input_root, output_root);
                    if let Err(e) = &result {
                        let kind = e.failure_kind();
                        warn!(file = %source.display(), kind = %kind, "{} {}", e, kind.hint());
                    }
                    progress.inc(1);
                    result
                })
                .collect()
        });

        progress.finish_and_clear();

        let mut report = CompressionReport::default();
        for result in &results {
            report.record(result);
        }
        report.elapsed = start_time.elapsed();
        Ok(report)
    }

    /// Load, re-encode, optimize remotely and write one file.
    pub fn process_file(
        &self,
        source: &Path,
        input_root: &Path,
        output_root: &Path,
    ) -> Result<FileOutcome> {
        let destination = mirror_path(input_root, source, output_root)?;
        if let Some(parent) = destination.parent() {
            ensure_dir(parent)?;
        }

        info!("Compressing: {} -> {}", source.display(), destination.display());

        let asset = ImageAsset::open(source)?;
        let payload = reencode(&asset, &self.options)?;
        let optimized = self.optimizer.optimize(&payload.bytes)?;
        fs::write(&destination, &optimized)?;

        Ok(FileOutcome {
            original_size: asset.bytes.len() as u64,
            optimized_size: optimized.len() as u64,
        })
    }
}

/// All files under `root` with a compressible extension, in sorted
/// traversal order. Unreadable entries are logged and skipped.
pub fn collect_image_files(root: &Path) -> Vec<PathBuf> {
    let mut image_files = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        let path = entry.path();
        if path.is_file() && is_image_file(path) {
            image_files.push(path.to_path_buf());
        }
    }

    image_files
}
