use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use wallpaper_squeeze::cli::{Args, Commands};
use wallpaper_squeeze::validation::{ensure_dir, validate_input_dir};
use wallpaper_squeeze::{
    logger, AssetClassifier, ClassifierConfig, CompressionPipeline, DestinationLayout,
    ReencodeOptions, TinifyClient, TinifyOptions,
};

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init(args.verbose, args.quiet);

    match args.command {
        Commands::Compress {
            input,
            output,
            api_key,
            endpoint,
            timeout,
            jobs,
            zopfli,
        } => {
            // The key is checked before any file is touched
            let options = TinifyOptions::new(api_key, endpoint, timeout)?;
            run_compress(&input, &output, options, jobs, zopfli, args.quiet)?;
        }
        Commands::Reorganize {
            source,
            wallpapers,
            thumbnails,
            config,
        } => {
            run_reorganize(&source, wallpapers, thumbnails, config, args.quiet)?;
        }
    }

    Ok(())
}

fn run_compress(
    input: &Path,
    output: &Path,
    options: TinifyOptions,
    jobs: Option<usize>,
    zopfli: bool,
    quiet: bool,
) -> Result<()> {
    validate_input_dir(input)
        .with_context(|| format!("The specified input folder is not usable: {}", input.display()))?;
    ensure_dir(output)?;

    if !quiet {
        println!("🚀 Starting compression...");
        println!("📁 Input: {}", input.display());
        println!("📁 Output: {}", output.display());
    }

    let client = TinifyClient::new(options)?;
    let pipeline = CompressionPipeline::new(&client)
        .with_options(ReencodeOptions { zopfli })
        .with_jobs(jobs.unwrap_or_else(num_cpus::get))
        .with_progress(!quiet);

    let report = pipeline.compress(input, output)?;
    if !quiet {
        report.print_summary();
    }
    Ok(())
}

fn run_reorganize(
    source: &Path,
    wallpapers: PathBuf,
    thumbnails: PathBuf,
    config: Option<PathBuf>,
    quiet: bool,
) -> Result<()> {
    let config = match config {
        Some(path) => ClassifierConfig::load(&path)
            .with_context(|| format!("Failed to load classifier config {}", path.display()))?,
        None => ClassifierConfig::default(),
    };

    let classifier = AssetClassifier::new(config, DestinationLayout::new(wallpapers, thumbnails))?;
    let report = classifier.reorganize(source);

    if !quiet {
        report.print_summary();
    }
    Ok(())
}
