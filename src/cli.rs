use crate::constants::{DEFAULT_SOURCE_DIR, DEFAULT_THUMBNAILS_DIR, DEFAULT_WALLPAPERS_DIR};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "wallpaper-squeeze",
    about = "Pre-compress images losslessly, optimize them remotely, and file device wallpapers",
    long_about = "wallpaper-squeeze has two jobs. `compress` re-encodes every PNG, JPEG and WebP \
                  under a folder without visible loss, sends the result to the Tinify (TinyPNG) API \
                  and writes the optimized file to the same relative path under an output folder. \
                  `reorganize` walks a month-by-month folder tree, picks out device wallpapers and \
                  thumbnails by file name and moves them to <category>/<Month>/<device>.<ext>.",
    version,
    after_help = "EXAMPLES:\n  \
    TINIFY_API_KEY=xxxx wallpaper-squeeze compress ./raw ./compressed -j 4\n  \
    wallpaper-squeeze reorganize --source output\n  \
    wallpaper-squeeze reorganize -s output -c devices.toml -v"
)]
pub struct Args {
    #[arg(short, long, global = true, help = "Show debug-level log messages")]
    pub verbose: bool,

    #[arg(
        short,
        long,
        global = true,
        help = "Only show warnings and errors",
        long_help = "Only show warnings and errors. Also hides progress bars and summaries. \
                     Overrides --verbose."
    )]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(
        about = "Compress every image under a folder through the Tinify API",
        long_about = "Recursively find .png, .jpg, .jpeg and .webp files, re-encode them in memory \
                      (lossless where the format allows), upload the result to the Tinify API and \
                      write the optimized bytes to the mirrored path under OUTPUT. A failure on one \
                      file is logged and the batch continues."
    )]
    Compress {
        #[arg(help = "Input folder")]
        input: PathBuf,

        #[arg(help = "Output folder (created if missing)")]
        output: PathBuf,

        #[arg(
            long,
            env = "TINIFY_API_KEY",
            hide_env_values = true,
            help = "Tinify API key",
            long_help = "Tinify API key. Required; read from TINIFY_API_KEY when not given."
        )]
        api_key: Option<String>,

        #[arg(
            long,
            env = "TINIFY_ENDPOINT",
            help = "Tinify API base URL (default: https://api.tinify.com)"
        )]
        endpoint: Option<String>,

        #[arg(long, help = "Per-request timeout in seconds (default: 120)")]
        timeout: Option<u64>,

        #[arg(
            short = 'j',
            long,
            help = "Number of parallel workers (default: number of CPUs)",
            long_help = "Number of files processed at once. Use 1 to process files strictly \
                         one after another."
        )]
        jobs: Option<usize>,

        #[arg(
            long,
            help = "Use zopfli for the PNG optimization pass (slow, slightly smaller)"
        )]
        zopfli: bool,
    },

    #[command(
        about = "Move device wallpapers and thumbnails into the gallery layout",
        long_about = "For each month folder (January..December) under SOURCE, move files named \
                      after a device (Laptop_dark.jpg, iPad_home.png, ...) to \
                      WALLPAPERS/<Month>/<device>.<ext>, and files inside any 'Thumbnails' folder \
                      to THUMBNAILS/<Month>/<device>.<ext>. Unknown devices and other files are \
                      left in place."
    )]
    Reorganize {
        #[arg(short, long, default_value = DEFAULT_SOURCE_DIR, help = "Folder containing the month folders")]
        source: PathBuf,

        #[arg(long, default_value = DEFAULT_WALLPAPERS_DIR, help = "Destination root for wallpapers")]
        wallpapers: PathBuf,

        #[arg(long, default_value = DEFAULT_THUMBNAILS_DIR, help = "Destination root for thumbnails")]
        thumbnails: PathBuf,

        #[arg(
            short,
            long,
            help = "TOML file overriding months, devices, aliases or exclusions"
        )]
        config: Option<PathBuf>,
    },
}
