pub const JPEG_MAX_QUALITY: u8 = 100;
pub const WEBP_MAX_QUALITY: f32 = 100.0;
pub const WEBP_MAX_METHOD: i32 = 6;

pub const OXIPNG_PRESET: u8 = 4;
pub const ZOPFLI_ITERATIONS: u8 = 15;

pub const PROGRESS_BAR_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}";

/// Extensions (lower-case, without dot) the compression pipeline picks up.
pub const COMPRESSIBLE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];

pub const DEFAULT_TINIFY_ENDPOINT: &str = "https://api.tinify.com";
pub const TINIFY_API_USER: &str = "api";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

pub const DEFAULT_SOURCE_DIR: &str = "output";
pub const DEFAULT_WALLPAPERS_DIR: &str = "static/wallpapers";
pub const DEFAULT_THUMBNAILS_DIR: &str = "static/thumbnails";

pub const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub const DEVICES: &[&str] = &["Laptop", "Phone", "Tablet", "Watch", "Desktop", "iPad"];

/// Devices the gallery front-end knows how to display.
pub const RECOGNIZED_DEVICES: &[&str] = &["laptop", "phone", "tablet", "watch"];

pub const DEVICE_ALIASES: &[(&str, &str)] = &[("iPad", "tablet")];

pub const CLASSIFIER_EXTENSIONS: &[&str] = &["jpg", "png"];

pub const EXCLUDED_WALLPAPER_DIRS: &[&str] =
    &["Thumbnails", "TV Graphics", "Bulletin Covers", "Bulletins"];

pub const THUMBNAIL_DIR_NAME: &str = "thumbnails";

// Common output message prefixes
pub const SUCCESS_PREFIX: &str = "✅";
pub const WARNING_PREFIX: &str = "⚠️";
pub const SUMMARY_PREFIX: &str = "📊";
