use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Failures reported by the remote optimization service.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RemoteError {
    #[error("Account error: {0}")]
    Account(String),

    #[error("Client error: {0}")]
    Client(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Unexpected response from optimization service: {0}")]
    UnexpectedResponse(String),
}

#[derive(Debug, Error)]
pub enum SqueezeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    ImageProcessing(#[from] image::ImageError),

    #[error("PNG optimization error: {0}")]
    PngOptimization(String),

    #[error("WebP encoding error: {0}")]
    WebpEncoding(String),

    #[error("JPEG encoding error: {0}")]
    JpegEncoding(String),

    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Failed to create output directory: {0}")]
    DirectoryCreationFailed(PathBuf),

    #[error("Path {0} is not inside the input root")]
    OutsideInputRoot(PathBuf),

    #[error("Failed to move {from} to {to}: {source}")]
    MoveFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Walkdir error: {0}")]
    WalkdirError(#[from] walkdir::Error),

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(String),

    #[error("TINIFY_API_KEY is not set. Pass --api-key or export the variable")]
    MissingApiKey,

    #[error("Invalid classifier configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to parse configuration file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid device pattern: {0}")]
    Pattern(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, SqueezeError>;

/// Category a per-file failure is logged and counted under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FailureKind {
    Account,
    Client,
    Server,
    Connection,
    Unexpected,
}

impl FailureKind {
    pub const ALL: [FailureKind; 5] = [
        FailureKind::Account,
        FailureKind::Client,
        FailureKind::Server,
        FailureKind::Connection,
        FailureKind::Unexpected,
    ];

    pub fn hint(&self) -> &'static str {
        match self {
            FailureKind::Account => "Verify your API key and account limits.",
            FailureKind::Client => "Check source image and request options.",
            FailureKind::Server => "Temporary issue with the optimization service.",
            FailureKind::Connection => "A network connection error occurred.",
            FailureKind::Unexpected => "The file was left unprocessed.",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::Account => "Account Error",
            FailureKind::Client => "Client Error",
            FailureKind::Server => "Server Error",
            FailureKind::Connection => "Connection Error",
            FailureKind::Unexpected => "Unexpected Error",
        };
        write!(f, "{}", name)
    }
}

impl SqueezeError {
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            SqueezeError::Remote(RemoteError::Account(_)) => FailureKind::Account,
            SqueezeError::Remote(RemoteError::Client(_)) => FailureKind::Client,
            SqueezeError::Remote(RemoteError::Server(_)) => FailureKind::Server,
            SqueezeError::Remote(RemoteError::Connection(_)) => FailureKind::Connection,
            _ => FailureKind::Unexpected,
        }
    }
}
