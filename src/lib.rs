pub mod classify;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod formats;
pub mod logger;
pub mod pipeline;
pub mod processing;
pub mod remote;
pub mod reorganize;
pub mod traversal;
pub mod utils;
pub mod validation;

pub use classify::{Classification, ClassifiedFile, DeviceMatcher};
pub use config::ClassifierConfig;
pub use error::{FailureKind, RemoteError, Result, SqueezeError};
pub use formats::{detect_format, SourceFormat};
pub use pipeline::{collect_image_files, CompressionPipeline, CompressionReport, FileOutcome};
pub use processing::{reencode, CompressedPayload, ImageAsset, ReencodeOptions};
pub use remote::{classify_response, RemoteOptimizer, TinifyClient, TinifyOptions};
pub use reorganize::{
    move_file, AssetCategory, AssetClassifier, DestinationLayout, MoveOutcome, ReorganizeReport,
};
pub use traversal::TraversalPolicy;
pub use utils::{is_image_file, mirror_path};
