pub mod audio;
pub mod config;
pub mod error;
pub mod feed;
pub mod generate;
pub mod progress;
pub mod scan;

// Re-export main types for convenience
pub use audio::{AudioProber, LoftyProber};
pub use config::{PodcastConfig, load_config};
pub use error::{AudioError, ConfigError, GenerateError, ScanError};
pub use feed::{Episode, FEED_FILENAME, build_channel};
pub use generate::{FeedSummary, generate_feed, generate_feed_at};
pub use progress::{NoopReporter, ProgressEvent, ProgressReporter, SharedProgressReporter};
pub use scan::{MediaScan, scan_media_folder};
