use std::path::PathBuf;
use std::sync::Arc;

/// Events emitted during feed generation for progress reporting
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// The media folder is being scanned
    ScanningFolder { path: PathBuf },

    /// Scan finished
    ScanCompleted {
        audio_count: usize,
        /// Filename of the cover image, if one was found
        image: Option<String>,
    },

    /// An audio file is being probed
    ProcessingEpisode {
        /// Index of this episode in the feed order
        episode_index: usize,
        total_episodes: usize,
        filename: String,
    },

    /// Embedded tags were removed from a source file
    TagsStripped { filename: String, removed: usize },

    /// The feed document was written
    FeedWritten {
        path: PathBuf,
        episode_count: usize,
    },
}

/// Trait for reporting progress events during feed generation.
///
/// Implementations can use this to display progress bars, log messages,
/// or collect statistics.
pub trait ProgressReporter: Send + Sync {
    /// Report a progress event
    fn report(&self, event: ProgressEvent);
}

/// A shared reference to a progress reporter
pub type SharedProgressReporter = Arc<dyn ProgressReporter>;

/// A no-op progress reporter that silently ignores all events.
/// Useful for tests or quiet mode.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn report(&self, _event: ProgressEvent) {
        // Intentionally empty
    }
}

impl NoopReporter {
    /// Create a new NoopReporter wrapped in an Arc
    pub fn shared() -> SharedProgressReporter {
        Arc::new(Self)
    }
}
