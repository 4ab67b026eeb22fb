// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use rss::validation::Validate;

use crate::audio::AudioProber;
use crate::config::PodcastConfig;
use crate::error::GenerateError;
use crate::feed::{Episode, FEED_FILENAME, build_channel};
use crate::progress::{ProgressEvent, SharedProgressReporter};
use crate::scan::scan_media_folder;

/// Result of a feed generation run
#[derive(Debug, Clone)]
pub struct FeedSummary {
    /// Number of episodes in the generated feed
    pub episode_count: usize,
    /// Cover image filename, if one was found
    pub image: Option<String>,
    /// Total number of tags removed across all source files
    pub tags_stripped: usize,
    /// Path of the written feed document
    pub output_path: PathBuf,
}

/// Generate the feed document for a media folder
///
/// This is the main entry point for the library. It:
/// 1. Scans the media folder for audio files and a cover image
/// 2. Probes each audio file for its playback duration
/// 3. Optionally strips embedded tags from the source files in place
/// 4. Assembles the channel document and writes it to `feed.xml`
///
/// Any existing `feed.xml` is overwritten. A failing audio file aborts the
/// whole run; there is no per-file error isolation and no partial output.
pub fn generate_feed<P: AudioProber>(
    prober: &P,
    config: &PodcastConfig,
    reporter: SharedProgressReporter,
) -> Result<FeedSummary, GenerateError> {
    generate_feed_at(prober, config, reporter, Utc::now())
}

/// Like [`generate_feed`], with the run timestamp supplied by the caller.
///
/// The timestamp becomes the channel publish date; episode `i` (in sorted
/// filename order) is dated `i` days earlier, so the feed presents the
/// folder as a daily sequence ending today.
pub fn generate_feed_at<P: AudioProber>(
    prober: &P,
    config: &PodcastConfig,
    reporter: SharedProgressReporter,
    now: DateTime<Utc>,
) -> Result<FeedSummary, GenerateError> {
    reporter.report(ProgressEvent::ScanningFolder {
        path: config.media_folder.clone(),
    });

    let scan = scan_media_folder(&config.media_folder)?;

    reporter.report(ProgressEvent::ScanCompleted {
        audio_count: scan.audio_files.len(),
        image: scan.image.clone(),
    });

    let total_episodes = scan.audio_files.len();
    let mut episodes = Vec::with_capacity(total_episodes);
    let mut tags_stripped = 0;

    for (episode_index, path) in scan.audio_files.iter().enumerate() {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        reporter.report(ProgressEvent::ProcessingEpisode {
            episode_index,
            total_episodes,
            filename: filename.clone(),
        });

        let duration = prober.probe_duration(path)?;

        if config.strip_mp3_metadata {
            let removed = prober.strip_tags(path)?;
            if removed > 0 {
                reporter.report(ProgressEvent::TagsStripped {
                    filename: filename.clone(),
                    removed,
                });
            }
            tags_stripped += removed;
        }

        episodes.push(Episode {
            title: path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default(),
            description: config.podcast_description.clone(),
            duration_seconds: duration.as_secs(),
            url: format!("{}/{filename}", config.base_url()),
            pub_date: now - chrono::Duration::days(episode_index as i64),
        });
    }

    let channel = build_channel(config, scan.image.as_deref(), &episodes, now);
    channel.validate()?;

    let output_path = scan.folder.join(FEED_FILENAME);
    // Channel::to_string does not emit the XML declaration itself.
    let document = format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n{}",
        channel.to_string()
    );
    std::fs::write(&output_path, document).map_err(|e| GenerateError::WriteFailed {
        path: output_path.clone(),
        source: e,
    })?;

    reporter.report(ProgressEvent::FeedWritten {
        path: output_path.clone(),
        episode_count: episodes.len(),
    });

    Ok(FeedSummary {
        episode_count: episodes.len(),
        image: scan.image,
        tags_stripped,
        output_path,
    })
}
