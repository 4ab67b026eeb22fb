// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::Path;
use std::time::Duration;

use lofty::prelude::*;
use lofty::probe::Probe;
use lofty::tag::TagType;

use crate::error::AudioError;

/// Audio file access abstraction for testability
pub trait AudioProber {
    /// Decode the file far enough to determine its playback duration
    fn probe_duration(&self, path: &Path) -> Result<Duration, AudioError>;

    /// Remove every embedded tag from the file, rewriting it in place.
    /// The audio payload is untouched. Returns the number of tags removed.
    fn strip_tags(&self, path: &Path) -> Result<usize, AudioError>;
}

/// Default prober implementation using lofty
#[derive(Debug, Default, Clone, Copy)]
pub struct LoftyProber;

impl LoftyProber {
    pub fn new() -> Self {
        Self
    }

    fn read_file(&self, path: &Path) -> Result<lofty::file::TaggedFile, AudioError> {
        Probe::open(path)
            .and_then(|probe| probe.read())
            .map_err(|e| AudioError::ProbeFailed {
                path: path.to_path_buf(),
                source: e,
            })
    }
}

impl AudioProber for LoftyProber {
    fn probe_duration(&self, path: &Path) -> Result<Duration, AudioError> {
        let tagged_file = self.read_file(path)?;
        Ok(tagged_file.properties().duration())
    }

    fn strip_tags(&self, path: &Path) -> Result<usize, AudioError> {
        let tagged_file = self.read_file(path)?;

        let tag_types: Vec<TagType> = tagged_file
            .tags()
            .iter()
            .map(|tag| tag.tag_type())
            .collect();

        for tag_type in &tag_types {
            tag_type
                .remove_from_path(path)
                .map_err(|e| AudioError::StripFailed {
                    path: path.to_path_buf(),
                    source: e,
                })?;
        }

        Ok(tag_types.len())
    }
}
