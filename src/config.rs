// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use url::Url;

use crate::error::ConfigError;

fn default_language() -> String {
    "en-us".to_string()
}

/// Podcast configuration, loaded once per run from a TOML file
#[derive(Debug, Clone, Deserialize)]
pub struct PodcastConfig {
    /// Base URL under which the media folder is served
    pub podcast_http: String,

    /// Folder containing the audio files; the feed is written here too
    pub media_folder: PathBuf,

    /// Description used for the channel and every episode
    pub podcast_description: String,

    pub podcast_title: String,

    pub author: String,

    /// Remove embedded tags from the source files while generating.
    /// This rewrites the files in place.
    #[serde(default)]
    pub strip_mp3_metadata: bool,

    #[serde(default = "default_language")]
    pub language: String,

    #[serde(default)]
    pub copyright: Option<String>,

    #[serde(default)]
    pub owner_name: Option<String>,

    #[serde(default)]
    pub owner_email: Option<String>,

    /// iTunes category, e.g. "Arts"
    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub keywords: Option<String>,

    #[serde(default)]
    pub explicit: bool,
}

impl PodcastConfig {
    /// Base URL with any trailing slashes removed, ready for joining filenames
    pub fn base_url(&self) -> &str {
        self.podcast_http.trim_end_matches('/')
    }

    /// Check that the base URL is an absolute http(s) URL
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.podcast_http).map_err(|e| ConfigError::InvalidBaseUrl {
            url: self.podcast_http.clone(),
            source: e,
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme {
                url: self.podcast_http.clone(),
            });
        }

        Ok(())
    }
}

/// Load and validate a configuration file
pub fn load_config(path: &Path) -> Result<PodcastConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
        path: path.to_path_buf(),
        source: e,
    })?;

    let config: PodcastConfig =
        toml::from_str(&content).map_err(|e| ConfigError::ParseFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;
    use tempfile::NamedTempFile;

    const MINIMAL: &str = r#"
podcast_http = "http://server/podcast"
media_folder = "/some/folder/with/media"
podcast_description = "Brief podcast description"
podcast_title = "Title"
author = "Author"
"#;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn minimal_config_uses_defaults() {
        let file = write_config(MINIMAL);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.podcast_title, "Title");
        assert_eq!(config.media_folder, PathBuf::from("/some/folder/with/media"));
        assert!(!config.strip_mp3_metadata);
        assert!(!config.explicit);
        assert_eq!(config.language, "en-us");
        assert!(config.copyright.is_none());
        assert!(config.owner_email.is_none());
    }

    #[test]
    fn base_url_trims_trailing_slashes() {
        let file = write_config(&MINIMAL.replace(
            "http://server/podcast",
            "http://server/podcast//",
        ));
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.base_url(), "http://server/podcast");
    }

    #[test]
    fn optional_fields_are_parsed() {
        let extended = format!(
            "{MINIMAL}\nstrip_mp3_metadata = true\ncategory = \"Arts\"\nowner_email = \"podcast@example.com\"\n"
        );
        let file = write_config(&extended);
        let config = load_config(file.path()).unwrap();

        assert!(config.strip_mp3_metadata);
        assert_eq!(config.category, Some("Arts".to_string()));
        assert_eq!(config.owner_email, Some("podcast@example.com".to_string()));
    }

    #[test]
    fn rejects_unparseable_base_url() {
        let file = write_config(&MINIMAL.replace("http://server/podcast", "not a url"));
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn rejects_non_http_scheme() {
        let file = write_config(&MINIMAL.replace("http://server/podcast", "ftp://server/podcast"));
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::UnsupportedScheme { .. })));
    }

    #[test]
    fn missing_required_field_is_a_parse_error() {
        let file = write_config("podcast_title = \"Title\"\n");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::ParseFailed { .. })));
    }

    #[test]
    fn nonexistent_file_is_a_read_error() {
        let result = load_config(Path::new("/nonexistent/podgen.toml"));
        assert!(matches!(result, Err(ConfigError::ReadFailed { .. })));
    }
}
