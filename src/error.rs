use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading the podcast configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Base URL '{url}' must use http or https")]
    UnsupportedScheme { url: String },
}

/// Errors that can occur when scanning the media folder
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Media folder does not exist: {0}")]
    FolderNotFound(PathBuf),

    #[error("Failed to read media folder {path}: {source}")]
    ReadFolderFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur when probing or rewriting audio files
#[derive(Error, Debug)]
pub enum AudioError {
    #[error("Failed to read audio file {path}: {source}")]
    ProbeFailed {
        path: PathBuf,
        #[source]
        source: lofty::error::LoftyError,
    },

    #[error("Failed to strip tags from {path}: {source}")]
    StripFailed {
        path: PathBuf,
        #[source]
        source: lofty::error::LoftyError,
    },
}

/// Top-level errors for feed generation
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    #[error("Audio error: {0}")]
    Audio(#[from] AudioError),

    #[error("Generated feed failed validation: {0}")]
    InvalidFeed(#[from] rss::validation::ValidationError),

    #[error("Failed to write feed file {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
