use std::path::{Path, PathBuf};

use crate::error::ScanError;

const AUDIO_EXTENSION: &str = "mp3";
const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "gif"];

/// Result of scanning the media folder
#[derive(Debug, Clone)]
pub struct MediaScan {
    /// Audio files in the folder, sorted by filename
    pub audio_files: Vec<PathBuf>,
    /// Filename of the cover image, if one was found
    pub image: Option<String>,
    /// The scanned folder
    pub folder: PathBuf,
}

/// Scan the media folder for audio files and a cover image.
///
/// Only direct children are considered and files are classified by exact,
/// case-sensitive extension match. Audio files are sorted by filename so the
/// episode order (and the synthesized publish dates derived from it) is
/// stable across filesystems. A missing cover image is not an error.
pub fn scan_media_folder(folder: &Path) -> Result<MediaScan, ScanError> {
    if !folder.is_dir() {
        return Err(ScanError::FolderNotFound(folder.to_path_buf()));
    }

    let entries = std::fs::read_dir(folder).map_err(|e| ScanError::ReadFolderFailed {
        path: folder.to_path_buf(),
        source: e,
    })?;

    let mut audio_files = Vec::new();
    let mut image_candidates = Vec::new();

    for entry in entries {
        let entry = entry.map_err(|e| ScanError::ReadFolderFailed {
            path: folder.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let Some(extension) = path.extension().and_then(|e| e.to_str()) else {
            continue;
        };

        if extension == AUDIO_EXTENSION {
            audio_files.push(path);
        } else if IMAGE_EXTENSIONS.contains(&extension) {
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                image_candidates.push(name.to_string());
            }
        }
    }

    audio_files.sort();
    image_candidates.sort();

    Ok(MediaScan {
        audio_files,
        image: image_candidates.into_iter().next(),
        folder: folder.to_path_buf(),
    })
}
