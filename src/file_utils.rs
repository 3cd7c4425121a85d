use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::errors::SubtitleError;
use crate::subtitle_processor::{CueParser, ParseReport};

// @module: Subtitle document loading

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @reads: Whole subtitle document as UTF-8 text
    // @errors: SubtitleError::Document when missing, unreadable or not UTF-8
    pub fn read_document<P: AsRef<Path>>(path: P) -> Result<String, SubtitleError> {
        let path = path.as_ref();
        let bytes = fs::read(path)
            .map_err(|e| SubtitleError::Document(format!("cannot read {}: {}", path.display(), e)))?;

        String::from_utf8(bytes)
            .map_err(|_| SubtitleError::Document(format!("{} is not valid UTF-8", path.display())))
    }

    // @parses: Subtitle file into cues and diagnostics
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<ParseReport, SubtitleError> {
        let document = Self::read_document(path)?;
        Ok(CueParser::parse_str(&document))
    }

    // @finds: All .srt files under a directory, sorted
    pub fn find_subtitle_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        let mut files = Vec::new();

        for entry in WalkDir::new(dir) {
            let entry = entry.with_context(|| format!("Failed to walk directory: {}", dir.display()))?;
            let path = entry.path();
            let is_srt = path
                .extension()
                .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case("srt"));

            if entry.file_type().is_file() && is_srt {
                files.push(path.to_path_buf());
            }
        }

        files.sort();
        Ok(files)
    }
}
