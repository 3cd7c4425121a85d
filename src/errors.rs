/*!
 * Error types for the easysubs library.
 *
 * This module contains custom error types for the different layers of the crate,
 * using the thiserror crate for ergonomic error definitions:
 * - `FormatError`: a timecode or numeric field failed to parse
 * - `SubtitleError`: document, block and index level failures
 * - `PlaybackError`: misuse of the playback surface
 * - `AppError`: top-level wrapper used by the binary
 */

use thiserror::Error;

/// Errors raised while converting a single textual field
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    /// Timestamp does not match `HH:MM:SS,mmm`
    #[error("Invalid timecode '{0}': expected HH:MM:SS,mmm")]
    InvalidTimecode(String),

    /// A numeric field is not a valid integer for its range
    #[error("Invalid {field}: '{value}'")]
    InvalidNumber {
        /// Name of the field being parsed
        field: &'static str,
        /// Raw text of the field
        value: String,
    },
}

/// Errors that can occur while parsing or querying subtitles
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubtitleError {
    /// The document is absent, unreadable or not valid text
    #[error("Document error: {0}")]
    Document(String),

    /// A block does not follow the cue grammar
    #[error("Malformed block: {reason}")]
    BlockFormat {
        /// What part of the grammar failed
        reason: String,
    },

    /// A field inside a grammar-matching block failed to parse
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    /// The end time lies before the start time
    #[error("Invalid time range: end {end}s is before start {start}s")]
    InvalidTimeRange {
        /// Start time in seconds
        start: f64,
        /// End time in seconds
        end: f64,
    },

    /// Duration was requested on an index with no cues
    #[error("Duration is undefined for an empty cue index")]
    DurationUndefined,
}

/// Errors raised by the playback surface
#[derive(Error, Debug)]
pub enum PlaybackError {
    /// No display sink was attached before starting or ticking
    #[error("No display target attached to the subtitle player")]
    MissingDisplayTarget,

    /// The player was ticked while stopped
    #[error("Subtitle player is not playing")]
    NotPlaying,

    /// Error from parsing or querying the cues
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from subtitle processing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Error from playback
    #[error("Playback error: {0}")]
    Playback(#[from] PlaybackError),
}

// Utility functions for error conversion
impl AppError {
    /// Wrap a configuration failure, keeping its context chain
    pub fn config(error: anyhow::Error) -> Self {
        Self::Config(format!("{:#}", error))
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
