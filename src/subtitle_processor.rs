use std::fmt;

use log::{debug, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::cue_index::CueIndex;
use crate::errors::{FormatError, SubtitleError};
use crate::markup::MarkupTranslator;
use crate::timecode::{self, TIMECODE_PATTERN};

// @module: SRT document parsing into cues

// @const: Blank-line block separator
static BLOCK_SEPARATOR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\n[ \t]*\n").expect("Invalid block separator regex")
});

// @const: Grammar of a single cue block
static BLOCK_REGEX: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(
        r"(?s)^([0-9]+)[ \t]*\n({tc})[ \t]+-->[ \t]+({tc})(?:[ \t]+X1:(-?[0-9]+)[ \t]+X2:(-?[0-9]+)[ \t]+Y1:(-?[0-9]+)[ \t]+Y2:(-?[0-9]+))?[ \t]*\n(.+)$",
        tc = TIMECODE_PATTERN
    );
    Regex::new(&pattern).expect("Invalid cue block regex")
});

// @struct: Single subtitle cue
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cue {
    // @field: Ordinal from the source file
    index: usize,

    // @field: Start time in seconds
    start: f64,

    // @field: End time in seconds
    end: f64,

    // @field: Position offsets
    x1: i32,
    x2: i32,
    y1: i32,
    y2: i32,

    // @field: Translated, trimmed display text
    text: String,
}

impl Cue {
    /// Create a cue with zero position offsets.
    ///
    /// Fails with `InvalidTimeRange` when `end < start`; the range is never clamped.
    pub fn new(index: usize, start: f64, end: f64, text: impl Into<String>) -> Result<Self, SubtitleError> {
        if end < start {
            return Err(SubtitleError::InvalidTimeRange { start, end });
        }

        Ok(Cue {
            index,
            start,
            end,
            x1: 0,
            x2: 0,
            y1: 0,
            y2: 0,
            text: text.into(),
        })
    }

    /// Attach position offsets
    pub fn with_position(mut self, x1: i32, x2: i32, y1: i32, y2: i32) -> Self {
        self.x1 = x1;
        self.x2 = x2;
        self.y1 = y1;
        self.y2 = y2;
        self
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    pub fn x1(&self) -> i32 {
        self.x1
    }

    pub fn x2(&self) -> i32 {
        self.x2
    }

    pub fn y1(&self) -> i32 {
        self.y1
    }

    pub fn y2(&self) -> i32 {
        self.y2
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the closed interval `[start, end]` contains `time`
    pub fn contains(&self, time: f64) -> bool {
        self.start <= time && time <= self.end
    }

    fn has_position(&self) -> bool {
        self.x1 != 0 || self.x2 != 0 || self.y1 != 0 || self.y2 != 0
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.index)?;
        write!(f, "{} --> {}", timecode::format(self.start), timecode::format(self.end))?;
        if self.has_position() {
            write!(f, " X1:{} X2:{} Y1:{} Y2:{}", self.x1, self.x2, self.y1, self.y2)?;
        }
        writeln!(f)?;
        writeln!(f, "{}", self.text)
    }
}

/// A block that failed to parse and was left out of the result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedBlock {
    /// 1-based position among the non-empty blocks of the document
    pub block_number: usize,

    /// Raw block text as it appeared in the document
    pub raw: String,

    /// Why the block was skipped
    #[serde(serialize_with = "serialize_error")]
    pub error: SubtitleError,
}

impl fmt::Display for SkippedBlock {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "block {}: {}", self.block_number, self.error)
    }
}

fn serialize_error<S: serde::Serializer>(error: &SubtitleError, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

/// Result of parsing a document: the cues plus non-fatal diagnostics
#[derive(Debug, Clone)]
pub struct ParseReport {
    /// Successfully parsed cues, in document order
    pub cues: CueIndex,

    /// Blocks that did not parse
    pub skipped: Vec<SkippedBlock>,
}

impl ParseReport {
    /// True when every non-empty block became a cue
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Parser for SRT documents with the position-metadata extension
pub struct CueParser;

impl CueParser {
    /// Parse raw bytes, rejecting anything that is not UTF-8
    pub fn parse_bytes(bytes: &[u8]) -> Result<ParseReport, SubtitleError> {
        let document = std::str::from_utf8(bytes)
            .map_err(|e| SubtitleError::Document(format!("document is not valid UTF-8: {}", e)))?;
        Ok(Self::parse_str(document))
    }

    /// Parse a document held in memory.
    ///
    /// Malformed blocks are skipped and reported in `ParseReport::skipped`;
    /// they never abort the parse. Cue order is block order.
    pub fn parse_str(document: &str) -> ParseReport {
        let normalized = Self::normalize(document);

        let mut cues = Vec::new();
        let mut skipped = Vec::new();

        let blocks = BLOCK_SEPARATOR_REGEX
            .split(&normalized)
            .map(str::trim)
            .filter(|block| !block.is_empty());

        for (i, block) in blocks.enumerate() {
            let block_number = i + 1;
            match Self::parse_block(block) {
                Ok(cue) => {
                    debug!(
                        "Parsed cue {} ({} --> {})",
                        cue.index,
                        timecode::format(cue.start),
                        timecode::format(cue.end)
                    );
                    cues.push(cue);
                }
                Err(error) => {
                    warn!("Skipping block {}: {}", block_number, error);
                    skipped.push(SkippedBlock {
                        block_number,
                        raw: block.to_string(),
                        error,
                    });
                }
            }
        }

        let cues = CueIndex::new(cues);

        let overlap_count = cues.overlap_count();
        if overlap_count > 0 {
            warn!("Found {} overlapping subtitle cues", overlap_count);
        }

        info!("Parsed {} cues, skipped {} blocks", cues.len(), skipped.len());

        ParseReport { cues, skipped }
    }

    /// Parse one trimmed block into a cue
    pub fn parse_block(block: &str) -> Result<Cue, SubtitleError> {
        let caps = BLOCK_REGEX
            .captures(block)
            .ok_or_else(|| SubtitleError::BlockFormat {
                reason: Self::describe_mismatch(block),
            })?;

        let index = Self::parse_index(&caps[1])?;
        let start = timecode::parse(&caps[2])?;
        let end = timecode::parse(&caps[3])?;

        let position = match (caps.get(4), caps.get(5), caps.get(6), caps.get(7)) {
            (Some(x1), Some(x2), Some(y1), Some(y2)) => (
                Self::parse_offset(x1.as_str(), "X1")?,
                Self::parse_offset(x2.as_str(), "X2")?,
                Self::parse_offset(y1.as_str(), "Y1")?,
                Self::parse_offset(y2.as_str(), "Y2")?,
            ),
            _ => (0, 0, 0, 0),
        };

        let text = MarkupTranslator::translate(caps[8].trim());

        Ok(Cue::new(index, start, end, text)?.with_position(position.0, position.1, position.2, position.3))
    }

    fn normalize(document: &str) -> String {
        document
            .strip_prefix('\u{feff}')
            .unwrap_or(document)
            .replace("\r\n", "\n")
            .replace('\r', "\n")
    }

    fn parse_index(value: &str) -> Result<usize, FormatError> {
        match value.parse::<usize>() {
            Ok(index) if index > 0 => Ok(index),
            _ => Err(FormatError::InvalidNumber {
                field: "index",
                value: value.to_string(),
            }),
        }
    }

    fn parse_offset(value: &str, field: &'static str) -> Result<i32, FormatError> {
        value.parse::<i32>().map_err(|_| FormatError::InvalidNumber {
            field,
            value: value.to_string(),
        })
    }

    // Best-effort explanation of which grammar line failed
    fn describe_mismatch(block: &str) -> String {
        let mut lines = block.lines();

        let index_line = lines.next().unwrap_or_default().trim();
        if index_line.is_empty() || !index_line.chars().all(|c| c.is_ascii_digit()) {
            return format!("expected a cue index, found '{}'", index_line);
        }

        let Some(timing_line) = lines.next() else {
            return "missing timing line".to_string();
        };
        if !timing_line.contains("-->") {
            return format!("timing line has no '-->' arrow: '{}'", timing_line.trim());
        }

        if lines.next().is_none() {
            return "missing cue text".to_string();
        }

        format!(
            "timing line must be 'HH:MM:SS,mmm --> HH:MM:SS,mmm' with an optional 'X1:n X2:n Y1:n Y2:n' suffix: '{}'",
            timing_line.trim()
        )
    }
}
