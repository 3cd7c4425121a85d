/*!
 * Tests for subtitle document parsing
 */

use easysubs::errors::SubtitleError;
use easysubs::subtitle_processor::{Cue, CueParser};

use crate::common;

/// Test that cues come back in block order
#[test]
fn test_parse_withValidDocument_shouldPreserveBlockOrder() {
    common::init_logging();
    let document = "3\n00:00:05,000 --> 00:00:06,000\nthird by index\n\n1\n00:00:01,000 --> 00:00:02,000\nfirst by index\n";
    let report = CueParser::parse_str(document);

    let indices: Vec<usize> = report.cues.iter().map(Cue::index).collect();
    assert_eq!(indices, vec![3, 1]);
}

/// Test that duplicate indices are kept as-is
#[test]
fn test_parse_withDuplicateIndices_shouldNotDeduplicate() {
    let document = "1\n00:00:01,000 --> 00:00:02,000\na\n\n1\n00:00:03,000 --> 00:00:04,000\nb\n";
    let report = CueParser::parse_str(document);
    assert_eq!(report.cues.len(), 2);
}

/// Test that one bad block does not stop the rest
#[test]
fn test_parse_withMissingArrow_shouldSkipOnlyThatBlock() {
    common::init_logging();
    let document = "1\n00:00:01,000 --> 00:00:02,000\nfirst\n\n2\n00:00:03,000 00:00:04,000\nbroken\n\n3\n00:00:05,000 --> 00:00:06,000\nthird\n";
    let report = CueParser::parse_str(document);

    let texts: Vec<&str> = report.cues.iter().map(Cue::text).collect();
    assert_eq!(texts, vec!["first", "third"]);

    assert_eq!(report.skipped.len(), 1);
    let skipped = &report.skipped[0];
    assert_eq!(skipped.block_number, 2);
    assert!(skipped.raw.contains("broken"));
    assert!(matches!(skipped.error, SubtitleError::BlockFormat { .. }));
}

/// Test that numeric failures inside a matching block are reported per block
#[test]
fn test_parse_withOverflowingIndex_shouldReportFormatError() {
    let document = "99999999999999999999999\n00:00:01,000 --> 00:00:02,000\nhuge\n\n2\n00:00:03,000 --> 00:00:04,000\nfine\n";
    let report = CueParser::parse_str(document);

    assert_eq!(report.cues.len(), 1);
    assert!(matches!(report.skipped[0].error, SubtitleError::Format(_)));
}

/// Test that a block without text is malformed
#[test]
fn test_parse_withMissingText_shouldSkip() {
    let report = CueParser::parse_str("1\n00:00:01,000 --> 00:00:02,000\n");
    assert!(report.cues.is_empty());
    assert_eq!(report.skipped.len(), 1);
}

/// Test that the blank-line limitation splits multi-paragraph text
#[test]
fn test_parse_withBlankLineInsideText_shouldSplitBlock() {
    let document = "1\n00:00:01,000 --> 00:00:02,000\nline one\n\nline two after blank\n";
    let report = CueParser::parse_str(document);

    assert_eq!(report.cues.len(), 1);
    assert_eq!(report.cues.get(0).unwrap().text(), "line one");
    assert_eq!(report.skipped.len(), 1);
}

/// Test that parsing twice gives identical cues
#[test]
fn test_parse_twice_shouldYieldIdenticalCues() {
    let document = "1\n00:00:01,000 --> 00:00:02,000 X1:1 X2:2 Y1:3 Y2:4\n{b}a{/b}\n\n2\n00:00:03,000 --> 00:00:04,000\nb\n";
    let first = CueParser::parse_str(document);
    let second = CueParser::parse_str(document);

    assert_eq!(first.cues, second.cues);
    assert_eq!(first.skipped, second.skipped);
}

/// Test that a cue can be constructed but not inverted
#[test]
fn test_cue_new_withEndBeforeStart_shouldFail() {
    assert!(Cue::new(1, 2.0, 1.0, "x").is_err());
    let zero_length = Cue::new(1, 2.0, 2.0, "x").unwrap();
    assert_eq!(zero_length.duration(), 0.0);
}
