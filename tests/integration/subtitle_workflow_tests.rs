/*!
 * End-to-end tests: load a document from disk, parse, query and reveal
 */

use anyhow::Result;
use easysubs::errors::SubtitleError;
use easysubs::file_utils::FileManager;
use easysubs::reveal::RevealSequencer;

use crate::common;

/// Test the sample resource end to end
#[test]
fn test_subtitle_workflow_withSampleFile_shouldParseQueryAndReveal() -> Result<()> {
    common::init_logging();
    let report = FileManager::parse_file(common::test_resource_path("sample.srt"))?;

    // 1. Three cues, one skipped block
    assert_eq!(report.cues.len(), 3);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].block_number, 3);

    // 2. Markup was translated once during parsing
    let first = report.cues.get(0).unwrap();
    assert_eq!(first.text(), "<i>Where are we going?</i>");

    let second = report.cues.get(1).unwrap();
    assert_eq!(second.text(), "<color=yellow>Somewhere\nfar away.</color>");
    assert_eq!((second.x1(), second.x2(), second.y1(), second.y2()), (10, 630, 20, 460));

    // 3. Lookup and duration
    assert_eq!(report.cues.lookup(2.5).map(|c| c.index()), Some(1));
    assert_eq!(report.cues.lookup(3.5).map(|c| c.index()), Some(2));
    assert!(report.cues.lookup(5.5).is_none());
    assert_eq!(report.cues.duration()?, 9.5);

    // 4. Reveal ends on the full text
    let last = RevealSequencer::new(second).last().unwrap();
    assert_eq!(last.text, second.text());

    Ok(())
}

/// Test that a whole directory can be discovered and parsed
#[test]
fn test_subtitle_workflow_withDirectory_shouldParseEveryFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "a.srt", common::OVERLAPPING_DOCUMENT)?;
    common::create_test_file(temp_dir.path(), "b.srt", "1\n00:00:00,500 --> 00:00:01,000\nsolo\n")?;
    common::create_test_file(temp_dir.path(), "readme.txt", "not subtitles")?;

    let files = FileManager::find_subtitle_files(temp_dir.path())?;
    assert_eq!(files.len(), 2);

    let total: usize = files
        .iter()
        .map(|file| FileManager::parse_file(file).map(|report| report.cues.len()))
        .sum::<Result<usize, SubtitleError>>()?;
    assert_eq!(total, 3);

    Ok(())
}

/// Test that we can handle errors correctly in the workflow
#[test]
fn test_subtitle_workflow_withInvalidInput_shouldHandleErrors() {
    let result = FileManager::parse_file("non_existent_file.srt");
    assert!(matches!(result, Err(SubtitleError::Document(_))));
}
