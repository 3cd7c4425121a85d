/*!
 * Tests for incremental reveal sequencing
 */

use easysubs::reveal::{RevealSequencer, Snapshot};
use easysubs::subtitle_processor::CueParser;

#[test]
fn test_reveal_withParsedBoldCue_shouldProduceTwoSnapshots() {
    let report = CueParser::parse_str("1\n00:00:00,000 --> 00:00:04,000\n{b}hi{/b}\n");
    let cue = report.cues.get(0).unwrap();

    let snapshots: Vec<Snapshot> = RevealSequencer::new(cue).collect();
    let expected_delay = 0.3 * 4.0 / 2.0;

    assert_eq!(snapshots.len(), 2);
    assert_eq!(snapshots[0].text, "<b>h</b>");
    assert_eq!(snapshots[1].text, "<b>hi</b>");
    assert!(snapshots.iter().all(|s| (s.delay - expected_delay).abs() < 1e-12));
}

#[test]
fn test_reveal_totalDelay_shouldSpanThirtyPercent() {
    let report = CueParser::parse_str("1\n00:00:10,000 --> 00:00:20,000\n<color=red>Hello</color> there\n");
    let cue = report.cues.get(0).unwrap();

    let total: f64 = RevealSequencer::new(cue).map(|s| s.delay).sum();
    assert!((total - 3.0).abs() < 1e-9);
}

#[test]
fn test_reveal_everySnapshot_shouldBeBalanced() {
    let sequencer = RevealSequencer::from_text("<i>a<b>bc</b></i>d", 1.0);

    for snapshot in sequencer {
        let opens = snapshot.text.matches("<b>").count() + snapshot.text.matches("<i>").count();
        let closes = snapshot.text.matches("</b>").count() + snapshot.text.matches("</i>").count();
        assert_eq!(opens, closes, "unbalanced snapshot {:?}", snapshot.text);
    }
}

#[test]
fn test_reveal_afterExhaustion_shouldStayExhausted() {
    let mut sequencer = RevealSequencer::from_text("ab", 1.0);
    assert_eq!(sequencer.by_ref().count(), 2);
    assert_eq!(sequencer.len(), 0);
    assert!(sequencer.next().is_none());
}
