/*!
 * Tests for the player lifecycle and the realtime driver
 */

use std::time::Duration;

use easysubs::playback::{
    run_realtime, ClockSource, DisplayUpdate, PlaybackMode, PlayerEvent, SharedDisplay, SubtitlePlayer,
};

use crate::common;

/// Test a full run driven by fixed ticks
#[test]
fn test_player_withFixedTicks_shouldShowEachCueThenFinish() {
    common::init_logging();
    let display = SharedDisplay::new();
    let mut player = SubtitlePlayer::with_display(display.clone());
    player
        .start(common::OVERLAPPING_DOCUMENT, PlaybackMode::Instant, ClockSource::elapsed())
        .unwrap();

    let mut events = Vec::new();
    while player.is_playing() {
        events.push(player.tick(0.5).unwrap());
    }

    let shown: Vec<String> = events
        .iter()
        .filter_map(|event| match event {
            PlayerEvent::Shown(frame) => Some(frame.text.clone()),
            _ => None,
        })
        .collect();

    // A wins the overlap until it ends at 3.0, then B takes over
    assert_eq!(shown, vec!["A", "B"]);
    assert_eq!(events.last(), Some(&PlayerEvent::Finished));
    assert_eq!(display.updates().last(), Some(&DisplayUpdate::Clear));
}

/// Test that the character reveal reaches the full text within the cue
#[test]
fn test_player_characterMode_shouldEndOnFullText() {
    let display = SharedDisplay::new();
    let mut player = SubtitlePlayer::with_display(display.clone());
    player
        .start(
            "1\n00:00:00,000 --> 00:00:01,000\nabcd\n",
            PlaybackMode::CharacterByCharacter,
            ClockSource::elapsed(),
        )
        .unwrap();

    for _ in 0..10 {
        player.tick(0.05).unwrap();
    }

    let frames: Vec<String> = display
        .updates()
        .into_iter()
        .filter_map(|update| match update {
            DisplayUpdate::Show(frame) => Some(frame.text),
            DisplayUpdate::Clear => None,
        })
        .collect();

    assert_eq!(frames, vec!["a", "ab", "abc", "abcd"]);
}

/// Test the async driver with paused tokio time
#[tokio::test(start_paused = true)]
async fn test_runRealtime_shouldPlayToCompletion() {
    let display = SharedDisplay::new();
    let mut player = SubtitlePlayer::with_display(display.clone());
    player
        .start(
            "1\n00:00:00,100 --> 00:00:00,300\nquick\n",
            PlaybackMode::Instant,
            ClockSource::elapsed(),
        )
        .unwrap();

    run_realtime(&mut player, Duration::from_millis(50), 1.0).await.unwrap();

    assert!(!player.is_playing());
    assert!(display
        .updates()
        .iter()
        .any(|update| matches!(update, DisplayUpdate::Show(frame) if frame.text == "quick")));
}
