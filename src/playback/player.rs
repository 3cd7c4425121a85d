use std::time::Duration;

use anyhow::anyhow;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::cue_index::CueIndex;
use crate::errors::PlaybackError;
use crate::playback::clock::ClockSource;
use crate::playback::display::{DisplayFrame, DisplaySink};
use crate::reveal::{RevealSequencer, DEFAULT_REVEAL_FRACTION};
use crate::subtitle_processor::{CueParser, SkippedBlock};

// @module: Tick-driven subtitle playback

/// How a cue's text appears on screen
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackMode {
    // @mode: Whole text at once
    Instant,
    // @mode: Revealed one character at a time
    #[default]
    CharacterByCharacter,
}

impl std::fmt::Display for PlaybackMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Instant => write!(f, "instant"),
            Self::CharacterByCharacter => write!(f, "character_by_character"),
        }
    }
}

impl std::str::FromStr for PlaybackMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "instant" => Ok(Self::Instant),
            "character_by_character" | "char" => Ok(Self::CharacterByCharacter),
            _ => Err(anyhow!("Invalid playback mode: {}", s)),
        }
    }
}

/// Outcome of a single tick
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    /// Nothing changed on screen
    Idle,
    /// The display received a new frame
    Shown(DisplayFrame),
    /// The active cue ended and the display was cleared
    Cleared,
    /// Playback passed the end of the last cue and stopped
    Finished,
}

// The cue on screen and its reveal, if one is still running
struct ActiveCue {
    position: usize,
    reveal: Option<RevealSequencer>,
    next_due: f64,
}

struct Session {
    cues: CueIndex,
    mode: PlaybackMode,
    clock: ClockSource,
    active: Option<ActiveCue>,
}

/// Plays a cue sequence against a clock and a display target.
///
/// The player never waits on its own: the host calls `tick` once per frame
/// (or from `run_realtime`). Starting a new run or a new cue always discards
/// the previous reveal, so a display has at most one reveal in progress.
pub struct SubtitlePlayer {
    display: Option<Box<dyn DisplaySink>>,
    reveal_fraction: f64,
    session: Option<Session>,
}

impl Default for SubtitlePlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl SubtitlePlayer {
    /// Player without a display target
    pub fn new() -> Self {
        Self {
            display: None,
            reveal_fraction: DEFAULT_REVEAL_FRACTION,
            session: None,
        }
    }

    pub fn with_display(display: impl DisplaySink + 'static) -> Self {
        let mut player = Self::new();
        player.set_display(display);
        player
    }

    pub fn with_reveal_fraction(mut self, fraction: f64) -> Self {
        self.reveal_fraction = fraction;
        self
    }

    pub fn set_display(&mut self, display: impl DisplaySink + 'static) {
        self.display = Some(Box::new(display));
    }

    pub fn is_playing(&self) -> bool {
        self.session.is_some()
    }

    /// Cues of the current run
    pub fn cues(&self) -> Option<&CueIndex> {
        self.session.as_ref().map(|session| &session.cues)
    }

    /// Current clock time, if playing
    pub fn current_time(&self) -> Option<f64> {
        self.session.as_ref().map(|session| session.clock.current_time())
    }

    /// Parse `document` and start playing it.
    ///
    /// Returns the blocks that were skipped while parsing.
    pub fn start(
        &mut self,
        document: &str,
        mode: PlaybackMode,
        clock: ClockSource,
    ) -> Result<Vec<SkippedBlock>, PlaybackError> {
        if self.display.is_none() {
            return Err(PlaybackError::MissingDisplayTarget);
        }

        let report = CueParser::parse_str(document);
        self.start_cues(report.cues, mode, clock)?;
        Ok(report.skipped)
    }

    /// Start playing an already parsed cue sequence
    pub fn start_cues(&mut self, cues: CueIndex, mode: PlaybackMode, clock: ClockSource) -> Result<(), PlaybackError> {
        if self.display.is_none() {
            return Err(PlaybackError::MissingDisplayTarget);
        }

        let duration = cues.duration()?;
        self.stop();

        info!("Playing {} cues over {:.3}s ({} mode)", cues.len(), duration, mode);

        self.session = Some(Session {
            cues,
            mode,
            clock,
            active: None,
        });
        Ok(())
    }

    /// Stop playback, discarding any unfinished reveal
    pub fn stop(&mut self) {
        if self.session.take().is_some() {
            debug!("Subtitle playback stopped");
            if let Some(display) = self.display.as_mut() {
                display.clear();
            }
        }
    }

    /// Advance the clock by `elapsed` seconds and update the display
    pub fn tick(&mut self, elapsed: f64) -> Result<PlayerEvent, PlaybackError> {
        let display = self.display.as_mut().ok_or(PlaybackError::MissingDisplayTarget)?;
        let session = self.session.as_mut().ok_or(PlaybackError::NotPlaying)?;

        let time = session.clock.advance(elapsed);

        if session.cues.has_ended(time) {
            self.session = None;
            display.clear();
            debug!("Subtitle playback finished at {:.3}s", time);
            return Ok(PlayerEvent::Finished);
        }

        let Some(position) = session.cues.lookup_position(time) else {
            if session.active.take().is_some() {
                display.clear();
                return Ok(PlayerEvent::Cleared);
            }
            return Ok(PlayerEvent::Idle);
        };

        let Some(cue) = session.cues.get(position) else {
            return Ok(PlayerEvent::Idle);
        };

        let changed = session.active.as_ref().is_none_or(|active| active.position != position);
        if changed {
            debug!("Cue {} active at {:.3}s", cue.index(), time);
            match session.mode {
                PlaybackMode::Instant => {
                    session.active = Some(ActiveCue {
                        position,
                        reveal: None,
                        next_due: time,
                    });
                    let frame = DisplayFrame::for_cue(cue, cue.text());
                    display.show(&frame);
                    return Ok(PlayerEvent::Shown(frame));
                }
                PlaybackMode::CharacterByCharacter => {
                    session.active = Some(ActiveCue {
                        position,
                        reveal: Some(RevealSequencer::with_fraction(cue, self.reveal_fraction)),
                        next_due: time,
                    });
                }
            }
        }

        let Some(active) = session.active.as_mut() else {
            return Ok(PlayerEvent::Idle);
        };

        let mut latest = None;
        while let Some(reveal) = active.reveal.as_mut() {
            if time < active.next_due {
                break;
            }
            match reveal.next_snapshot() {
                Some(snapshot) => {
                    active.next_due += snapshot.delay;
                    latest = Some(snapshot.text);
                }
                None => active.reveal = None,
            }
        }

        match latest {
            Some(text) => {
                let frame = DisplayFrame::for_cue(cue, text);
                display.show(&frame);
                Ok(PlayerEvent::Shown(frame))
            }
            None => Ok(PlayerEvent::Idle),
        }
    }
}

/// Drive `player` in real time until it finishes or is stopped.
///
/// `speed` scales the elapsed time fed to each tick (2.0 plays twice as fast).
pub async fn run_realtime(player: &mut SubtitlePlayer, tick: Duration, speed: f64) -> Result<(), PlaybackError> {
    let mut interval = tokio::time::interval(tick);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    let mut last = tokio::time::Instant::now();
    while player.is_playing() {
        interval.tick().await;
        let now = tokio::time::Instant::now();
        let elapsed = now.duration_since(last).as_secs_f64() * speed;
        last = now;

        if player.tick(elapsed)? == PlayerEvent::Finished {
            break;
        }
    }

    Ok(())
}
