use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

// @module: Playback time sources

/// External media clock, e.g. the position of an audio source
pub trait MediaClock: Send {
    /// Current position in seconds since the start of the cue sequence
    fn position(&self) -> f64;
}

/// Where a player reads the current time from
pub enum ClockSource {
    /// Internal accumulator advanced by each tick's elapsed time
    Elapsed { time: f64 },

    /// External clock; the elapsed value passed to a tick is ignored
    Media(Box<dyn MediaClock>),
}

impl ClockSource {
    /// Accumulator starting at zero
    pub fn elapsed() -> Self {
        ClockSource::Elapsed { time: 0.0 }
    }

    pub fn media(clock: impl MediaClock + 'static) -> Self {
        ClockSource::Media(Box::new(clock))
    }

    /// Apply one tick and return the resulting time.
    ///
    /// Media clocks are read as-is: if they jump backwards the new value wins.
    pub fn advance(&mut self, elapsed: f64) -> f64 {
        match self {
            ClockSource::Elapsed { time } => {
                *time += elapsed.max(0.0);
                *time
            }
            ClockSource::Media(clock) => clock.position(),
        }
    }

    pub fn current_time(&self) -> f64 {
        match self {
            ClockSource::Elapsed { time } => *time,
            ClockSource::Media(clock) => clock.position(),
        }
    }
}

impl Default for ClockSource {
    fn default() -> Self {
        Self::elapsed()
    }
}

impl fmt::Debug for ClockSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClockSource::Elapsed { time } => f.debug_struct("Elapsed").field("time", time).finish(),
            ClockSource::Media(clock) => f.debug_tuple("Media").field(&clock.position()).finish(),
        }
    }
}

/// Media clock whose position is set by its owner; clones share the position
#[derive(Debug, Clone, Default)]
pub struct SharedMediaClock {
    position: Arc<Mutex<f64>>,
}

impl SharedMediaClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, seconds: f64) {
        *self.position.lock() = seconds;
    }
}

impl MediaClock for SharedMediaClock {
    fn position(&self) -> f64 {
        *self.position.lock()
    }
}
