/*!
 * Playback surface for parsed subtitles.
 *
 * This module wires the core together for a host application:
 * - `clock`: where the current playback time comes from
 * - `display`: where resolved text and margins are sent
 * - `player`: the tick-driven `SubtitlePlayer` and its async realtime driver
 */

pub mod clock;
pub mod display;
pub mod player;

pub use clock::{ClockSource, MediaClock, SharedMediaClock};
pub use display::{DisplayFrame, DisplaySink, DisplayUpdate, SharedDisplay};
pub use player::{run_realtime, PlaybackMode, PlayerEvent, SubtitlePlayer};
