/*!
 * Character-by-character reveal of cue text.
 *
 * A `RevealSequencer` turns one cue into a finite sequence of snapshots, each
 * showing one more visible character than the previous one. Markup tags are
 * not counted as characters; they are carried along with the character they
 * precede, and every snapshot is closed with the end tags needed to keep it
 * well formed.
 *
 * The sequencer does not wait. Each snapshot carries the delay the caller's
 * scheduler should leave before producing the next one, so that the whole
 * reveal spans `reveal_fraction * cue.duration()` seconds.
 */

use std::iter::FusedIterator;
use std::time::Duration;

use crate::subtitle_processor::Cue;

/// Share of a cue's on-screen time spent revealing its text
pub const DEFAULT_REVEAL_FRACTION: f64 = 0.3;

/// One partial rendering of a cue's text
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Well-formed markup for the characters revealed so far
    pub text: String,

    /// Seconds to wait before the next snapshot
    pub delay: f64,
}

impl Snapshot {
    pub fn delay_duration(&self) -> Duration {
        Duration::try_from_secs_f64(self.delay).unwrap_or(Duration::ZERO)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Tag(String),
    Visible(char),
}

#[derive(Debug, Clone, PartialEq)]
enum TagKind {
    Open(String),
    Close(String),
    Standalone,
}

/// Progress of a single reveal; owned by its sequencer and never shared
#[derive(Debug, Clone, Default)]
pub struct RevealState {
    cursor: usize,
    emitted: usize,
    total: usize,
    prefix: String,
    open_tags: Vec<String>,
    finished: bool,
}

impl RevealState {
    /// Visible characters emitted so far
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// Visible characters in the cue text
    pub fn total(&self) -> usize {
        self.total
    }

    /// Names of the tags currently open, outermost first
    pub fn open_tags(&self) -> &[String] {
        &self.open_tags
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

/// Lazy, single-pass producer of reveal snapshots
#[derive(Debug, Clone)]
pub struct RevealSequencer {
    segments: Vec<Segment>,
    delay: f64,
    state: RevealState,
}

impl RevealSequencer {
    /// Reveal over the default 30% of the cue's duration
    pub fn new(cue: &Cue) -> Self {
        Self::with_fraction(cue, DEFAULT_REVEAL_FRACTION)
    }

    /// Reveal over `fraction` of the cue's duration
    pub fn with_fraction(cue: &Cue, fraction: f64) -> Self {
        Self::from_text(cue.text(), cue.duration() * fraction)
    }

    /// Reveal arbitrary marked-up text over `reveal_secs` seconds
    pub fn from_text(text: &str, reveal_secs: f64) -> Self {
        let segments = tokenize(text);
        let total = segments
            .iter()
            .filter(|segment| matches!(segment, Segment::Visible(_)))
            .count();

        let delay = if total == 0 { 0.0 } else { reveal_secs.max(0.0) / total as f64 };

        Self {
            segments,
            delay,
            state: RevealState {
                total,
                ..RevealState::default()
            },
        }
    }

    /// Delay attached to every snapshot of this reveal
    pub fn delay(&self) -> f64 {
        self.delay
    }

    pub fn state(&self) -> &RevealState {
        &self.state
    }

    /// Produce the next snapshot, or `None` once the reveal is complete
    pub fn next_snapshot(&mut self) -> Option<Snapshot> {
        if self.state.finished {
            return None;
        }

        if self.state.total == 0 {
            self.consume_remaining_tags();
            self.state.finished = true;
            return Some(Snapshot {
                text: self.state.prefix.clone(),
                delay: 0.0,
            });
        }

        while let Some(Segment::Tag(tag)) = self.segments.get(self.state.cursor) {
            let tag = tag.clone();
            self.push_tag(&tag);
            self.state.cursor += 1;
        }

        if let Some(Segment::Visible(c)) = self.segments.get(self.state.cursor) {
            self.state.prefix.push(*c);
            self.state.cursor += 1;
            self.state.emitted += 1;
        }

        if self.state.emitted == self.state.total {
            self.consume_remaining_tags();
            self.state.finished = true;
        }

        let mut text = self.state.prefix.clone();
        for name in self.state.open_tags.iter().rev() {
            text.push_str("</");
            text.push_str(name);
            text.push('>');
        }

        Some(Snapshot {
            text,
            delay: self.delay,
        })
    }

    fn remaining(&self) -> usize {
        if self.state.finished {
            0
        } else if self.state.total == 0 {
            1
        } else {
            self.state.total - self.state.emitted
        }
    }

    fn consume_remaining_tags(&mut self) {
        while let Some(segment) = self.segments.get(self.state.cursor) {
            if let Segment::Tag(tag) = segment {
                let tag = tag.clone();
                self.push_tag(&tag);
            }
            self.state.cursor += 1;
        }
    }

    fn push_tag(&mut self, tag: &str) {
        self.state.prefix.push_str(tag);
        match classify_tag(tag) {
            TagKind::Open(name) => self.state.open_tags.push(name),
            TagKind::Close(name) => {
                if let Some(pos) = self
                    .state
                    .open_tags
                    .iter()
                    .rposition(|open| open.eq_ignore_ascii_case(&name))
                {
                    self.state.open_tags.remove(pos);
                }
            }
            TagKind::Standalone => {}
        }
    }
}

impl Iterator for RevealSequencer {
    type Item = Snapshot;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_snapshot()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for RevealSequencer {}

impl FusedIterator for RevealSequencer {}

// A '<' with no later '>' is an ordinary character
fn tokenize(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut rest = text;

    while let Some(c) = rest.chars().next() {
        if c == '<' {
            if let Some(end) = rest.find('>') {
                segments.push(Segment::Tag(rest[..=end].to_string()));
                rest = &rest[end + 1..];
                continue;
            }
        }
        segments.push(Segment::Visible(c));
        rest = &rest[c.len_utf8()..];
    }

    segments
}

fn classify_tag(tag: &str) -> TagKind {
    let inner = &tag[1..tag.len() - 1];

    if let Some(closing) = inner.strip_prefix('/') {
        return TagKind::Close(tag_name(closing));
    }
    if inner.ends_with('/') {
        return TagKind::Standalone;
    }

    let name = tag_name(inner);
    if name.is_empty() {
        TagKind::Standalone
    } else {
        TagKind::Open(name)
    }
}

fn tag_name(inner: &str) -> String {
    inner
        .trim_start()
        .chars()
        .take_while(|c| *c != '=' && *c != '/' && !c.is_whitespace())
        .collect()
}
