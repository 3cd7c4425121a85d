/*!
 * Time-indexed access to parsed cues.
 *
 * The index keeps cues in document order and answers "which cue is showing
 * at time T". Cues may overlap or leave gaps; when several cues contain T the
 * earliest one in sequence order wins.
 */

use serde::Serialize;

use crate::errors::SubtitleError;
use crate::subtitle_processor::Cue;

/// Ordered, immutable collection of cues
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CueIndex {
    cues: Vec<Cue>,
}

impl CueIndex {
    /// Build an index from cues in sequence order
    pub fn new(cues: Vec<Cue>) -> Self {
        Self { cues }
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    /// Cue at a sequence position
    pub fn get(&self, position: usize) -> Option<&Cue> {
        self.cues.get(position)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cue> {
        self.cues.iter()
    }

    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    /// First cue in sequence order whose closed interval contains `time`
    pub fn lookup(&self, time: f64) -> Option<&Cue> {
        self.cues.iter().find(|cue| cue.contains(time))
    }

    /// Sequence position of the cue `lookup` would return
    pub fn lookup_position(&self, time: f64) -> Option<usize> {
        self.cues.iter().position(|cue| cue.contains(time))
    }

    /// End time of the last cue in sequence order
    pub fn duration(&self) -> Result<f64, SubtitleError> {
        self.cues
            .last()
            .map(Cue::end)
            .ok_or(SubtitleError::DurationUndefined)
    }

    /// Playback is over once `time > duration`; an empty index is always over
    pub fn has_ended(&self, time: f64) -> bool {
        match self.duration() {
            Ok(duration) => time > duration,
            Err(_) => true,
        }
    }

    /// Number of adjacent cue pairs sharing more than a boundary instant
    pub fn overlap_count(&self) -> usize {
        self.cues
            .windows(2)
            .filter(|pair| pair[1].start() < pair[0].end() && pair[0].start() < pair[1].end())
            .count()
    }
}

impl From<Vec<Cue>> for CueIndex {
    fn from(cues: Vec<Cue>) -> Self {
        Self::new(cues)
    }
}

impl<'a> IntoIterator for &'a CueIndex {
    type Item = &'a Cue;
    type IntoIter = std::slice::Iter<'a, Cue>;

    fn into_iter(self) -> Self::IntoIter {
        self.cues.iter()
    }
}
