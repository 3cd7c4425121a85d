use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;

use crate::subtitle_processor::Cue;

// @module: Display target abstraction

/// Text and margins handed to the display layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayFrame {
    pub text: String,
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl DisplayFrame {
    /// Frame showing `text` with the cue's margins
    pub fn for_cue(cue: &Cue, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            x1: cue.x1(),
            y1: cue.y1(),
            x2: cue.x2(),
            y2: cue.y2(),
        }
    }
}

/// Receiver of resolved display state; rendering is up to the implementor
pub trait DisplaySink: Send {
    fn show(&mut self, frame: &DisplayFrame);

    fn clear(&mut self);
}

/// A single change sent to a display
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayUpdate {
    Show(DisplayFrame),
    Clear,
}

/// Recording display whose clones share one update log
#[derive(Debug, Clone, Default)]
pub struct SharedDisplay {
    updates: Arc<Mutex<Vec<DisplayUpdate>>>,
}

impl SharedDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// All updates received so far
    pub fn updates(&self) -> Vec<DisplayUpdate> {
        self.updates.lock().clone()
    }

    /// Drain the update log
    pub fn take(&self) -> Vec<DisplayUpdate> {
        std::mem::take(&mut *self.updates.lock())
    }

    /// Frame currently on screen, if any
    pub fn current(&self) -> Option<DisplayFrame> {
        match self.updates.lock().last() {
            Some(DisplayUpdate::Show(frame)) => Some(frame.clone()),
            _ => None,
        }
    }
}

impl DisplaySink for SharedDisplay {
    fn show(&mut self, frame: &DisplayFrame) {
        self.updates.lock().push(DisplayUpdate::Show(frame.clone()));
    }

    fn clear(&mut self) {
        self.updates.lock().push(DisplayUpdate::Clear);
    }
}
