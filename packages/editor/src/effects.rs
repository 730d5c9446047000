//! # Effects
//!
//! Every visible consequence of an interaction, recorded as data.
//!
//! The editor never draws. Handlers push effects here and the host drains
//! the queue after each event to refresh styling, move the drag preview,
//! hand payloads to the window system and show messages.

use crate::geometry::{InsertionIndicator, Point};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightRole {
    /// Page the drag started from
    Source,
    /// Page currently hovered
    Target,
}

/// Floating copy of a page widget that follows the pointer
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DragPreview {
    pub index: usize,
    pub position: Point,
    pub alpha: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Effect {
    /// Selection styling needs a refresh
    SelectionChanged,

    /// Page count or order changed; thumbnails need a rebuild
    DocumentChanged,

    /// Undo/redo availability may have changed
    HistoryChanged,

    Highlight {
        index: usize,
        role: HighlightRole,
        on: bool,
    },

    IndicatorMoved(InsertionIndicator),
    IndicatorHidden,

    PreviewShown(DragPreview),
    PreviewMoved(Point),
    PreviewHidden,

    /// Outgoing drag data for the window system
    DragPayload(String),

    /// Text to place on the system clipboard
    ClipboardSet(String),

    Notice(String),

    /// User-visible failure message
    Error(String),
}

impl Effect {
    pub fn is_error(&self) -> bool {
        matches!(self, Effect::Error(_))
    }
}

#[derive(Debug, Default)]
pub struct EffectQueue {
    pending: Vec<Effect>,
}

impl EffectQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, effect: Effect) {
        self.pending.push(effect);
    }

    /// Push unless the newest pending effect is identical
    pub fn push_once(&mut self, effect: Effect) {
        if self.pending.last() != Some(&effect) {
            self.pending.push(effect);
        }
    }

    pub fn pending(&self) -> &[Effect] {
        &self.pending
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Take every pending effect, oldest first
    pub fn drain(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.pending)
    }
}
