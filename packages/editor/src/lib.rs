//! # Folio Editor
//!
//! Interactive page reordering for Folio documents.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ host: pointer / key / drop events, drawing  │
//! └─────────────────────────────────────────────┘
//!            ↓ events              ↑ effects
//! ┌─────────────────────────────────────────────┐
//! │ editor: EditSession + EditorState           │
//! │  - Selection model (click, range, toggle)   │
//! │  - Drag controller (threshold, hit-testing) │
//! │  - Reorder planning (stable multi-move)     │
//! │  - Undo stack (snapshot per mutation)       │
//! └─────────────────────────────────────────────┘
//!                     ↓ DocumentStore
//! ┌─────────────────────────────────────────────┐
//! │ store: page primitives, snapshot/restore    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Store is source of truth**: the editor only holds indices and counts
//! 2. **Every mutation is undoable**: one snapshot per user action
//! 3. **Failures leave no trace**: no history entry, no partial document
//! 4. **Effects, not drawing**: handlers report what changed, the host renders
//! 5. **Single writer**: handlers run to completion, one at a time
//!
//! ## Usage
//!
//! ```rust,ignore
//! use folio_editor::{EditSession, GridLayout, PointerEvent};
//! use folio_store::MemoryStore;
//!
//! let mut session = EditSession::with_defaults(MemoryStore::new());
//! session.open("book.folio".as_ref(), false)?;
//!
//! let layout = GridLayout::default().rects(session.page_count());
//! session.pointer_press(Some(0), PointerEvent::at(70.0, 90.0));
//! session.pointer_move(PointerEvent::at(400.0, 90.0), &layout);
//! session.pointer_release(PointerEvent::at(400.0, 90.0));
//!
//! for effect in session.drain_effects() {
//!     // refresh thumbnails, highlights, indicator...
//! }
//! ```

mod actions;
mod config;
mod drag;
mod effects;
mod errors;
mod geometry;
mod interaction;
mod keymap;
mod mutations;
mod payload;
mod reorder;
mod selection;
mod session;
mod temp_files;
mod undo_stack;

pub use config::EditorConfig;
pub use drag::{DragController, DragPhase, DragSession, DragStep, PointerEvent, Press, Release};
pub use effects::{DragPreview, Effect, EffectQueue, HighlightRole};
pub use errors::EditorError;
pub use geometry::{
    is_insert_after, nearest_page, resolve_drop, DropTarget, GridLayout, InsertionIndicator,
    PageLayout, Point, Rect,
};
pub use keymap::{command_for, is_paste, Key, KeyStroke};
pub use mutations::{Mutation, MutationError};
pub use payload::{
    format_drop_path, format_drop_payload, has_extension, parse_clipboard_paths,
    parse_drop_payload, usable_documents,
};
pub use reorder::{plan_move, MovePlan};
pub use selection::{Modifiers, Selection};
pub use session::{Affordances, Command, EditSession, EditorState};
pub use temp_files::TempFiles;
pub use undo_stack::{HistoryEntry, UndoStack};
