//! # Edit Session Management
//!
//! One user's editing session over one document store.
//!
//! An `EditSession` owns the store and the whole interaction state
//! (`EditorState`): selection, history, drag gesture, temporary exports,
//! pending effects and the internal clipboard. Every handler runs to
//! completion before the next event is delivered, so nothing here is
//! shared or locked.

use crate::config::EditorConfig;
use crate::drag::DragController;
use crate::effects::{Effect, EffectQueue};
use crate::selection::{Modifiers, Selection};
use crate::temp_files::TempFiles;
use crate::undo_stack::UndoStack;
use crate::{EditorError, Mutation};
use folio_store::DocumentStore;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

/// Interaction state owned by a single session
#[derive(Debug)]
pub struct EditorState {
    pub selection: Selection,
    pub history: UndoStack,
    pub drag: DragController,
    pub temp_files: TempFiles,
    pub effects: EffectQueue,

    /// Last text placed on the clipboard by `copy_selected`
    pub clipboard: Option<String>,

    /// File the document was opened from or last saved to
    pub current_path: Option<PathBuf>,
}

impl EditorState {
    pub fn new(config: &EditorConfig, page_count: usize) -> Self {
        Self {
            selection: Selection::new(page_count),
            history: UndoStack::with_max_levels(config.history_limit),
            drag: DragController::new(config),
            temp_files: TempFiles::new(config.temp_prefix.clone()),
            effects: EffectQueue::new(),
            clipboard: None,
            current_path: None,
        }
    }
}

/// Every editor action as data, for scripting and key bindings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    Open {
        path: PathBuf,
        #[serde(default)]
        discard_unsaved: bool,
    },
    Merge {
        path: PathBuf,
    },
    Save {
        #[serde(default)]
        path: Option<PathBuf>,
    },
    Reset {
        #[serde(default)]
        discard_unsaved: bool,
    },
    Undo,
    Redo,
    Click {
        index: usize,
        #[serde(default)]
        modifiers: Modifiers,
    },
    SelectAll,
    ClearSelection,
    DeletePage {
        index: usize,
    },
    RotatePage {
        index: usize,
    },
    RotateSelected {
        degrees: i32,
    },
    DeleteSelected,
    MoveSelectedTo {
        target: usize,
    },
    InsertDocumentAt {
        path: PathBuf,
        index: usize,
    },
    Copy,
    Paste {
        text: String,
    },
}

/// Which controls the UI should currently enable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Affordances {
    pub undo: bool,
    pub redo: bool,
    pub rotate: bool,
    pub delete: bool,
    pub select_all: bool,
}

pub struct EditSession<S: DocumentStore> {
    pub(crate) store: S,
    pub(crate) state: EditorState,
    config: EditorConfig,
}

impl<S: DocumentStore> EditSession<S> {
    /// Create a session around `store`, which may already hold a document
    pub fn new(store: S, config: EditorConfig) -> Self {
        let state = EditorState::new(&config, store.page_count());
        Self {
            store,
            state,
            config,
        }
    }

    pub fn with_defaults(store: S) -> Self {
        Self::new(store, EditorConfig::default())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn selection(&self) -> &Selection {
        &self.state.selection
    }

    pub fn history(&self) -> &UndoStack {
        &self.state.history
    }

    pub fn page_count(&self) -> usize {
        self.store.page_count()
    }

    pub fn current_path(&self) -> Option<&Path> {
        self.state.current_path.as_deref()
    }

    pub fn clipboard(&self) -> Option<&str> {
        self.state.clipboard.as_deref()
    }

    /// Take every effect produced since the last drain
    pub fn drain_effects(&mut self) -> Vec<Effect> {
        self.state.effects.drain()
    }

    /// Run a command, turning any failure into an error effect
    pub fn execute(&mut self, command: Command) -> bool {
        match self.try_execute(command) {
            Ok(()) => true,
            Err(err) => {
                self.report(&err);
                false
            }
        }
    }

    pub fn try_execute(&mut self, command: Command) -> Result<(), EditorError> {
        match command {
            Command::Open {
                path,
                discard_unsaved,
            } => self.open(&path, discard_unsaved),
            Command::Merge { path } => self.merge(&path),
            Command::Save { path } => self.save(path.as_deref()),
            Command::Reset { discard_unsaved } => self.reset(discard_unsaved),
            Command::Undo => self.undo().map(|_| ()),
            Command::Redo => self.redo().map(|_| ()),
            Command::Click { index, modifiers } => {
                self.click(index, modifiers);
                Ok(())
            }
            Command::SelectAll => {
                self.select_all();
                Ok(())
            }
            Command::ClearSelection => {
                self.clear_selection();
                Ok(())
            }
            Command::DeletePage { index } => self.delete_page(index),
            Command::RotatePage { index } => self.rotate_page(index),
            Command::RotateSelected { degrees } => self.rotate_selected(degrees),
            Command::DeleteSelected => self.delete_selected(),
            Command::MoveSelectedTo { target } => self.move_selected_to(target).map(|_| ()),
            Command::InsertDocumentAt { path, index } => self.insert_document_at(&path, index),
            Command::Copy => self.copy_selected().map(|_| ()),
            Command::Paste { text } => self.paste(&text),
        }
    }

    /// Surface a failure to the user and the log
    pub(crate) fn report(&mut self, err: &EditorError) {
        warn!("{}", err);
        self.state.effects.push(Effect::Error(err.to_string()));
    }

    /// Apply `mutation` as one undoable step and refresh dependent state
    pub(crate) fn commit(&mut self, mutation: Mutation) -> Result<(), EditorError> {
        if let Err(err) = self.state.history.perform(&mut self.store, &mutation) {
            // Redo history is gone even though nothing was applied
            self.state.effects.push(Effect::HistoryChanged);
            return Err(err.into());
        }
        self.after_document_change();
        Ok(())
    }

    /// Reconcile the selection with the store and notify the UI
    pub(crate) fn after_document_change(&mut self) {
        let count = self.store.page_count();
        if self.state.selection.reconcile(count) {
            self.state.effects.push(Effect::SelectionChanged);
        }
        self.state.effects.push(Effect::DocumentChanged);
        self.state.effects.push(Effect::HistoryChanged);
    }

    /// Drop the document, its history and the selection
    fn forget_document(&mut self) {
        self.state.drag.cancel(&mut self.state.effects);
        self.store.close();
        self.state.history.clear();
        self.state.selection.clear();
        self.state.selection.reconcile(0);
        self.state.effects.push(Effect::SelectionChanged);
        self.after_document_change();
    }

    /// Open a document, replacing the current one
    #[instrument(skip(self, path), fields(path = %path.display()))]
    pub fn open(&mut self, path: &Path, discard_unsaved: bool) -> Result<(), EditorError> {
        if self.store.is_dirty() && !discard_unsaved {
            return Err(EditorError::UnsavedChanges);
        }

        self.forget_document();
        self.state.current_path = None;

        self.store.open(path)?;
        self.state.current_path = Some(path.to_path_buf());
        self.after_document_change();
        info!("Opened {} pages", self.store.page_count());
        Ok(())
    }

    /// Append a document to the open one
    pub fn merge(&mut self, path: &Path) -> Result<(), EditorError> {
        if !self.store.is_open() {
            return Err(EditorError::NoDocument);
        }
        self.commit(Mutation::AppendDocument {
            path: path.to_path_buf(),
        })
    }

    /// Save to `path`, or back to the current file
    pub fn save(&mut self, path: Option<&Path>) -> Result<(), EditorError> {
        if !self.store.is_open() {
            return Err(EditorError::NoDocument);
        }
        let target = match path {
            Some(path) => path.to_path_buf(),
            None => self.state.current_path.clone().ok_or(EditorError::NoPath)?,
        };

        self.store.save(&target)?;
        info!("Saved {}", target.display());
        self.state
            .effects
            .push(Effect::Notice(format!("Saved {}", target.display())));
        self.state.current_path = Some(target);
        Ok(())
    }

    /// Close the document without ending the session
    pub fn reset(&mut self, discard_unsaved: bool) -> Result<(), EditorError> {
        if self.store.is_dirty() && !discard_unsaved {
            return Err(EditorError::UnsavedChanges);
        }
        self.forget_document();
        self.state.current_path = None;
        Ok(())
    }

    /// End the session: close the document and delete temporary exports
    pub fn close(&mut self) {
        self.forget_document();
        self.state.current_path = None;
        self.state.temp_files.cleanup();
    }

    #[instrument(skip(self))]
    pub fn undo(&mut self) -> Result<bool, EditorError> {
        if self.state.drag.is_dragging() {
            return Ok(false);
        }
        let undone = self.state.history.undo(&mut self.store);
        self.after_history_step(undone)
    }

    #[instrument(skip(self))]
    pub fn redo(&mut self) -> Result<bool, EditorError> {
        if self.state.drag.is_dragging() {
            return Ok(false);
        }
        let redone = self.state.history.redo(&mut self.store);
        self.after_history_step(redone)
    }

    fn after_history_step(
        &mut self,
        result: Result<bool, folio_store::StoreError>,
    ) -> Result<bool, EditorError> {
        match result {
            Ok(true) => {
                self.state.selection.clear();
                self.state.effects.push(Effect::SelectionChanged);
                self.after_document_change();
                Ok(true)
            }
            Ok(false) => Ok(false),
            Err(err) => {
                // The failed entry is gone either way
                self.state.effects.push(Effect::HistoryChanged);
                Err(err.into())
            }
        }
    }

    pub fn affordances(&self) -> Affordances {
        let open = self.store.is_open() && self.store.page_count() > 0;
        let idle = !self.state.drag.is_dragging();
        let has_selection = open && !self.state.selection.is_empty();

        Affordances {
            undo: idle && self.store.is_open() && self.state.history.can_undo(),
            redo: idle && self.store.is_open() && self.state.history.can_redo(),
            rotate: has_selection,
            delete: has_selection,
            select_all: open,
        }
    }
}
