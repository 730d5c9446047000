//! Page and selection actions.
//!
//! Everything that changes the document goes through [`EditSession::commit`]
//! and therefore through the undo stack. Selection actions on an empty
//! selection are silent no-ops.

use crate::effects::Effect;
use crate::payload::{parse_clipboard_paths, usable_documents};
use crate::reorder::plan_move;
use crate::selection::Modifiers;
use crate::session::EditSession;
use crate::{EditorError, Mutation};
use folio_store::DocumentStore;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

const ROTATE_STEP: i32 = 90;

impl<S: DocumentStore> EditSession<S> {
    /// Apply a thumbnail click to the selection
    pub fn click(&mut self, index: usize, modifiers: Modifiers) {
        if self.state.selection.apply_click(index, modifiers) {
            self.state.effects.push(Effect::SelectionChanged);
        }
    }

    /// Select every page, or none when all are already selected
    pub fn select_all(&mut self) {
        if !self.store.is_open() {
            return;
        }
        if self.state.selection.select_all() {
            self.state.effects.push(Effect::SelectionChanged);
        }
    }

    pub fn clear_selection(&mut self) {
        if self.state.selection.clear() {
            self.state.effects.push(Effect::SelectionChanged);
        }
    }

    /// Delete one page. Deleting the last page closes the document.
    pub fn delete_page(&mut self, index: usize) -> Result<(), EditorError> {
        if self.store.page_count() == 1 && index == 0 {
            self.close_emptied_document();
            return Ok(());
        }
        self.commit(Mutation::DeletePage { index })
    }

    /// Rotate one page a quarter turn clockwise
    pub fn rotate_page(&mut self, index: usize) -> Result<(), EditorError> {
        self.commit(Mutation::RotatePages {
            indices: vec![index],
            degrees: ROTATE_STEP,
        })
    }

    /// Rotate every selected page by `degrees` as one undoable step
    pub fn rotate_selected(&mut self, degrees: i32) -> Result<(), EditorError> {
        if self.state.selection.is_empty() {
            return Ok(());
        }
        self.commit(Mutation::RotatePages {
            indices: self.state.selection.sorted(),
            degrees,
        })
    }

    /// Delete the selected pages.
    ///
    /// Deleting every page closes the document and drops its history.
    pub fn delete_selected(&mut self) -> Result<(), EditorError> {
        if self.state.selection.is_empty() {
            return Ok(());
        }

        let remaining: Vec<usize> = (0..self.store.page_count())
            .filter(|&index| !self.state.selection.contains(index))
            .collect();

        if remaining.is_empty() {
            self.close_emptied_document();
            return Ok(());
        }

        self.commit(Mutation::KeepOnly { indices: remaining })?;
        self.clear_selection();
        Ok(())
    }

    /// Every page is gone: close the document and drop its history
    fn close_emptied_document(&mut self) {
        info!("Every page deleted, closing document");
        self.state.drag.cancel(&mut self.state.effects);
        self.store.close();
        self.state.history.clear();
        self.state.selection.clear();
        self.state.effects.push(Effect::SelectionChanged);
        self.after_document_change();
    }

    /// Move the selection to insertion slot `target`.
    ///
    /// Returns whether the document changed. Drops onto the selection
    /// itself, empty selections and out-of-range targets change nothing.
    #[instrument(skip(self))]
    pub fn move_selected_to(&mut self, target: usize) -> Result<bool, EditorError> {
        let count = self.store.page_count();
        if self.state.selection.is_empty() || count == 0 || target > count {
            return Ok(false);
        }

        let plan = plan_move(count, self.state.selection.indices(), target);
        let Some(mutation) = plan.into_mutation() else {
            debug!("Nothing to move");
            return Ok(false);
        };

        self.commit(mutation)?;
        self.clear_selection();
        Ok(true)
    }

    /// Insert a whole document before page `index`, or open it when the
    /// editor is empty
    pub fn insert_document_at(&mut self, path: &Path, index: usize) -> Result<(), EditorError> {
        if self.store.page_count() == 0 {
            return self.open(path, false);
        }
        self.commit(Mutation::InsertDocuments {
            paths: vec![path.to_path_buf()],
            index,
        })
    }

    /// Export the selection to a temporary document and put its path on
    /// the clipboard
    pub fn copy_selected(&mut self) -> Result<Option<PathBuf>, EditorError> {
        if self.state.selection.is_empty() || !self.store.is_open() {
            return Ok(None);
        }

        let indices = self.state.selection.sorted();
        let path = self.state.temp_files.export(&self.store, &indices)?;
        let text = path.display().to_string();

        self.state.clipboard = Some(text.clone());
        self.state.effects.push(Effect::ClipboardSet(text));
        Ok(Some(path))
    }

    /// Insert the documents named in clipboard `text` after the last
    /// selected page (or at the end) and select what was inserted
    pub fn paste(&mut self, text: &str) -> Result<(), EditorError> {
        let ext = self.store.file_extension().to_string();
        let paths = usable_documents(parse_clipboard_paths(text), &ext);
        let Some(first) = paths.first().cloned() else {
            self.state
                .effects
                .push(Effect::Notice(format!("No .{} file in clipboard", ext)));
            return Ok(());
        };

        if self.store.page_count() == 0 {
            self.open(&first, true)?;
            for path in &paths[1..] {
                self.merge(path)?;
            }
            return Ok(());
        }

        let before = self.store.page_count();
        let insert_at = self
            .state
            .selection
            .max()
            .map_or(before, |last| last + 1);

        self.commit(Mutation::InsertDocuments {
            paths,
            index: insert_at,
        })?;

        let added = self.store.page_count().saturating_sub(before);
        if added > 0 {
            let inserted = insert_at..insert_at + added;
            let last = insert_at + added - 1;
            if self.state.selection.replace(inserted, Some(last)) {
                self.state.effects.push(Effect::SelectionChanged);
            }
        }
        Ok(())
    }

    /// Paste whatever `copy_selected` last placed on the clipboard
    pub fn paste_clipboard(&mut self) -> Result<(), EditorError> {
        match self.state.clipboard.clone() {
            Some(text) => self.paste(&text),
            None => Ok(()),
        }
    }
}
