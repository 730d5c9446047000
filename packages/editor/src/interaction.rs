//! Pointer, keyboard and file-drop handlers.
//!
//! These are the entry points a host wires to its event loop. They never
//! fail: errors become [`Effect::Error`] entries and a log line, and the
//! interaction returns to idle.

use crate::drag::{DragStep, PointerEvent, Release};
use crate::effects::Effect;
use crate::geometry::{resolve_drop, PageLayout};
use crate::keymap::{command_for, is_paste, KeyStroke};
use crate::payload::{format_drop_path, parse_drop_payload, usable_documents};
use crate::session::EditSession;
use folio_store::DocumentStore;
use tracing::{debug, instrument};

impl<S: DocumentStore> EditSession<S> {
    /// Pointer pressed on page `hit`, or on the background when `None`
    pub fn pointer_press(&mut self, hit: Option<usize>, event: PointerEvent) {
        self.state.drag.cancel(&mut self.state.effects);

        match hit {
            Some(index) => {
                self.state
                    .drag
                    .press(index, event, self.store.page_count());
            }
            None => self.clear_selection(),
        }
    }

    pub fn pointer_move<L: PageLayout + ?Sized>(&mut self, event: PointerEvent, layout: &L) {
        let step = self.state.drag.on_move(
            event,
            layout,
            &mut self.state.selection,
            &mut self.state.effects,
        );

        if let DragStep::BeginExternal { index } = step {
            self.begin_external(index);
        }
    }

    /// Export the selection and hand its path to the window system
    fn begin_external(&mut self, index: usize) {
        let indices = self.state.selection.sorted();
        debug!("Exporting {:?} for external drag from {}", indices, index);

        match self.state.temp_files.export(&self.store, &indices) {
            Ok(path) => {
                let payload = format_drop_path(&path);
                self.state.drag.set_payload(payload.clone());
                self.state.effects.push(Effect::DragPayload(payload));
            }
            Err(err) => self.report(&err),
        }
    }

    pub fn pointer_release(&mut self, event: PointerEvent) {
        match self.state.drag.on_release(event, &mut self.state.effects) {
            Release::Click { index, modifiers } => self.click(index, modifiers),
            Release::Drop { index } => {
                if let Err(err) = self.move_selected_to(index) {
                    self.report(&err);
                }
            }
            Release::Nothing | Release::ExternalFinished => {}
        }
    }

    /// Files dropped in from another application.
    ///
    /// With nothing open the first file is opened and the rest appended.
    /// Otherwise every file is inserted at the drop point in order, each
    /// as its own undo step, or appended when no drop point resolves.
    #[instrument(skip(self, event, layout))]
    pub fn drop_files<L: PageLayout + ?Sized>(
        &mut self,
        data: &str,
        event: PointerEvent,
        layout: &L,
    ) {
        let ext = self.store.file_extension().to_string();
        let mut paths = usable_documents(parse_drop_payload(data), &ext);
        if paths.is_empty() {
            debug!("No .{} files in drop", ext);
            return;
        }

        let mut drop_index = if layout.page_count() > 0 {
            resolve_drop(layout, event.position()).map(|drop| drop.drop_index())
        } else {
            None
        };

        if self.store.page_count() == 0 {
            let first = paths.remove(0);
            if let Err(err) = self.open(&first, false) {
                self.report(&err);
                return;
            }
            drop_index = None;
        }

        let Some(mut cursor) = drop_index else {
            for path in &paths {
                if let Err(err) = self.merge(path) {
                    self.report(&err);
                }
            }
            return;
        };

        for path in &paths {
            let before = self.store.page_count();
            if let Err(err) = self.insert_document_at(path, cursor) {
                self.report(&err);
            }
            cursor += self.store.page_count().saturating_sub(before);
        }
    }

    /// Keyboard shortcut
    pub fn key(&mut self, stroke: KeyStroke) {
        if is_paste(stroke) {
            if let Err(err) = self.paste_clipboard() {
                self.report(&err);
            }
            return;
        }
        if let Some(command) = command_for(stroke) {
            self.execute(command);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::drag::PointerEvent;
    use crate::effects::Effect;
    use crate::geometry::{GridLayout, Rect};
    use crate::keymap::KeyStroke;
    use crate::session::EditSession;
    use folio_store::{MemoryStore, PageSet};

    fn session(labels: &[&str]) -> EditSession<MemoryStore> {
        EditSession::with_defaults(MemoryStore::with_pages(PageSet::labeled(
            labels.iter().copied(),
        )))
    }

    fn layout(count: usize) -> Vec<Rect> {
        GridLayout {
            columns: 10,
            thumb_width: 80.0,
            thumb_height: 120.0,
            padding: 10.0,
        }
        .rects(count)
    }

    #[test]
    fn test_background_press_clears_selection() {
        let mut session = session(&["A", "B"]);
        session.click(1, Default::default());
        session.pointer_press(None, PointerEvent::at(900.0, 900.0));
        assert!(session.selection().is_empty());
        assert_eq!(session.selection().anchor(), None);
    }

    #[test]
    fn test_click_through_pointer() {
        let mut session = session(&["A", "B", "C"]);
        session.pointer_press(Some(0), PointerEvent::at(50.0, 70.0));
        session.pointer_release(PointerEvent::at(50.0, 70.0));
        session.pointer_press(Some(2), PointerEvent::at(250.0, 70.0).with_shift());
        session.pointer_release(PointerEvent::at(250.0, 70.0).with_shift());
        assert_eq!(session.selection().sorted(), vec![0, 1, 2]);
    }

    #[test]
    fn test_undo_is_ignored_mid_drag() {
        let mut session = session(&["A", "B", "C"]);
        let rects = layout(3);
        session.rotate_page(0).unwrap();

        session.pointer_press(Some(1), PointerEvent::at(150.0, 70.0));
        session.pointer_move(PointerEvent::at(200.0, 70.0), &rects);
        session.key(KeyStroke::ctrl('z'));
        assert_eq!(session.store().pages()[0].rotation, 90);
        assert!(!session.affordances().undo);

        session.pointer_release(PointerEvent::at(200.0, 70.0));
        session.key(KeyStroke::ctrl('z'));
        assert_eq!(session.store().pages()[0].rotation, 0);
    }

    #[test]
    fn test_external_drag_emits_payload() {
        let mut session = session(&["A", "B", "C"]);
        let rects = layout(3);
        session.drain_effects();

        session.pointer_press(Some(2), PointerEvent::at(250.0, 70.0).with_ctrl());
        session.pointer_move(PointerEvent::at(290.0, 70.0), &rects);

        let payload = session
            .drain_effects()
            .into_iter()
            .find_map(|effect| match effect {
                Effect::DragPayload(payload) => Some(payload),
                _ => None,
            })
            .unwrap();
        assert!(std::path::Path::new(&payload).exists());

        session.pointer_release(PointerEvent::at(900.0, 70.0));
        assert_eq!(session.store().labels(), vec!["A", "B", "C"]);
        assert_eq!(session.state().temp_files.len(), 1);
    }
}
