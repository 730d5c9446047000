//! Integration tests for editor crate

use folio_editor::{
    Command, EditSession, EditorError, Effect, GridLayout, HighlightRole, KeyStroke, Modifiers,
    PointerEvent, Rect,
};
use folio_store::{DocumentStore, MemoryStore, PageSet, Snapshot, StoreError, StoreResult};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Memory store with injectable failures
#[derive(Debug, Default)]
struct FlakyStore {
    inner: MemoryStore,
    /// Rotations allowed before `rotate_page_by` starts failing
    rotations_left: Option<usize>,
    fail_restore: bool,
}

impl FlakyStore {
    fn new(labels: &[&str]) -> Self {
        Self {
            inner: MemoryStore::with_pages(PageSet::labeled(labels.iter().copied())),
            ..Default::default()
        }
    }

    fn labels(&self) -> Vec<&str> {
        self.inner.labels()
    }
}

impl DocumentStore for FlakyStore {
    fn is_open(&self) -> bool {
        self.inner.is_open()
    }

    fn is_dirty(&self) -> bool {
        self.inner.is_dirty()
    }

    fn page_count(&self) -> usize {
        self.inner.page_count()
    }

    fn file_extension(&self) -> &str {
        self.inner.file_extension()
    }

    fn open(&mut self, path: &Path) -> StoreResult<()> {
        self.inner.open(path)
    }

    fn close(&mut self) {
        self.inner.close()
    }

    fn save(&mut self, path: &Path) -> StoreResult<()> {
        self.inner.save(path)
    }

    fn delete_page(&mut self, index: usize) -> StoreResult<()> {
        self.inner.delete_page(index)
    }

    fn rotate_page_by(&mut self, index: usize, delta: i32) -> StoreResult<()> {
        match self.rotations_left {
            Some(0) => Err(StoreError::Io(std::io::Error::other("rotation failed"))),
            Some(ref mut left) => {
                *left -= 1;
                self.inner.rotate_page_by(index, delta)
            }
            None => self.inner.rotate_page_by(index, delta),
        }
    }

    fn move_page(&mut self, from: usize, to: usize) -> StoreResult<()> {
        self.inner.move_page(from, to)
    }

    fn reorder_pages(&mut self, order: &[usize]) -> StoreResult<()> {
        self.inner.reorder_pages(order)
    }

    fn keep_only_pages(&mut self, indices: &[usize]) -> StoreResult<()> {
        self.inner.keep_only_pages(indices)
    }

    fn insert_document_at(&mut self, path: &Path, index: usize) -> StoreResult<()> {
        self.inner.insert_document_at(path, index)
    }

    fn export_pages(&self, indices: &[usize], destination: &Path) -> StoreResult<()> {
        self.inner.export_pages(indices, destination)
    }

    fn snapshot(&self) -> Option<Snapshot> {
        self.inner.snapshot()
    }

    fn restore(&mut self, snapshot: &Snapshot) -> StoreResult<()> {
        if self.fail_restore {
            return Err(StoreError::Io(std::io::Error::other("restore failed")));
        }
        self.inner.restore(snapshot)
    }
}

fn session(labels: &[&str]) -> EditSession<MemoryStore> {
    EditSession::with_defaults(MemoryStore::with_pages(PageSet::labeled(
        labels.iter().copied(),
    )))
}

// Default grid: widget i of row 0 spans x 12+144i..132+144i, y 12..172.
// Centers sit at x = 72, 216, 360, 504 and y = 92 (row 0), 276 (row 1).
fn layout(count: usize) -> Vec<Rect> {
    GridLayout::default().rects(count)
}

fn write_doc(dir: &Path, name: &str, labels: &[&str]) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    PageSet::labeled(labels.iter().copied()).write(&path).unwrap();
    path
}

fn drag(session: &mut EditSession<MemoryStore>, index: usize, from: (f64, f64), to: (f64, f64)) {
    let count = session.page_count();
    session.pointer_press(Some(index), PointerEvent::at(from.0, from.1));
    session.pointer_move(PointerEvent::at(to.0, to.1), &layout(count));
    session.pointer_release(PointerEvent::at(to.0, to.1));
}

#[test]
fn test_dragging_unselected_page_selects_it_first() {
    let mut session = session(&["A", "B", "C"]);
    session.drain_effects();

    session.pointer_press(Some(1), PointerEvent::at(216.0, 92.0));
    session.pointer_move(PointerEvent::at(300.0, 92.0), &layout(3));
    assert!(session.selection().contains(1));

    let effects = session.drain_effects();
    let selected = effects
        .iter()
        .position(|effect| *effect == Effect::SelectionChanged)
        .unwrap();
    let highlighted = effects
        .iter()
        .position(|effect| {
            *effect
                == Effect::Highlight {
                    index: 1,
                    role: HighlightRole::Source,
                    on: true,
                }
        })
        .unwrap();
    assert!(selected < highlighted);
}

#[test]
fn test_drag_moves_whole_selection() {
    let mut session = session(&["A", "B", "C", "D"]);
    session.click(1, Modifiers::NONE);
    session.click(3, Modifiers::CTRL);

    drag(&mut session, 1, (216.0, 92.0), (30.0, 92.0));

    assert_eq!(session.store().labels(), vec!["B", "D", "A", "C"]);
    assert_eq!(session.history().undo_levels(), 1);
    assert!(session.selection().is_empty());
}

#[test]
fn test_drag_past_last_page_on_next_row() {
    let mut session = session(&["0", "1", "2", "3", "4"]);

    drag(&mut session, 1, (216.0, 92.0), (100.0, 276.0));

    assert_eq!(session.store().labels(), vec!["0", "2", "3", "4", "1"]);
}

#[test]
fn test_drag_below_threshold_is_a_click() {
    let mut session = session(&["A", "B", "C"]);
    drag(&mut session, 2, (360.0, 92.0), (363.0, 95.0));

    assert_eq!(session.store().labels(), vec!["A", "B", "C"]);
    assert_eq!(session.selection().sorted(), vec![2]);
    assert!(!session.history().can_undo());
}

#[test]
fn test_ctrl_press_release_toggles() {
    let mut session = session(&["A", "B", "C"]);
    session.click(0, Modifiers::NONE);

    let at = PointerEvent::at(360.0, 92.0).with_ctrl();
    session.pointer_press(Some(2), at);
    session.pointer_release(at);
    assert_eq!(session.selection().sorted(), vec![0, 2]);

    session.pointer_press(Some(2), at);
    session.pointer_release(at);
    assert_eq!(session.selection().sorted(), vec![0]);
}

#[test]
fn test_undo_redo_restores_exact_snapshots() {
    let mut session = session(&["A", "B", "C"]);
    let original = session.store().snapshot();

    session.rotate_page(1).unwrap();
    let rotated = session.store().snapshot();
    assert_ne!(original, rotated);

    assert!(session.undo().unwrap());
    assert_eq!(session.store().snapshot(), original);
    assert!(session.affordances().redo);

    assert!(session.redo().unwrap());
    assert_eq!(session.store().snapshot(), rotated);
    assert!(!session.affordances().redo);
}

#[test]
fn test_failed_composite_rotation_leaves_no_trace() {
    let store = FlakyStore::new(&["A", "B", "C"]);
    let mut session = EditSession::with_defaults(store);
    session.rotate_page(0).unwrap();

    session.store_mut().rotations_left = Some(1);
    session.execute(Command::SelectAll);
    let before = session.store().snapshot();
    session.drain_effects();

    assert!(!session.execute(Command::RotateSelected { degrees: 90 }));

    assert_eq!(session.store().snapshot(), before);
    assert_eq!(session.history().undo_levels(), 1);
    let effects = session.drain_effects();
    assert!(effects.iter().any(Effect::is_error));
}

#[test]
fn test_failed_undo_discards_entry() {
    let store = FlakyStore::new(&["A", "B"]);
    let mut session = EditSession::with_defaults(store);
    session.rotate_page(0).unwrap();
    session.store_mut().fail_restore = true;

    let result = session.undo();
    assert!(matches!(result, Err(EditorError::Store(_))));
    assert_eq!(session.history().undo_levels(), 0);
    assert_eq!(session.history().redo_levels(), 0);
    assert_eq!(session.store().labels(), vec!["A", "B"]);
    assert_eq!(session.store().inner.pages()[0].rotation, 90);
}

#[test]
fn test_external_drag_exports_selection() {
    let mut session = session(&["A", "B", "C"]);
    session.drain_effects();

    session.pointer_press(Some(2), PointerEvent::at(360.0, 92.0).with_ctrl());
    session.pointer_move(PointerEvent::at(420.0, 92.0), &layout(3));

    assert_eq!(session.selection().sorted(), vec![2]);
    let payload = session
        .drain_effects()
        .into_iter()
        .find_map(|effect| match effect {
            Effect::DragPayload(payload) => Some(payload),
            _ => None,
        })
        .unwrap();

    let exported = PageSet::load(Path::new(&payload)).unwrap();
    assert_eq!(exported, PageSet::labeled(["C"]));

    session.pointer_release(PointerEvent::at(900.0, 900.0));
    assert_eq!(session.store().labels(), vec!["A", "B", "C"]);
    assert!(!session.history().can_undo());

    session.close();
    assert!(!Path::new(&payload).exists());
}

#[test]
fn test_drop_files_inserts_each_in_order() {
    let dir = TempDir::new().unwrap();
    let x = write_doc(dir.path(), "my docs/x.folio", &["X1", "X2"]);
    let y = write_doc(dir.path(), "y.folio", &["Y1"]);
    let data = format!("{{{}}} {}", x.display(), y.display());

    let mut session = session(&["A", "B", "C"]);
    // Left half of page 1: insert before it
    session.drop_files(&data, PointerEvent::at(150.0, 92.0), &layout(3));

    assert_eq!(
        session.store().labels(),
        vec!["A", "X1", "X2", "Y1", "B", "C"]
    );
    assert_eq!(session.history().undo_levels(), 2);

    session.undo().unwrap();
    assert_eq!(session.store().labels(), vec!["A", "X1", "X2", "B", "C"]);
}

#[test]
fn test_drop_files_into_empty_editor_opens_first() {
    let dir = TempDir::new().unwrap();
    let x = write_doc(dir.path(), "x.folio", &["X1", "X2"]);
    let y = write_doc(dir.path(), "y.folio", &["Y1"]);
    let data = format!("file://{}\n{}", x.display(), y.display());

    let mut session = EditSession::with_defaults(MemoryStore::new());
    let no_pages: Vec<Rect> = Vec::new();
    session.drop_files(&data, PointerEvent::at(0.0, 0.0), &no_pages);

    assert_eq!(session.store().labels(), vec!["X1", "X2", "Y1"]);
    assert_eq!(session.current_path(), Some(x.as_path()));
    assert_eq!(session.history().undo_levels(), 1);
}

#[test]
fn test_drop_after_deleting_last_page_opens() {
    let dir = TempDir::new().unwrap();
    let x = write_doc(dir.path(), "x.folio", &["X1", "X2"]);

    let mut session = session(&["A"]);
    session.delete_page(0).unwrap();
    assert!(!session.store().is_open());
    session.drain_effects();

    let no_pages: Vec<Rect> = Vec::new();
    session.drop_files(
        &x.display().to_string(),
        PointerEvent::at(0.0, 0.0),
        &no_pages,
    );

    assert_eq!(session.store().labels(), vec!["X1", "X2"]);
    assert!(!session.drain_effects().iter().any(Effect::is_error));
}

#[test]
fn test_drop_files_without_layout_appends() {
    let dir = TempDir::new().unwrap();
    let x = write_doc(dir.path(), "x.folio", &["X1"]);

    let mut session = session(&["A", "B"]);
    let no_pages: Vec<Rect> = Vec::new();
    session.drop_files(
        &x.display().to_string(),
        PointerEvent::at(10.0, 10.0),
        &no_pages,
    );

    assert_eq!(session.store().labels(), vec!["A", "B", "X1"]);
}

#[test]
fn test_drop_ignores_other_files() {
    let dir = TempDir::new().unwrap();
    let notes = dir.path().join("notes.txt");
    std::fs::write(&notes, "not a document").unwrap();
    let missing = dir.path().join("missing.folio");
    let data = format!("{} {}", notes.display(), missing.display());

    let mut session = session(&["A", "B"]);
    session.drain_effects();
    session.drop_files(&data, PointerEvent::at(72.0, 92.0), &layout(2));

    assert_eq!(session.store().labels(), vec!["A", "B"]);
    assert!(!session.history().can_undo());
    assert!(session.drain_effects().is_empty());
}

#[test]
fn test_copy_paste_shortcuts() {
    let mut session = session(&["A", "B", "C"]);
    session.click(0, Modifiers::NONE);

    session.key(KeyStroke::ctrl('c'));
    assert!(session.clipboard().is_some());

    session.key(KeyStroke::ctrl('v'));
    assert_eq!(session.store().labels(), vec!["A", "A", "B", "C"]);
    assert_eq!(session.selection().sorted(), vec![1]);

    session.key(KeyStroke::ctrl('z'));
    assert_eq!(session.store().labels(), vec!["A", "B", "C"]);
}

#[test]
fn test_save_and_reopen() {
    let dir = TempDir::new().unwrap();
    let path = write_doc(dir.path(), "book.folio", &["A", "B", "C"]);

    let mut session = EditSession::with_defaults(MemoryStore::new());
    session.open(&path, false).unwrap();
    session.click(2, Modifiers::NONE);
    session.move_selected_to(0).unwrap();
    assert!(session.store().is_dirty());

    session.save(None).unwrap();
    assert!(!session.store().is_dirty());

    session.reset(false).unwrap();
    assert!(!session.store().is_open());
    session.open(&path, false).unwrap();
    assert_eq!(session.store().labels(), vec!["C", "A", "B"]);
}
