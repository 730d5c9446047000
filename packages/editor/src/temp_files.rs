//! Temporary documents created for outgoing drags and copies.
//!
//! Each file is exported by the store, then tracked here until the session
//! ends. Dropping the tracker deletes whatever is still on disk.

use crate::EditorError;
use folio_store::DocumentStore;
use std::path::{Path, PathBuf};
use tempfile::TempPath;
use tracing::{debug, warn};

#[derive(Debug)]
pub struct TempFiles {
    prefix: String,
    files: Vec<TempPath>,
}

impl TempFiles {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            files: Vec::new(),
        }
    }

    /// Export `indices` to a fresh temporary document and track it.
    ///
    /// The file is removed again when the export fails.
    pub fn export<S: DocumentStore + ?Sized>(
        &mut self,
        store: &S,
        indices: &[usize],
    ) -> Result<PathBuf, EditorError> {
        let suffix = format!(".{}", store.file_extension());
        let path = tempfile::Builder::new()
            .prefix(&self.prefix)
            .suffix(&suffix)
            .tempfile()?
            .into_temp_path();

        // On error `path` drops here and takes the file with it
        store.export_pages(indices, &path)?;

        let exported = path.to_path_buf();
        debug!("Exported {} pages to {}", indices.len(), exported.display());
        self.files.push(path);
        Ok(exported)
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().map(|path| &**path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Delete every tracked file
    pub fn cleanup(&mut self) {
        for path in self.files.drain(..) {
            let shown = path.to_path_buf();
            if let Err(err) = path.close() {
                warn!("Could not remove {}: {}", shown.display(), err);
            }
        }
    }
}

impl Drop for TempFiles {
    fn drop(&mut self) {
        self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_store::{MemoryStore, PageSet};

    #[test]
    fn test_export_and_cleanup() {
        let store = MemoryStore::with_pages(PageSet::labeled(["A", "B", "C"]));
        let mut temp = TempFiles::new("folio_test_");

        let path = temp.export(&store, &[2, 0]).unwrap();
        assert!(path.exists());
        assert_eq!(path.extension().unwrap(), "folio");
        assert!(path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("folio_test_"));

        let exported = PageSet::load(&path).unwrap();
        assert_eq!(exported.pages[0].label, "C");
        assert_eq!(exported.pages[1].label, "A");

        temp.cleanup();
        assert!(temp.is_empty());
        assert!(!path.exists());
    }

    #[test]
    fn test_failed_export_leaves_nothing_behind() {
        let store = MemoryStore::with_pages(PageSet::labeled(["A"]));
        let mut temp = TempFiles::new("folio_test_");

        assert!(temp.export(&store, &[]).is_err());
        assert!(temp.is_empty());
    }

    #[test]
    fn test_drop_removes_files() {
        let store = MemoryStore::with_pages(PageSet::labeled(["A"]));
        let path = {
            let mut temp = TempFiles::new("folio_test_");
            temp.export(&store, &[0]).unwrap()
        };
        assert!(!path.exists());
    }
}
