//! # Page selection
//!
//! The set of selected page indices plus the anchor used for shift-range
//! clicks. Indices are always a subset of `[0, page_count)`; callers must
//! `reconcile` after every mutation that changes the page count.
//!
//! Mutating methods return whether the selection actually changed so the
//! session can decide whether to publish a refresh.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Click modifiers, normalized from whatever the host event carried
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub ctrl: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
    };
    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ctrl: false,
    };
    pub const CTRL: Modifiers = Modifiers {
        shift: false,
        ctrl: true,
    };
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    indices: BTreeSet<usize>,
    anchor: Option<usize>,
    page_count: usize,
}

impl Selection {
    pub fn new(page_count: usize) -> Self {
        Self {
            indices: BTreeSet::new(),
            anchor: None,
            page_count,
        }
    }

    pub fn indices(&self) -> &BTreeSet<usize> {
        &self.indices
    }

    /// Selected indices in ascending order
    pub fn sorted(&self) -> Vec<usize> {
        self.indices.iter().copied().collect()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn max(&self) -> Option<usize> {
        self.indices.last().copied()
    }

    pub fn anchor(&self) -> Option<usize> {
        self.anchor
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    fn is_valid(&self, index: usize) -> bool {
        index < self.page_count
    }

    /// Flip membership of `index`; ignored when `index` is out of range
    pub fn toggle(&mut self, index: usize) -> bool {
        if !self.is_valid(index) {
            return false;
        }
        if !self.indices.remove(&index) {
            self.indices.insert(index);
        }
        true
    }

    /// Add `index` without touching the anchor
    pub fn insert(&mut self, index: usize) -> bool {
        self.is_valid(index) && self.indices.insert(index)
    }

    /// Apply a thumbnail click.
    ///
    /// - shift with an anchor: select the inclusive range anchor..=index
    /// - ctrl: toggle `index`, keep the rest
    /// - otherwise (including shift without an anchor): select only `index`
    ///
    /// The anchor moves to `index` in every case.
    pub fn apply_click(&mut self, index: usize, modifiers: Modifiers) -> bool {
        if !self.is_valid(index) {
            return false;
        }

        match self.anchor {
            Some(anchor) if modifiers.shift => {
                let (start, end) = (anchor.min(index), anchor.max(index));
                let end = end.min(self.page_count - 1);
                self.indices = (start..=end).collect();
            }
            _ if modifiers.ctrl && !modifiers.shift => {
                self.toggle(index);
            }
            _ => {
                self.indices.clear();
                self.indices.insert(index);
            }
        }

        self.anchor = Some(index);
        true
    }

    /// Select every page, or clear when every page is already selected
    pub fn select_all(&mut self) -> bool {
        if self.page_count == 0 {
            return false;
        }
        if self.indices.len() == self.page_count {
            return self.clear();
        }
        self.indices = (0..self.page_count).collect();
        self.anchor = Some(0);
        true
    }

    /// Drop every index and the anchor
    pub fn clear(&mut self) -> bool {
        let changed = !self.indices.is_empty() || self.anchor.is_some();
        self.indices.clear();
        self.anchor = None;
        changed
    }

    /// Replace the selection wholesale (e.g. freshly pasted pages)
    pub fn replace<I>(&mut self, indices: I, anchor: Option<usize>) -> bool
    where
        I: IntoIterator<Item = usize>,
    {
        let page_count = self.page_count;
        let next: BTreeSet<usize> = indices.into_iter().filter(|&i| i < page_count).collect();
        let anchor = anchor.filter(|&a| a < page_count);
        let changed = next != self.indices || anchor != self.anchor;
        self.indices = next;
        self.anchor = anchor;
        changed
    }

    /// Adopt a new page count, dropping indices (and the anchor) that no
    /// longer exist
    pub fn reconcile(&mut self, page_count: usize) -> bool {
        self.page_count = page_count;
        let before = self.indices.len();
        self.indices.retain(|&index| index < page_count);

        let mut changed = self.indices.len() != before;
        if self.anchor.is_some_and(|anchor| anchor >= page_count) {
            self.anchor = None;
            changed = true;
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selected(selection: &Selection) -> Vec<usize> {
        selection.sorted()
    }

    #[test]
    fn test_plain_click_selects_single_page() {
        let mut selection = Selection::new(5);
        selection.apply_click(1, Modifiers::NONE);
        selection.apply_click(3, Modifiers::NONE);
        assert_eq!(selected(&selection), vec![3]);
        assert_eq!(selection.anchor(), Some(3));
    }

    #[test]
    fn test_ctrl_click_toggles() {
        let mut selection = Selection::new(5);
        selection.apply_click(1, Modifiers::NONE);
        selection.apply_click(3, Modifiers::CTRL);
        assert_eq!(selected(&selection), vec![1, 3]);

        selection.apply_click(1, Modifiers::CTRL);
        assert_eq!(selected(&selection), vec![3]);
        assert_eq!(selection.anchor(), Some(1));
    }

    #[test]
    fn test_shift_click_selects_range_in_either_direction() {
        let mut selection = Selection::new(8);
        selection.apply_click(5, Modifiers::NONE);
        selection.apply_click(2, Modifiers::SHIFT);
        assert_eq!(selected(&selection), vec![2, 3, 4, 5]);
        assert_eq!(selection.anchor(), Some(2));

        selection.apply_click(4, Modifiers::SHIFT);
        assert_eq!(selected(&selection), vec![2, 3, 4]);
    }

    #[test]
    fn test_shift_without_anchor_acts_like_plain_click() {
        let mut shifted = Selection::new(4);
        shifted.apply_click(2, Modifiers::SHIFT);

        let mut plain = Selection::new(4);
        plain.apply_click(2, Modifiers::NONE);

        assert_eq!(shifted, plain);
        assert_eq!(selected(&shifted), vec![2]);
        assert_eq!(shifted.anchor(), Some(2));
    }

    #[test]
    fn test_invalid_index_is_ignored() {
        let mut selection = Selection::new(2);
        assert!(!selection.toggle(2));
        assert!(!selection.apply_click(7, Modifiers::NONE));
        assert!(selection.is_empty());
        assert_eq!(selection.anchor(), None);
    }

    #[test]
    fn test_select_all_toggles_to_none() {
        let mut selection = Selection::new(3);
        assert!(selection.select_all());
        assert_eq!(selected(&selection), vec![0, 1, 2]);
        assert_eq!(selection.anchor(), Some(0));

        assert!(selection.select_all());
        assert!(selection.is_empty());
        assert_eq!(selection.anchor(), None);
    }

    #[test]
    fn test_select_all_on_empty_document() {
        let mut selection = Selection::new(0);
        assert!(!selection.select_all());
        assert!(selection.is_empty());
    }

    #[test]
    fn test_reconcile_drops_stale_indices() {
        let mut selection = Selection::new(6);
        selection.apply_click(1, Modifiers::NONE);
        selection.apply_click(5, Modifiers::SHIFT);
        assert!(selection.reconcile(3));
        assert_eq!(selected(&selection), vec![1, 2]);
        assert_eq!(selection.anchor(), None);
        assert!(!selection.reconcile(3));
    }

    #[test]
    fn test_replace_filters_out_of_range() {
        let mut selection = Selection::new(4);
        selection.replace([1, 2, 9], Some(9));
        assert_eq!(selected(&selection), vec![1, 2]);
        assert_eq!(selection.anchor(), None);
    }
}
