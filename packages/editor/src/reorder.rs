//! # Reorder planning
//!
//! Turns "move the selected pages to insertion slot `target`" into either a
//! single-page move or a full page permutation. Pure: no store access.
//!
//! ## Semantics
//!
//! `target` is an insertion slot in `0..=count`, measured against the
//! current order (slot `count` means past the last page).
//!
//! - One selected page `from`:
//!   - `target == from` or `target == from + 1` does nothing (the page
//!     would land where it already is)
//!   - `target == count` moves the page to the end
//!   - otherwise the page is removed then reinserted, so it lands at
//!     `target - 1` when `target > from`
//! - Several selected pages:
//!   - a `target` inside the selection is rejected (no-op)
//!   - otherwise the unselected pages keep their order, and the selected
//!     block (ascending) is spliced in after every unselected page whose
//!     index is below `target`
//!   - a splice that reproduces the current order is reported as unchanged

use crate::mutations::Mutation;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovePlan {
    /// Nothing to commit
    Unchanged,
    /// Single page, remove-then-insert before the page at `to`
    Single { from: usize, to: usize },
    /// Full permutation of the pages
    Reorder(Vec<usize>),
}

impl MovePlan {
    /// Resulting page order for a document of `count` pages
    pub fn order(&self, count: usize) -> Vec<usize> {
        match self {
            MovePlan::Unchanged => (0..count).collect(),
            MovePlan::Single { from, to } => {
                let mut order: Vec<usize> = (0..count).collect();
                let page = order.remove(*from);
                let slot = if to > from { to - 1 } else { *to };
                order.insert(slot, page);
                order
            }
            MovePlan::Reorder(order) => order.clone(),
        }
    }

    pub fn into_mutation(self) -> Option<Mutation> {
        match self {
            MovePlan::Unchanged => None,
            MovePlan::Single { from, to } => Some(Mutation::MovePage { from, to }),
            MovePlan::Reorder(order) => Some(Mutation::Reorder { order }),
        }
    }
}

/// Plan moving `selected` to insertion slot `target` in a `count`-page document.
pub fn plan_move(count: usize, selected: &BTreeSet<usize>, target: usize) -> MovePlan {
    if selected.is_empty() || target > count || selected.iter().any(|&index| index >= count) {
        return MovePlan::Unchanged;
    }

    if selected.len() == 1 {
        let Some(&from) = selected.first() else {
            return MovePlan::Unchanged;
        };
        if from == target || from + 1 == target {
            return MovePlan::Unchanged;
        }
        if target == count {
            let order = (0..count)
                .filter(|&index| index != from)
                .chain(std::iter::once(from))
                .collect();
            return MovePlan::Reorder(order);
        }
        return MovePlan::Single { from, to: target };
    }

    if selected.contains(&target) {
        return MovePlan::Unchanged;
    }

    let order = splice_selection(count, selected, target);
    if order.iter().enumerate().all(|(slot, &index)| slot == index) {
        return MovePlan::Unchanged;
    }
    MovePlan::Reorder(order)
}

fn splice_selection(count: usize, selected: &BTreeSet<usize>, target: usize) -> Vec<usize> {
    let remaining: Vec<usize> = (0..count).filter(|index| !selected.contains(index)).collect();
    let insert_pos = remaining.iter().take_while(|&&index| index < target).count();

    let mut order = Vec::with_capacity(count);
    order.extend_from_slice(&remaining[..insert_pos]);
    order.extend(selected.iter().copied());
    order.extend_from_slice(&remaining[insert_pos..]);
    order
}
