//! Identity-based row selection.
//!
//! Selection tracks record identities, not positions, so it survives sorting,
//! paging and wholesale replacement of the record snapshot. Identities that
//! leave the snapshot are pruned.

use crate::model::RecordId;
use std::collections::{BTreeSet, HashSet};

/// Set of selected record identities.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected: BTreeSet<RecordId>,
}

impl Selection {
    /// Empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `id` is selected.
    pub fn is_selected(&self, id: &RecordId) -> bool {
        self.selected.contains(id)
    }

    /// Number of selected identities.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// True when nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Selected identities in deterministic order.
    pub fn ids(&self) -> impl Iterator<Item = &RecordId> {
        self.selected.iter()
    }

    /// Selected identities in sorted order.
    pub fn to_vec(&self) -> Vec<RecordId> {
        self.selected.iter().cloned().collect()
    }

    /// Flip one identity. Returns `true` if it is now selected.
    pub fn toggle(&mut self, id: &RecordId) -> bool {
        if self.selected.remove(id) {
            false
        } else {
            self.selected.insert(id.clone());
            true
        }
    }

    /// Select every identity. Returns how many were newly added.
    pub fn select_all<'a>(&mut self, ids: impl IntoIterator<Item = &'a RecordId>) -> usize {
        ids.into_iter()
            .filter(|id| self.selected.insert((*id).clone()))
            .count()
    }

    /// Deselect every identity. Returns how many were removed.
    pub fn deselect_all<'a>(&mut self, ids: impl IntoIterator<Item = &'a RecordId>) -> usize {
        ids.into_iter().filter(|id| self.selected.remove(*id)).count()
    }

    /// Clear the selection. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.selected.len();
        self.selected.clear();
        removed
    }

    /// Drop identities not in `present`. Returns how many were pruned.
    pub fn retain_present(&mut self, present: &HashSet<RecordId>) -> usize {
        let before = self.selected.len();
        self.selected.retain(|id| present.contains(id));
        before - self.selected.len()
    }
}

/// State of the "select all on this page" header checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderCheck {
    /// No selectable rows on the page.
    Unavailable,
    /// No selectable row on the page is selected.
    Unchecked,
    /// Some, but not all, selectable rows on the page are selected.
    Partial,
    /// Every selectable row on the page is selected.
    Checked,
}

impl HeaderCheck {
    /// Checkbox glyph.
    pub fn glyph(self) -> &'static str {
        match self {
            HeaderCheck::Unavailable => "   ",
            HeaderCheck::Unchecked => "[ ]",
            HeaderCheck::Partial => "[-]",
            HeaderCheck::Checked => "[x]",
        }
    }
}

/// Header checkbox state for the selectable identities on the visible page.
pub fn header_check<'a>(
    selection: &Selection,
    visible_selectable: impl IntoIterator<Item = &'a RecordId>,
) -> HeaderCheck {
    let mut total = 0usize;
    let mut selected = 0usize;
    for id in visible_selectable {
        total += 1;
        if selection.is_selected(id) {
            selected += 1;
        }
    }
    match (total, selected) {
        (0, _) => HeaderCheck::Unavailable,
        (_, 0) => HeaderCheck::Unchecked,
        (t, s) if t == s => HeaderCheck::Checked,
        _ => HeaderCheck::Partial,
    }
}
