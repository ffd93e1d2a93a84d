//! Row selection.
//!
//! Selection is a set of row ids, independent of the current search, sort
//! and page. It only changes through a [`SelectionAction`]; navigating or
//! filtering never drops a selected id.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::row::RowId;

/// Who owns the selection set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// The caller owns the set: the table reports the requested next set and
    /// waits for [`SelectionAction::Sync`] to commit it.
    Controlled,
    /// The table owns the set, applies changes and reports them.
    #[default]
    Uncontrolled,
}

/// State of the "select all" header checkbox relative to the matching rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectAllState {
    /// No matching row is selected.
    None,
    /// Some, not all, matching rows are selected.
    Partial,
    /// Every matching row is selected (and there is at least one).
    All,
}

/// A named change to the selection set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionAction {
    Select(RowId),
    Deselect(RowId),
    Toggle(RowId),
    /// Replace the selection with every matching id.
    SelectAll(Vec<RowId>),
    /// Clear the selection if every matching id is selected, otherwise
    /// behave like [`SelectionAction::SelectAll`].
    ToggleAll(Vec<RowId>),
    Clear,
    /// Replace the selection with a set pushed by the caller.
    Sync(Vec<RowId>),
}

/// Set of selected row ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected: BTreeSet<RowId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ids(ids: impl IntoIterator<Item = RowId>) -> Self {
        Selection {
            selected: ids.into_iter().collect(),
        }
    }

    /// Selected ids in sorted order.
    pub fn ids(&self) -> Vec<RowId> {
        self.selected.iter().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RowId> {
        self.selected.iter()
    }

    pub fn is_selected(&self, id: &RowId) -> bool {
        self.selected.contains(id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Header checkbox state for the given matching ids.
    pub fn select_all_state(&self, matching: &[RowId]) -> SelectAllState {
        let hits = matching.iter().filter(|id| self.is_selected(id)).count();
        if hits == 0 {
            SelectAllState::None
        } else if hits == matching.len() {
            SelectAllState::All
        } else {
            SelectAllState::Partial
        }
    }

    /// Applies an action. Returns `true` if the set changed.
    pub fn apply(&mut self, action: SelectionAction) -> bool {
        match action {
            SelectionAction::Select(id) => self.selected.insert(id),
            SelectionAction::Deselect(id) => self.selected.remove(&id),
            SelectionAction::Toggle(id) => {
                if !self.selected.remove(&id) {
                    self.selected.insert(id);
                }
                true
            }
            SelectionAction::SelectAll(ids) | SelectionAction::Sync(ids) => self.replace(ids),
            SelectionAction::ToggleAll(ids) => {
                if self.select_all_state(&ids) == SelectAllState::All {
                    self.apply(SelectionAction::Clear)
                } else {
                    self.replace(ids)
                }
            }
            SelectionAction::Clear => {
                let changed = !self.selected.is_empty();
                self.selected.clear();
                changed
            }
        }
    }

    fn replace(&mut self, ids: Vec<RowId>) -> bool {
        let next: BTreeSet<RowId> = ids.into_iter().collect();
        let changed = next != self.selected;
        self.selected = next;
        changed
    }
}
