//! Column visibility.
//!
//! Tracks which declared columns are rendered. At least one column always
//! stays visible: hiding the last visible column is a no-op.

use std::collections::HashSet;

use crate::column::ColumnSet;
use crate::error::{Result, TableError};

/// Visible column set of a table, read through
/// [`TableState::visibility`](crate::TableState::visibility).
///
/// Remembers the declared order and the initial set so [`reset`] can
/// restore it.
///
/// [`reset`]: ColumnVisibility::reset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnVisibility {
    order: Vec<String>,
    defaults: HashSet<String>,
    visible: HashSet<String>,
}

impl ColumnVisibility {
    /// Starts with every column not marked hidden.
    ///
    /// If every column is hidden by default, the first one is shown anyway.
    pub fn new<R>(columns: &ColumnSet<R>) -> Self {
        let order: Vec<String> = columns.ids().map(str::to_string).collect();
        let mut defaults: HashSet<String> = columns
            .iter()
            .filter(|c| c.is_visible_by_default())
            .map(|c| c.id().to_string())
            .collect();
        if defaults.is_empty() {
            if let Some(first) = order.first() {
                defaults.insert(first.clone());
            }
        }
        ColumnVisibility {
            order,
            visible: defaults.clone(),
            defaults,
        }
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.visible.contains(id)
    }

    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    /// Visible column ids in declaration order.
    pub fn visible_ids(&self) -> Vec<&str> {
        self.order
            .iter()
            .filter(|id| self.visible.contains(id.as_str()))
            .map(String::as_str)
            .collect()
    }

    /// Flips a column's visibility. Returns `true` if anything changed.
    ///
    /// Hiding the only visible column does nothing.
    pub fn toggle(&mut self, id: &str) -> Result<bool> {
        if !self.order.iter().any(|known| known == id) {
            return Err(TableError::UnknownColumn { id: id.to_string() });
        }
        if self.visible.contains(id) {
            if self.visible.len() == 1 {
                return Ok(false);
            }
            self.visible.remove(id);
        } else {
            self.visible.insert(id.to_string());
        }
        Ok(true)
    }

    pub fn show_all(&mut self) {
        self.visible = self.order.iter().cloned().collect();
    }

    /// Restores the initial visible set.
    pub fn reset(&mut self) {
        self.visible = self.defaults.clone();
    }
}
