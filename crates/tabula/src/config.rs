//! Table options.
//!
//! Options are plain serde data so a list view can be configured from JSON
//! as well as through the builder methods.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TableError};
use crate::page::PageSize;
use crate::selection::SelectionMode;
use crate::sort::SortPolicy;

/// Options of one table view.
///
/// # Example
///
/// ```
/// use tabula::{PageSize, SelectionMode, TableOptions};
///
/// let options = TableOptions::from_json(r#"{
///     "page_size": 25,
///     "search_fields": ["company", "email"],
///     "selection_mode": "controlled"
/// }"#).unwrap();
///
/// assert_eq!(options.page_size, PageSize::rows(25).unwrap());
/// assert_eq!(options.selection_mode, SelectionMode::Controlled);
/// assert!(options.sort_policy.lock_first);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableOptions {
    /// Page size when the view opens or is reset. It need not be one of
    /// the choices; it stays selectable alongside them.
    pub page_size: PageSize,
    /// Entries of the page-size control. Other sizes are rejected by
    /// [`DataTable::set_page_size`](crate::DataTable::set_page_size).
    pub page_size_choices: Vec<PageSize>,
    /// Fields searched by the search box; empty means every field.
    pub search_fields: Vec<String>,
    pub sort_policy: SortPolicy,
    pub selection_mode: SelectionMode,
}

impl Default for TableOptions {
    fn default() -> Self {
        TableOptions {
            page_size: PageSize::default(),
            page_size_choices: PageSize::default_choices(),
            search_fields: Vec::new(),
            sort_policy: SortPolicy::default(),
            selection_mode: SelectionMode::default(),
        }
    }
}

impl TableOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and validates options from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let options: TableOptions = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size_choices.is_empty() {
            return Err(TableError::EmptyPageSizeChoices);
        }
        Ok(())
    }

    pub fn page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn page_size_choices(mut self, choices: Vec<PageSize>) -> Self {
        self.page_size_choices = choices;
        self
    }

    pub fn search_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn sort_policy(mut self, policy: SortPolicy) -> Self {
        self.sort_policy = policy;
        self
    }

    pub fn selection_mode(mut self, mode: SelectionMode) -> Self {
        self.selection_mode = mode;
        self
    }
}
