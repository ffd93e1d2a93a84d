//! Per-table state and its transitions.
//!
//! [`TableState`] is written only through [`TableState::apply`]. Changing the
//! search term, the sort or the page size sends the view back to page 1 and
//! drops the row highlight.

use crate::column::ColumnSet;
use crate::page::{PageSize, PageState};
use crate::row::RowId;
use crate::selection::{Selection, SelectionAction};
use crate::sort::SortConfig;
use crate::visibility::ColumnVisibility;

/// A named transition of [`TableState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableAction {
    SetSearch(String),
    SetSort(Option<SortConfig>),
    SetPageSize(PageSize),
    /// Move to a page. Callers clamp against the current page count.
    GoToPage(usize),
    ToggleColumn(String),
    ShowAllColumns,
    Highlight(Option<RowId>),
    Selection(SelectionAction),
    /// Back to the initial state, selection included.
    Reset,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState {
    search: String,
    sort: Option<SortConfig>,
    page: PageState,
    initial_page_size: PageSize,
    visibility: ColumnVisibility,
    selection: Selection,
    highlighted: Option<RowId>,
}

impl TableState {
    pub fn new<R>(columns: &ColumnSet<R>, page_size: PageSize) -> Self {
        TableState {
            search: String::new(),
            sort: None,
            page: PageState::new(page_size),
            initial_page_size: page_size,
            visibility: ColumnVisibility::new(columns),
            selection: Selection::new(),
            highlighted: None,
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort(&self) -> Option<&SortConfig> {
        self.sort.as_ref()
    }

    pub fn page(&self) -> PageState {
        self.page
    }

    pub fn visibility(&self) -> &ColumnVisibility {
        &self.visibility
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn highlighted(&self) -> Option<&RowId> {
        self.highlighted.as_ref()
    }

    /// Applies a transition. Returns `true` if the state changed.
    pub fn apply(&mut self, action: TableAction) -> bool {
        match action {
            TableAction::SetSearch(term) => {
                if term == self.search {
                    return false;
                }
                self.search = term;
                self.back_to_first_page();
                true
            }
            TableAction::SetSort(sort) => {
                if sort == self.sort {
                    return false;
                }
                self.sort = sort;
                self.back_to_first_page();
                true
            }
            TableAction::SetPageSize(size) => {
                if size == self.page.page_size {
                    return false;
                }
                self.page.page_size = size;
                self.back_to_first_page();
                true
            }
            TableAction::GoToPage(page) => {
                let page = page.max(1);
                let changed = page != self.page.current_page;
                self.page.current_page = page;
                changed
            }
            TableAction::ToggleColumn(id) => match self.visibility.toggle(&id) {
                Ok(changed) => changed,
                Err(err) => {
                    tracing::warn!(%err, "ignoring column toggle");
                    false
                }
            },
            TableAction::ShowAllColumns => {
                let before = self.visibility.visible_count();
                self.visibility.show_all();
                before != self.visibility.visible_count()
            }
            TableAction::Highlight(id) => {
                let changed = id != self.highlighted;
                self.highlighted = id;
                changed
            }
            TableAction::Selection(action) => self.selection.apply(action),
            TableAction::Reset => {
                let before = self.clone();
                self.search.clear();
                self.sort = None;
                self.page = PageState::new(self.initial_page_size);
                self.visibility.reset();
                self.selection = Selection::new();
                self.highlighted = None;
                before != *self
            }
        }
    }

    fn back_to_first_page(&mut self) {
        self.page.current_page = 1;
        self.highlighted = None;
    }
}
