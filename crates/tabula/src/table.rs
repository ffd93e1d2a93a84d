//! The table orchestrator.
//!
//! [`DataTable`] composes the stages into one derivation:
//!
//! ```text
//! filtered = filter(data, search)
//! sorted   = sort(filtered, sort)
//! page     = paginate(sorted, page)
//! ```
//!
//! The dataset is owned by the caller and passed in on every call; the table
//! owns the search term, sort, pagination, column visibility and selection.
//! Every call recomputes the pipeline from scratch.

use std::fmt;

use serde::Serialize;

use crate::bulk::{AfterAction, BulkAction, BulkActionBar, BulkBarView};
use crate::column::{Column, ColumnSet};
use crate::config::TableOptions;
use crate::error::Result;
use crate::filter::filter_rows;
use crate::page::{clamp_page, paginate, total_pages, Page, PageRange, PageSize, PageState};
use crate::row::{Row, RowId};
use crate::selection::{SelectAllState, Selection, SelectionAction, SelectionMode};
use crate::sort::{sort_rows, SortConfig};
use crate::state::{TableAction, TableState};

type SelectionListener = Box<dyn FnMut(&[RowId])>;
type RowListener<R> = Box<dyn FnMut(&R)>;
type AddListener = Box<dyn FnMut()>;

/// An interactive table over a caller-owned dataset.
///
/// `C` is the context handed to bulk-action visibility predicates, such as
/// the active status tab.
///
/// # Example
///
/// ```
/// use tabula::{Column, DataTable, PageSize, TableOptions};
/// use serde_json::json;
///
/// let data: Vec<_> = (1..=25)
///     .map(|i| json!({ "id": i, "name": format!("Project {i}") }))
///     .filter_map(|v| v.as_object().cloned())
///     .collect();
///
/// let mut table: DataTable<_> = DataTable::new(
///     vec![Column::field("id"), Column::field("name").sortable(), Column::field("actions")],
///     TableOptions::new().page_size(PageSize::rows(10).unwrap()),
/// )
/// .unwrap();
///
/// table.go_to_page(&data, 3);
/// let view = table.view(&data);
/// assert_eq!(view.rows().len(), 5);
/// assert_eq!(view.metrics().total_pages, 3);
///
/// table.set_search("project 1");
/// let view = table.view(&data);
/// assert_eq!(view.metrics().current_page, 1);
/// ```
pub struct DataTable<R, C = ()> {
    columns: ColumnSet<R>,
    options: TableOptions,
    state: TableState,
    bulk: BulkActionBar<C>,
    on_selection_change: Option<SelectionListener>,
    on_row_click: Option<RowListener<R>>,
    on_add_click: Option<AddListener>,
}

impl<R: Row, C> DataTable<R, C> {
    /// Creates a table from column descriptors and options.
    pub fn new(columns: Vec<Column<R>>, options: TableOptions) -> Result<Self> {
        options.validate()?;
        let columns = ColumnSet::new(columns)?;
        let state = TableState::new(&columns, options.page_size);
        Ok(DataTable {
            columns,
            options,
            state,
            bulk: BulkActionBar::default(),
            on_selection_change: None,
            on_row_click: None,
            on_add_click: None,
        })
    }

    /// Adds a bulk action.
    pub fn with_bulk_action(mut self, action: BulkAction<C>) -> Self {
        self.bulk.push(action);
        self
    }

    /// Registers the selection listener. It receives the full next set, in
    /// id order, whenever a selection change is requested.
    pub fn on_selection_change(mut self, f: impl FnMut(&[RowId]) + 'static) -> Self {
        self.on_selection_change = Some(Box::new(f));
        self
    }

    pub fn on_row_click(mut self, f: impl FnMut(&R) + 'static) -> Self {
        self.on_row_click = Some(Box::new(f));
        self
    }

    pub fn on_add_click(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_add_click = Some(Box::new(f));
        self
    }

    pub fn columns(&self) -> &ColumnSet<R> {
        &self.columns
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    pub fn state(&self) -> &TableState {
        &self.state
    }

    pub fn selection(&self) -> &Selection {
        self.state.selection()
    }

    pub fn is_selected(&self, id: &RowId) -> bool {
        self.state.selection().is_selected(id)
    }

    /// Entries of the page-size control.
    pub fn page_size_choices(&self) -> &[PageSize] {
        &self.options.page_size_choices
    }

    /// Applies a transition.
    ///
    /// In controlled mode, selection requests are reported to the listener
    /// and only take effect once the caller syncs them back.
    pub fn dispatch(&mut self, action: TableAction) -> bool {
        if let TableAction::Selection(request) = action {
            return self.change_selection(request);
        }
        let selection_before = self.state.selection().len();
        let is_reset = matches!(action, TableAction::Reset);
        tracing::debug!(?action, "table transition");
        let changed = self.state.apply(action);
        if is_reset && selection_before > 0 {
            self.notify_selection();
        }
        changed
    }

    fn change_selection(&mut self, request: SelectionAction) -> bool {
        let silent = matches!(request, SelectionAction::Sync(_));
        tracing::debug!(?request, mode = ?self.options.selection_mode, "selection request");

        if silent || self.options.selection_mode == SelectionMode::Uncontrolled {
            let changed = self.state.apply(TableAction::Selection(request));
            if changed && !silent {
                self.notify_selection();
            }
            return changed;
        }

        let mut next = self.state.selection().clone();
        let changed = next.apply(request);
        if changed {
            if let Some(listener) = self.on_selection_change.as_mut() {
                listener(&next.ids());
            }
        }
        changed
    }

    fn notify_selection(&mut self) {
        if let Some(listener) = self.on_selection_change.as_mut() {
            listener(&self.state.selection().ids());
        }
    }

    // ========================================================================
    // Search, sort, pagination
    // ========================================================================

    pub fn set_search(&mut self, term: impl Into<String>) -> bool {
        self.dispatch(TableAction::SetSearch(term.into()))
    }

    pub fn set_sort(&mut self, sort: Option<SortConfig>) -> bool {
        self.dispatch(TableAction::SetSort(sort))
    }

    /// Header click on column `id`.
    ///
    /// Does nothing unless the column is sortable under the table's
    /// [`SortPolicy`](crate::SortPolicy).
    pub fn click_header(&mut self, id: &str) -> bool {
        let Some(key) = self.columns.sort_key_for(id, self.options.sort_policy) else {
            tracing::trace!(column = id, "header not sortable");
            return false;
        };
        let next = SortConfig::next(self.state.sort(), key);
        self.dispatch(TableAction::SetSort(Some(next)))
    }

    /// Switches the page size.
    ///
    /// Only entries of [`page_size_choices`](Self::page_size_choices) and the
    /// configured initial size are accepted; anything else is ignored.
    pub fn set_page_size(&mut self, size: PageSize) -> bool {
        if size != self.options.page_size && !self.options.page_size_choices.contains(&size) {
            tracing::warn!(%size, "ignoring page size outside the choices");
            return false;
        }
        self.dispatch(TableAction::SetPageSize(size))
    }

    /// Moves to `page`, clamped to the pages of the current result.
    pub fn go_to_page(&mut self, data: &[R], page: usize) -> bool {
        let pages = self.total_pages(data);
        self.dispatch(TableAction::GoToPage(clamp_page(page, pages)))
    }

    pub fn next_page(&mut self, data: &[R]) -> bool {
        let pages = self.total_pages(data);
        let current = clamp_page(self.state.page().current_page, pages);
        self.dispatch(TableAction::GoToPage(clamp_page(current + 1, pages)))
    }

    pub fn previous_page(&mut self, data: &[R]) -> bool {
        let pages = self.total_pages(data);
        let current = clamp_page(self.state.page().current_page, pages);
        self.dispatch(TableAction::GoToPage(clamp_page(current - 1, pages)))
    }

    fn total_pages(&self, data: &[R]) -> usize {
        total_pages(self.matching(data).len(), self.state.page().page_size)
    }

    // ========================================================================
    // Columns
    // ========================================================================

    /// Shows or hides a column. The last visible column stays visible.
    pub fn toggle_column(&mut self, id: &str) -> bool {
        self.dispatch(TableAction::ToggleColumn(id.to_string()))
    }

    pub fn show_all_columns(&mut self) -> bool {
        self.dispatch(TableAction::ShowAllColumns)
    }

    /// Replaces the column set and resets all table state.
    pub fn set_columns(&mut self, columns: Vec<Column<R>>) -> Result<()> {
        self.columns = ColumnSet::new(columns)?;
        let had_selection = !self.state.selection().is_empty();
        self.state = TableState::new(&self.columns, self.options.page_size);
        tracing::debug!(columns = self.columns.len(), "columns replaced, state reset");
        if had_selection {
            self.notify_selection();
        }
        Ok(())
    }

    /// Back to the initial state, e.g. when the caller switches to another
    /// dataset such as a different status tab.
    pub fn reset(&mut self) -> bool {
        self.dispatch(TableAction::Reset)
    }

    // ========================================================================
    // Selection
    // ========================================================================

    pub fn select(&mut self, id: RowId) -> bool {
        self.dispatch(TableAction::Selection(SelectionAction::Select(id)))
    }

    pub fn deselect(&mut self, id: RowId) -> bool {
        self.dispatch(TableAction::Selection(SelectionAction::Deselect(id)))
    }

    pub fn toggle_row(&mut self, id: RowId) -> bool {
        self.dispatch(TableAction::Selection(SelectionAction::Toggle(id)))
    }

    /// Selects every row matching the current search, across all pages.
    pub fn select_all_matching(&mut self, data: &[R]) -> bool {
        let ids = self.matching_ids(data);
        self.dispatch(TableAction::Selection(SelectionAction::SelectAll(ids)))
    }

    /// The header checkbox: select every matching row, or clear the
    /// selection if they are all selected already.
    pub fn toggle_all_matching(&mut self, data: &[R]) -> bool {
        let ids = self.matching_ids(data);
        self.dispatch(TableAction::Selection(SelectionAction::ToggleAll(ids)))
    }

    pub fn clear_selection(&mut self) -> bool {
        self.dispatch(TableAction::Selection(SelectionAction::Clear))
    }

    /// Commits a selection set owned by the caller.
    pub fn sync_selection(&mut self, ids: impl IntoIterator<Item = RowId>) -> bool {
        let ids = ids.into_iter().collect();
        self.dispatch(TableAction::Selection(SelectionAction::Sync(ids)))
    }

    // ========================================================================
    // Pass-through notifications
    // ========================================================================

    /// Highlights the row and forwards it to the row-click listener.
    pub fn click_row(&mut self, row: &R) {
        self.dispatch(TableAction::Highlight(Some(row.row_id())));
        if let Some(listener) = self.on_row_click.as_mut() {
            listener(row);
        }
    }

    pub fn click_add(&mut self) {
        if let Some(listener) = self.on_add_click.as_mut() {
            listener();
        }
    }

    // ========================================================================
    // Bulk actions
    // ========================================================================

    /// Renders the bulk bar for the current selection.
    pub fn bulk_bar(&self, ctx: &C) -> Option<BulkBarView> {
        self.bulk.render(self.state.selection().len(), ctx)
    }

    /// Runs the bulk action at `index` against the selection.
    ///
    /// The selection is cleared only when the action asks for it.
    pub fn run_bulk_action(&mut self, index: usize, ctx: &C) -> bool {
        let ids = self.state.selection().ids();
        match self.bulk.invoke(index, ctx, &ids) {
            Some(AfterAction::ClearSelection) => {
                self.clear_selection();
                true
            }
            Some(AfterAction::Keep) => true,
            None => false,
        }
    }

    // ========================================================================
    // Derivation
    // ========================================================================

    /// Rows matching the current search, in the current sort order.
    pub fn matching<'a>(&self, data: &'a [R]) -> Vec<&'a R> {
        let filtered = filter_rows(
            data.iter().collect(),
            self.state.search(),
            &self.options.search_fields,
        );
        sort_rows(filtered, self.state.sort())
    }

    /// Ids of every matching row, across all pages.
    pub fn matching_ids(&self, data: &[R]) -> Vec<RowId> {
        self.matching(data)
            .into_iter()
            .map(|row| row.row_id())
            .collect()
    }

    /// Derives the current view of `data`.
    ///
    /// A current page beyond the result is clamped to the last page.
    pub fn view<'a>(&'a self, data: &'a [R]) -> TableView<'a, R> {
        let matching = self.matching(data);
        let ids: Vec<RowId> = matching.iter().map(|row| row.row_id()).collect();
        let select_all = self.state.selection().select_all_state(&ids);

        let state = self.state.page();
        let pages = total_pages(matching.len(), state.page_size);
        let page_state = PageState {
            current_page: clamp_page(state.current_page, pages),
            page_size: state.page_size,
        };
        let page = paginate(matching, &page_state);
        tracing::debug!(
            total = data.len(),
            matching = page.total_rows,
            page = page.current_page,
            pages = page.total_pages,
            "table view derived"
        );

        let columns = self
            .columns
            .iter()
            .filter(|c| self.state.visibility().is_visible(c.id()))
            .collect();

        TableView {
            page,
            columns,
            select_all,
            selection: self.state.selection(),
            highlighted: self.state.highlighted(),
        }
    }
}

impl<R, C> fmt::Debug for DataTable<R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataTable")
            .field("columns", &self.columns)
            .field("options", &self.options)
            .field("state", &self.state)
            .field("bulk", &self.bulk)
            .finish()
    }
}

/// Pagination numbers for the footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMetrics {
    pub current_page: usize,
    pub total_pages: usize,
    /// Rows matching the search, across all pages.
    pub total_rows: usize,
    pub range: Option<PageRange>,
    pub has_previous: bool,
    pub has_next: bool,
}

/// One derived render of a table.
pub struct TableView<'a, R> {
    page: Page<&'a R>,
    columns: Vec<&'a Column<R>>,
    select_all: SelectAllState,
    selection: &'a Selection,
    highlighted: Option<&'a RowId>,
}

impl<'a, R: Row> TableView<'a, R> {
    /// Rows of the current page.
    pub fn rows(&self) -> &[&'a R] {
        &self.page.rows
    }

    /// Visible columns in declaration order.
    pub fn columns(&self) -> &[&'a Column<R>] {
        &self.columns
    }

    pub fn metrics(&self) -> PageMetrics {
        PageMetrics {
            current_page: self.page.current_page,
            total_pages: self.page.total_pages,
            total_rows: self.page.total_rows,
            range: self.page.range(),
            has_previous: self.page.has_previous(),
            has_next: self.page.has_next(),
        }
    }

    /// Page numbers for the navigation control.
    pub fn page_numbers(&self) -> std::ops::RangeInclusive<usize> {
        self.page.page_numbers()
    }

    /// `true` when no row matches, as opposed to loading or failing.
    pub fn is_empty(&self) -> bool {
        self.page.total_rows == 0
    }

    pub fn select_all_state(&self) -> SelectAllState {
        self.select_all
    }

    pub fn is_selected(&self, row: &R) -> bool {
        self.selection.is_selected(&row.row_id())
    }

    pub fn is_highlighted(&self, row: &R) -> bool {
        self.highlighted == Some(&row.row_id())
    }

    /// Cell texts of a row for the visible columns.
    pub fn cells(&self, row: &R) -> Vec<String> {
        self.columns.iter().map(|c| c.cell_text(row)).collect()
    }

    /// Plain-data copy of the view.
    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            headers: self.columns.iter().map(|c| c.header().to_string()).collect(),
            rows: self
                .page
                .rows
                .iter()
                .map(|row| RowSnapshot {
                    id: row.row_id(),
                    selected: self.is_selected(row),
                    highlighted: self.is_highlighted(row),
                    cells: self.cells(row),
                })
                .collect(),
            metrics: self.metrics(),
            select_all: self.select_all,
            empty: self.is_empty(),
        }
    }
}

/// Serializable form of a [`TableView`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewSnapshot {
    pub headers: Vec<String>,
    pub rows: Vec<RowSnapshot>,
    pub metrics: PageMetrics,
    pub select_all: SelectAllState,
    pub empty: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowSnapshot {
    pub id: RowId,
    pub selected: bool,
    pub highlighted: bool,
    pub cells: Vec<String>,
}
