//! Tabula - In-memory table engine for list views.
//!
//! Tabula derives what a data table shows from a caller-owned dataset and a
//! small amount of view state. It supports:
//!
//! - Case-insensitive substring search over configurable fields
//! - Single-column sort with a header-click cycle and stable ordering
//! - Pagination with fixed page sizes or a single "all rows" page
//! - Cross-page row selection, controlled or owned by the table
//! - Column visibility with at least one column always shown
//! - Bulk actions over the selection with context-dependent visibility
//!
//! # Quick Start
//!
//! ```rust
//! use tabula::{Column, DataTable, Number, Row, RowId, TableOptions, Value};
//!
//! struct Customer {
//!     id: i64,
//!     company: String,
//!     revenue: f64,
//! }
//!
//! impl Row for Customer {
//!     fn row_id(&self) -> RowId {
//!         RowId::Int(self.id)
//!     }
//!
//!     fn field_value(&self, field: &str) -> Value<'_> {
//!         match field {
//!             "company" => Value::String(&self.company),
//!             "revenue" => Value::Number(Number::F64(self.revenue)),
//!             _ => Value::None,
//!         }
//!     }
//!
//!     fn field_names(&self) -> Vec<&str> {
//!         vec!["company", "revenue"]
//!     }
//! }
//!
//! let customers = vec![
//!     Customer { id: 1, company: "Acme GmbH".into(), revenue: 1200.0 },
//!     Customer { id: 2, company: "Globex".into(), revenue: 800.0 },
//!     Customer { id: 3, company: "Initech GmbH".into(), revenue: 4100.0 },
//! ];
//!
//! let mut table: DataTable<Customer> = DataTable::new(
//!     vec![
//!         Column::derived("select", |_| String::new()),
//!         Column::field("company").label("Company").sortable(),
//!         Column::field("revenue").sortable(),
//!         Column::derived("actions", |_| "...".into()),
//!     ],
//!     TableOptions::default(),
//! )
//! .unwrap();
//!
//! table.set_search("gmbh");
//! table.click_header("revenue");
//! table.click_header("revenue");
//!
//! let view = table.view(&customers);
//! let names: Vec<&str> = view.rows().iter().map(|c| c.company.as_str()).collect();
//! assert_eq!(names, vec!["Initech GmbH", "Acme GmbH"]);
//! assert_eq!(view.metrics().total_rows, 2);
//! ```
//!
//! # Pipeline
//!
//! Every view is recomputed from the full dataset:
//!
//! ```text
//! filtered = filter(data, search)
//! sorted   = sort(filtered, sort)
//! page     = paginate(sorted, page)
//! ```
//!
//! Changing the search term, the sort or the page size returns to page 1.
//! Selection is keyed by [`RowId`] and survives all three.

mod bulk;
mod column;
mod config;
mod error;
mod filter;
mod page;
mod row;
mod selection;
mod sort;
mod state;
mod table;
mod value;
mod visibility;

// Re-export public API
pub use bulk::{ActionButton, ActionStyle, AfterAction, BulkAction, BulkActionBar, BulkBarView};
pub use column::{Accessor, Align, Column, ColumnSet};
pub use config::TableOptions;
pub use error::{Result, TableError};
pub use filter::{filter_rows, row_matches};
pub use page::{
    clamp_page, paginate, total_pages, Page, PageRange, PageSize, PageState, DEFAULT_PAGE_SIZES,
};
pub use row::{Row, RowId};
pub use selection::{SelectAllState, Selection, SelectionAction, SelectionMode};
pub use sort::{compare_values, sort_rows, Dir, SortConfig, SortPolicy};
pub use state::{TableAction, TableState};
pub use table::{DataTable, PageMetrics, RowSnapshot, TableView, ViewSnapshot};
pub use value::{Number, Timestamp, Value};
pub use visibility::ColumnVisibility;
