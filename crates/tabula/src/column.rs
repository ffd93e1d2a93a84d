//! Column descriptors.
//!
//! A [`Column`] says how to read a cell out of a row and whether the column
//! can drive sorting. Accessors are either a plain field name or a derived
//! closure; derived closures are only used for rendering; sort falls back
//! to the column's sort key.

use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::error::{Result, TableError};
use crate::row::Row;
use crate::sort::SortPolicy;

/// How a column reads its cell value.
pub enum Accessor<R> {
    /// Read the named field through [`Row::field_value`].
    Field(String),
    /// Compute the cell text from the whole row.
    Derived(Arc<dyn Fn(&R) -> String>),
}

impl<R> Clone for Accessor<R> {
    fn clone(&self) -> Self {
        match self {
            Accessor::Field(name) => Accessor::Field(name.clone()),
            Accessor::Derived(f) => Accessor::Derived(Arc::clone(f)),
        }
    }
}

impl<R> fmt::Debug for Accessor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accessor::Field(name) => f.debug_tuple("Field").field(name).finish(),
            Accessor::Derived(_) => f.write_str("Derived(..)"),
        }
    }
}

/// Horizontal alignment hint for renderers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// A column descriptor.
///
/// # Example
///
/// ```
/// use tabula::{Align, Column};
/// # use tabula::{Row, RowId, Value};
/// # struct Invoice { id: i64, paid: bool }
/// # impl Row for Invoice {
/// #     fn row_id(&self) -> RowId { RowId::Int(self.id) }
/// #     fn field_value(&self, _: &str) -> Value<'_> { Value::None }
/// #     fn field_names(&self) -> Vec<&str> { vec![] }
/// # }
///
/// let number = Column::<Invoice>::field("number").label("Nr.").sortable();
/// let status = Column::<Invoice>::derived("status", |i| {
///     if i.paid { "Paid".into() } else { "Open".into() }
/// })
/// .sort_key("paid")
/// .sortable();
///
/// assert_eq!(number.resolved_sort_key(), "number");
/// assert_eq!(status.resolved_sort_key(), "paid");
/// ```
pub struct Column<R> {
    id: String,
    label: Option<String>,
    accessor: Accessor<R>,
    sortable: bool,
    sort_key: Option<String>,
    visible_by_default: bool,
    align: Align,
}

impl<R> Column<R> {
    /// Creates a column reading the field of the same name.
    pub fn field(name: impl Into<String>) -> Self {
        let name = name.into();
        Column::with_accessor(name.clone(), Accessor::Field(name))
    }

    /// Creates a column whose cell text is computed from the row.
    pub fn derived(id: impl Into<String>, f: impl Fn(&R) -> String + 'static) -> Self {
        Column::with_accessor(id, Accessor::Derived(Arc::new(f)))
    }

    /// Creates a column with an explicit id and accessor.
    pub fn with_accessor(id: impl Into<String>, accessor: Accessor<R>) -> Self {
        Column {
            id: id.into(),
            label: None,
            accessor,
            sortable: false,
            sort_key: None,
            visible_by_default: true,
            align: Align::Left,
        }
    }

    /// Sets the header label.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Declares the column sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Sets the declared sortability.
    pub fn set_sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Sets the field used for sorting this column.
    pub fn sort_key(mut self, key: impl Into<String>) -> Self {
        self.sort_key = Some(key.into());
        self
    }

    /// Hides the column until the user turns it on.
    pub fn hidden(mut self) -> Self {
        self.visible_by_default = false;
        self
    }

    /// Sets the alignment hint.
    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Header label, defaulting to the id.
    pub fn header(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }

    pub fn accessor(&self) -> &Accessor<R> {
        &self.accessor
    }

    /// Whether the descriptor itself declares the column sortable.
    pub fn is_declared_sortable(&self) -> bool {
        self.sortable
    }

    pub fn is_visible_by_default(&self) -> bool {
        self.visible_by_default
    }

    pub fn alignment(&self) -> Align {
        self.align
    }

    /// The field this column sorts by.
    ///
    /// Explicit sort key first, then the accessor's field name, then the
    /// column id for derived accessors.
    pub fn resolved_sort_key(&self) -> &str {
        if let Some(key) = &self.sort_key {
            return key;
        }
        match &self.accessor {
            Accessor::Field(name) => name,
            Accessor::Derived(_) => &self.id,
        }
    }
}

impl<R: Row> Column<R> {
    /// Renders the cell text for a row.
    ///
    /// Absent field values render as an empty string.
    pub fn cell_text(&self, row: &R) -> String {
        match &self.accessor {
            Accessor::Derived(f) => f(row),
            Accessor::Field(name) => row
                .search_text(name)
                .map(Cow::into_owned)
                .unwrap_or_default(),
        }
    }
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Column {
            id: self.id.clone(),
            label: self.label.clone(),
            accessor: self.accessor.clone(),
            sortable: self.sortable,
            sort_key: self.sort_key.clone(),
            visible_by_default: self.visible_by_default,
            align: self.align,
        }
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("accessor", &self.accessor)
            .field("sortable", &self.sortable)
            .field("sort_key", &self.sort_key)
            .field("visible_by_default", &self.visible_by_default)
            .finish()
    }
}

/// A validated, ordered list of columns with unique ids.
pub struct ColumnSet<R> {
    columns: Vec<Column<R>>,
}

impl<R> ColumnSet<R> {
    /// Validates and wraps a list of column descriptors.
    pub fn new(columns: Vec<Column<R>>) -> Result<Self> {
        if columns.is_empty() {
            return Err(TableError::EmptyColumns);
        }
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.id()) {
                return Err(TableError::DuplicateColumn {
                    id: column.id().to_string(),
                });
            }
        }
        Ok(ColumnSet { columns })
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Column<R>> {
        self.columns.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Column<R>> {
        self.columns.iter().find(|c| c.id() == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.id() == id)
    }

    /// Column ids in declaration order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(Column::id)
    }

    /// Returns the sort key a header click on `id` would sort by, or `None`
    /// if the column is not effectively sortable under `policy`.
    pub fn sort_key_for(&self, id: &str, policy: SortPolicy) -> Option<&str> {
        let index = self.position(id)?;
        let column = &self.columns[index];
        if !column.is_declared_sortable() || policy.locks(index, self.columns.len()) {
            return None;
        }
        Some(column.resolved_sort_key())
    }
}

impl<R> Clone for ColumnSet<R> {
    fn clone(&self) -> Self {
        ColumnSet {
            columns: self.columns.clone(),
        }
    }
}

impl<R> fmt::Debug for ColumnSet<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.columns).finish()
    }
}
