//! Pagination stage.
//!
//! Slices an ordered result into pages. [`PageSize::All`] is a sentinel for
//! a single page holding every row; its effective size is never zero, so an
//! empty result still paginates without dividing by zero.

use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TableError;

const fn fixed(n: usize) -> PageSize {
    match NonZeroUsize::new(n) {
        Some(n) => PageSize::Rows(n),
        None => panic!("page size must be positive"),
    }
}

/// Page sizes offered by the page-size control, before the `All` entry.
pub const DEFAULT_PAGE_SIZES: [PageSize; 4] = [fixed(10), fixed(25), fixed(50), fixed(100)];

/// Number of rows per page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageSize {
    /// A fixed number of rows.
    Rows(NonZeroUsize),
    /// One page containing every row.
    All,
}

impl PageSize {
    /// Fixed page size, or `None` for zero.
    pub fn rows(n: usize) -> Option<PageSize> {
        NonZeroUsize::new(n).map(PageSize::Rows)
    }

    /// Rows per page for a result of `total_rows` rows.
    pub fn effective(self, total_rows: usize) -> usize {
        match self {
            PageSize::Rows(n) => n.get(),
            PageSize::All => total_rows.max(1),
        }
    }

    /// Default choices for a page-size control: the fixed sizes plus `All`.
    pub fn default_choices() -> Vec<PageSize> {
        DEFAULT_PAGE_SIZES
            .iter()
            .copied()
            .chain(std::iter::once(PageSize::All))
            .collect()
    }
}

impl Default for PageSize {
    fn default() -> Self {
        DEFAULT_PAGE_SIZES[0]
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageSize::Rows(n) => write!(f, "{n}"),
            PageSize::All => f.write_str("all"),
        }
    }
}

impl FromStr for PageSize {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(PageSize::All);
        }
        trimmed
            .parse::<usize>()
            .ok()
            .and_then(PageSize::rows)
            .ok_or_else(|| TableError::InvalidPageSize {
                input: s.to_string(),
            })
    }
}

impl Serialize for PageSize {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PageSize::Rows(n) => serializer.serialize_u64(n.get() as u64),
            PageSize::All => serializer.serialize_str("all"),
        }
    }
}

impl<'de> Deserialize<'de> for PageSize {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Count(u64),
            Text(String),
        }

        let parsed = match Raw::deserialize(deserializer)? {
            Raw::Count(n) => usize::try_from(n).ok().and_then(PageSize::rows),
            Raw::Text(s) => s.parse().ok(),
        };
        parsed.ok_or_else(|| serde::de::Error::custom("expected a positive integer or \"all\""))
    }
}

/// Current page (1-based) and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    pub current_page: usize,
    pub page_size: PageSize,
}

impl PageState {
    /// First page at the given size.
    pub fn new(page_size: PageSize) -> Self {
        PageState {
            current_page: 1,
            page_size,
        }
    }
}

impl Default for PageState {
    fn default() -> Self {
        PageState::new(PageSize::default())
    }
}

/// 1-based row numbers shown on a page, for "21-25 / 25" style labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRange {
    pub first: usize,
    pub last: usize,
}

/// One page of an ordered result.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub rows: Vec<T>,
    pub current_page: usize,
    pub total_pages: usize,
    pub effective_page_size: usize,
    pub total_rows: usize,
}

impl<T> Page<T> {
    /// Visible row numbers, or `None` when the page is empty.
    pub fn range(&self) -> Option<PageRange> {
        if self.rows.is_empty() {
            return None;
        }
        let first = (self.current_page - 1) * self.effective_page_size + 1;
        Some(PageRange {
            first,
            last: first + self.rows.len() - 1,
        })
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Page numbers for the navigation control.
    pub fn page_numbers(&self) -> std::ops::RangeInclusive<usize> {
        1..=self.total_pages.max(1)
    }
}

/// Clamps `page` to `[1, max(total_pages, 1)]`.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Number of pages needed for `total_rows` rows.
pub fn total_pages(total_rows: usize, page_size: PageSize) -> usize {
    total_rows.div_ceil(page_size.effective(total_rows))
}

/// Slices `rows` to the page described by `state`.
///
/// A page past the end yields an empty page; page 0 is read as page 1.
pub fn paginate<T>(rows: Vec<T>, state: &PageState) -> Page<T> {
    let total_rows = rows.len();
    let effective_page_size = state.page_size.effective(total_rows);
    let current_page = state.current_page.max(1);
    let start = (current_page - 1).saturating_mul(effective_page_size);
    let page_rows: Vec<T> = rows
        .into_iter()
        .skip(start)
        .take(effective_page_size)
        .collect();

    Page {
        rows: page_rows,
        current_page,
        total_pages: total_rows.div_ceil(effective_page_size),
        effective_page_size,
        total_rows,
    }
}
