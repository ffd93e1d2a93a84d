//! Search stage.
//!
//! A row matches a search term when any candidate field, case-folded,
//! contains the case-folded term. Result order is the input order.

use crate::row::Row;

/// Narrows `rows` to those matching `term`.
///
/// An empty term hands the input back untouched. `fields` lists the fields to
/// search; when empty, every field the row reports through
/// [`Row::field_names`] is searched.
pub fn filter_rows<'a, R: Row>(rows: Vec<&'a R>, term: &str, fields: &[String]) -> Vec<&'a R> {
    if term.is_empty() {
        return rows;
    }
    let needle = term.to_lowercase();
    let before = rows.len();
    let matched: Vec<&'a R> = rows
        .into_iter()
        .filter(|row| matches_folded(*row, &needle, fields))
        .collect();
    tracing::trace!(term, before, after = matched.len(), "search applied");
    matched
}

/// Tests a single row against a search term.
pub fn row_matches<R: Row>(row: &R, term: &str, fields: &[String]) -> bool {
    term.is_empty() || matches_folded(row, &term.to_lowercase(), fields)
}

fn matches_folded<R: Row>(row: &R, needle: &str, fields: &[String]) -> bool {
    let field_contains = |field: &str| {
        row.search_text(field)
            .is_some_and(|text| text.to_lowercase().contains(needle))
    };
    if fields.is_empty() {
        row.field_names().into_iter().any(field_contains)
    } else {
        fields.iter().any(|field| field_contains(field))
    }
}
