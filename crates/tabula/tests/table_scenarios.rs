//! End-to-end scenarios over JSON rows, the way a list view drives the table.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::{json, Map, Value as Json};
use tabula::{
    ActionStyle, AfterAction, BulkAction, Column, ColumnVisibility, DataTable, PageRange,
    PageSize, RowId, SelectAllState, SelectionMode, SortConfig, SortPolicy, TableError,
    TableOptions,
};

type Record = Map<String, Json>;

// ============================================================================
// Test helpers
// ============================================================================

fn record(value: Json) -> Record {
    match value {
        Json::Object(map) => map,
        other => panic!("not an object: {other}"),
    }
}

/// Every fourth customer is a GmbH.
fn customers(n: i64) -> Vec<Record> {
    (1..=n)
        .map(|id| {
            let company = if id % 4 == 0 {
                format!("Muster GmbH {id}")
            } else {
                format!("Beispiel AG {id}")
            };
            record(json!({
                "id": id,
                "company": company,
                "status": if id % 2 == 0 { "active" } else { "lead" },
                "revenue": id * 100,
            }))
        })
        .collect()
}

fn columns() -> Vec<Column<Record>> {
    vec![
        Column::derived("select", |_| String::new()).sortable(),
        Column::field("company").label("Company").sortable(),
        Column::field("status"),
        Column::field("revenue").sortable(),
        Column::derived("actions", |_| "Edit".into()).sortable(),
    ]
}

fn table(options: TableOptions) -> DataTable<Record> {
    DataTable::new(columns(), options).unwrap()
}

fn ids(rows: &[&Record]) -> Vec<i64> {
    rows.iter()
        .map(|row| row["id"].as_i64().unwrap())
        .collect()
}

// ============================================================================
// Pagination
// ============================================================================

#[test]
fn twenty_five_rows_in_pages_of_ten() {
    let data = customers(25);
    let mut table = table(TableOptions::default());

    let view = table.view(&data);
    assert_eq!(ids(view.rows()), (1..=10).collect::<Vec<_>>());
    assert_eq!(view.metrics().total_pages, 3);
    assert_eq!(view.metrics().range, Some(PageRange { first: 1, last: 10 }));
    assert!(!view.metrics().has_previous);

    table.go_to_page(&data, 3);
    let view = table.view(&data);
    assert_eq!(ids(view.rows()), (21..=25).collect::<Vec<_>>());
    assert_eq!(view.metrics().range, Some(PageRange { first: 21, last: 25 }));
    assert!(!view.metrics().has_next);
    assert_eq!(view.page_numbers(), 1..=3);
}

#[test]
fn all_sentinel_shows_every_row() {
    let data = customers(37);
    let mut table = table(TableOptions::default());
    table.set_page_size(PageSize::All);

    let view = table.view(&data);
    assert_eq!(view.metrics().total_pages, 1);
    assert_eq!(view.rows().len(), 37);
}

#[test]
fn all_sentinel_on_no_rows() {
    let data: Vec<Record> = Vec::new();
    let table = table(TableOptions::new().page_size(PageSize::All));

    let view = table.view(&data);
    assert_eq!(view.metrics().total_pages, 0);
    assert_eq!(view.metrics().current_page, 1);
    assert!(view.is_empty());
    assert!(view.rows().is_empty());
}

#[test]
fn filter_shrinking_result_clamps_page() {
    let data = customers(100);
    let mut table = table(TableOptions::default());
    table.go_to_page(&data, 10);
    assert_eq!(table.view(&data).metrics().current_page, 10);

    let view = table.view(&data[..15]);
    assert_eq!(view.metrics().current_page, 2);
    assert_eq!(ids(view.rows()), (11..=15).collect::<Vec<_>>());
}

// ============================================================================
// Search and sort
// ============================================================================

#[test]
fn search_covers_numbers_and_ignores_case() {
    let data = customers(30);
    let mut table = table(TableOptions::new().search_fields(["company", "revenue"]));

    table.set_search("MUSTER");
    assert_eq!(table.view(&data).metrics().total_rows, 7);

    table.set_search("2500");
    assert_eq!(ids(table.view(&data).rows()), vec![25]);

    table.set_search("active");
    assert!(table.view(&data).is_empty());
}

#[test]
fn header_clicks_cycle_direction() {
    let data = customers(5);
    let mut table = table(TableOptions::default());

    table.click_header("revenue");
    assert_eq!(table.state().sort(), Some(&SortConfig::asc("revenue")));
    table.click_header("revenue");
    assert_eq!(ids(table.view(&data).rows()), vec![5, 4, 3, 2, 1]);

    table.click_header("company");
    assert_eq!(table.state().sort(), Some(&SortConfig::asc("company")));
}

#[test]
fn edge_columns_do_not_sort_by_default() {
    let data = customers(5);
    let mut table = table(TableOptions::default());

    assert!(!table.click_header("select"));
    assert!(!table.click_header("actions"));
    assert!(!table.click_header("status"));
    assert_eq!(table.state().sort(), None);
    assert_eq!(ids(table.view(&data).rows()), vec![1, 2, 3, 4, 5]);
}

#[test]
fn lock_can_be_lifted_per_side() {
    let policy = SortPolicy {
        lock_first: true,
        lock_last: false,
    };
    let mut table = table(TableOptions::new().sort_policy(policy));
    assert!(!table.click_header("select"));
    assert!(table.click_header("actions"));
    assert_eq!(table.state().sort(), Some(&SortConfig::asc("actions")));
}

#[test]
fn nulls_first_ascending_last_descending() {
    let data = vec![
        record(json!({ "id": 1, "a": "B" })),
        record(json!({ "id": 2, "a": null })),
        record(json!({ "id": 3, "a": "A" })),
    ];
    let mut table: DataTable<Record> = DataTable::new(
        vec![Column::field("id"), Column::field("a").sortable(), Column::field("z")],
        TableOptions::default(),
    )
    .unwrap();

    table.click_header("a");
    assert_eq!(ids(table.view(&data).rows()), vec![2, 3, 1]);
    table.click_header("a");
    assert_eq!(ids(table.view(&data).rows()), vec![1, 3, 2]);
}

#[test]
fn large_ids_and_float_amounts_sort_exactly() {
    let data = vec![
        record(json!({ "id": 1, "amount": 9_007_199_254_740_993_i64 })),
        record(json!({ "id": 2, "amount": 9_007_199_254_740_992.0 })),
        record(json!({ "id": 3, "amount": 9_007_199_254_740_992_i64 })),
        record(json!({ "id": 4, "amount": 0.5 })),
    ];
    let mut table: DataTable<Record> = DataTable::new(
        vec![Column::field("id"), Column::field("amount").sortable(), Column::field("z")],
        TableOptions::default(),
    )
    .unwrap();

    table.click_header("amount");
    assert_eq!(ids(table.view(&data).rows()), vec![4, 2, 3, 1]);
}

#[test]
fn tag_lists_are_searchable_and_rendered() {
    let data = vec![
        record(json!({ "id": 1, "title": "Relaunch", "tags": ["urgent", "web"] })),
        record(json!({ "id": 2, "title": "Logo", "tags": [] })),
    ];
    let mut table: DataTable<Record> = DataTable::new(
        vec![Column::field("title"), Column::field("tags")],
        TableOptions::default(),
    )
    .unwrap();

    table.set_search("urgent");
    let view = table.view(&data);
    assert_eq!(ids(view.rows()), vec![1]);
    assert_eq!(view.cells(view.rows()[0]), vec!["Relaunch", "urgent,web"]);
}

// ============================================================================
// Selection
// ============================================================================

#[test]
fn select_all_matching_spans_pages() {
    let data = customers(100);
    let mut table = table(TableOptions::default());

    table.set_search("gmbh");
    table.select_all_matching(&data);
    assert_eq!(table.selection().len(), 25);

    for page in 1..=3 {
        table.go_to_page(&data, page);
        let view = table.view(&data);
        assert_eq!(view.select_all_state(), SelectAllState::All);
        assert!(view.rows().iter().all(|row| view.is_selected(row)));
    }
    assert_eq!(table.selection().len(), 25);

    table.set_search("");
    assert_eq!(table.view(&data).select_all_state(), SelectAllState::Partial);
    assert_eq!(table.selection().len(), 25);
}

#[test]
fn header_checkbox_toggles() {
    let data = customers(12);
    let mut table = table(TableOptions::default());

    table.toggle_row(RowId::Int(3));
    assert_eq!(table.view(&data).select_all_state(), SelectAllState::Partial);

    table.toggle_all_matching(&data);
    assert_eq!(table.selection().len(), 12);

    table.toggle_all_matching(&data);
    assert!(table.selection().is_empty());
}

#[test]
fn controlled_selection_round_trip() {
    let data = customers(20);
    let owner: Rc<RefCell<Vec<RowId>>> = Rc::default();
    let sink = Rc::clone(&owner);
    let mut table = table(TableOptions::new().selection_mode(SelectionMode::Controlled))
        .on_selection_change(move |ids| *sink.borrow_mut() = ids.to_vec());

    table.select_all_matching(&data);
    assert!(table.selection().is_empty());
    assert_eq!(owner.borrow().len(), 20);

    let pushed = owner.borrow().clone();
    table.sync_selection(pushed);
    assert_eq!(table.selection().len(), 20);

    table.deselect(RowId::Int(1));
    assert_eq!(owner.borrow().len(), 19);
    assert_eq!(table.selection().len(), 20);
}

// ============================================================================
// Columns
// ============================================================================

#[test]
fn last_visible_column_stays() {
    let data = customers(1);
    let mut table = table(TableOptions::default());
    for id in ["select", "company", "status", "revenue", "actions"] {
        table.toggle_column(id);
    }
    let visibility: &ColumnVisibility = table.state().visibility();
    assert_eq!(visibility.visible_ids(), vec!["actions"]);

    let view = table.view(&data);
    assert_eq!(view.columns().len(), 1);
    assert_eq!(view.columns()[0].id(), "actions");

    table.show_all_columns();
    assert_eq!(table.view(&data).columns().len(), 5);
}

#[test]
fn invalid_column_sets_are_rejected() {
    assert!(matches!(
        DataTable::<Record>::new(Vec::new(), TableOptions::default()),
        Err(TableError::EmptyColumns)
    ));

    let mut table = table(TableOptions::default());
    assert!(matches!(
        table.set_columns(vec![Column::field("a"), Column::field("a")]),
        Err(TableError::DuplicateColumn { .. })
    ));
    assert_eq!(table.columns().len(), 5);
}

// ============================================================================
// Bulk actions and tabs
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
enum Tab {
    Active,
    Trash,
}

#[test]
fn bulk_actions_follow_the_active_tab() {
    let data = customers(30);
    let deleted: Rc<RefCell<Vec<RowId>>> = Rc::default();
    let sink = Rc::clone(&deleted);

    let mut table: DataTable<Record, Tab> = DataTable::new(columns(), TableOptions::default())
        .unwrap()
        .with_bulk_action(BulkAction::new("Export", |_| AfterAction::Keep))
        .with_bulk_action(
            BulkAction::new("Delete", move |ids: &[RowId]| {
                sink.borrow_mut().extend_from_slice(ids);
                AfterAction::ClearSelection
            })
            .style(ActionStyle::Danger)
            .visible_when(|tab: &Tab| *tab == Tab::Active),
        )
        .with_bulk_action(
            BulkAction::new("Restore", |_| AfterAction::Keep)
                .style(ActionStyle::Success)
                .visible_when(|tab: &Tab| *tab == Tab::Trash),
        );

    assert_eq!(table.bulk_bar(&Tab::Active), None);

    table.set_search("gmbh");
    table.select_all_matching(&data);

    let bar = table.bulk_bar(&Tab::Active).unwrap();
    assert_eq!(bar.selected_count, 7);
    let labels: Vec<&str> = bar.actions.iter().map(|a| a.label.as_str()).collect();
    assert_eq!(labels, vec!["Export", "Delete"]);

    let bar = table.bulk_bar(&Tab::Trash).unwrap();
    let labels: Vec<&str> = bar.actions.iter().map(|a| a.label.as_str()).collect();
    assert_eq!(labels, vec!["Export", "Restore"]);

    // export leaves the selection alone
    assert!(table.run_bulk_action(0, &Tab::Active));
    assert_eq!(table.selection().len(), 7);

    // delete is hidden on the trash tab
    assert!(!table.run_bulk_action(1, &Tab::Trash));
    assert!(deleted.borrow().is_empty());

    assert!(table.run_bulk_action(1, &Tab::Active));
    assert_eq!(deleted.borrow().len(), 7);
    assert!(table.selection().is_empty());
    assert_eq!(table.bulk_bar(&Tab::Active), None);
}

#[test]
fn switching_tabs_resets_the_view() {
    let data = customers(40);
    let mut table = table(TableOptions::default());
    table.set_search("ag");
    table.click_header("revenue");
    table.go_to_page(&data, 2);
    table.toggle_column("status");
    table.select(RowId::Int(5));

    assert!(table.reset());
    let view = table.view(&data);
    assert_eq!(table.state().search(), "");
    assert_eq!(table.state().sort(), None);
    assert_eq!(view.metrics().current_page, 1);
    assert_eq!(view.columns().len(), 5);
    assert!(table.selection().is_empty());
}

#[test]
fn options_from_json() {
    let options = TableOptions::from_json(
        r#"{ "page_size": "all", "search_fields": ["company"], "selection_mode": "controlled" }"#,
    )
    .unwrap();
    let data = customers(37);
    let table = table(options);
    assert_eq!(table.view(&data).metrics().total_pages, 1);
    assert_eq!(table.page_size_choices().len(), 5);
}
