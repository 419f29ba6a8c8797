//! FILENAME: core/view-store/tests/test_rendering.rs
//! PURPOSE: Rendering the selected view of a page through the store.

mod common;

use common::{ClosedChannelsFixture, PeersFixture, TestHarness};
use records::{ColumnCatalog, FieldValue, Page};
use view_engine::{
    Condition, ConfigIssue, EnumCondition, FilterTree, GroupBy, RenderOptions, RenderedView,
    SortClause, SubtotalLocation, TextCondition, TextOperator, View,
};
use view_store::{ViewAction, ViewStore};

fn aliases(rendered: &RenderedView<'_>) -> Vec<String> {
    rendered
        .rows
        .iter()
        .filter_map(|r| r.as_record())
        .map(|r| r.value("peerAlias").display_value())
        .collect()
}

// ============================================================================
// FILTER AND SORT
// ============================================================================

#[test]
fn test_filter_and_sort_closed_channels() {
    let mut harness = TestHarness::new();
    let records = ClosedChannelsFixture::records();

    harness
        .dispatch(
            Page::ClosedChannels,
            ViewAction::UpdateFilters {
                view_index: 0,
                filters: FilterTree::clause(
                    "status",
                    Condition::Enum(EnumCondition::In(vec!["Cooperative Closed".into()])),
                ),
            },
        )
        .unwrap();
    harness
        .dispatch(
            Page::ClosedChannels,
            ViewAction::UpdateSort {
                view_index: 0,
                sort_by: vec![SortClause::descending("capacity")],
            },
        )
        .unwrap();

    let rendered = harness.render(Page::ClosedChannels, &records);
    assert_eq!(aliases(&rendered), vec!["Kraken", "ACINQ", "Bitrefill"]);
    assert!(rendered.warning.is_none());
}

#[test]
fn test_text_filter_is_case_insensitive() {
    let mut harness = TestHarness::new();
    let records = PeersFixture::records();

    harness
        .dispatch(
            Page::Peers,
            ViewAction::UpdateFilters {
                view_index: 0,
                filters: FilterTree::clause(
                    "peerAlias",
                    Condition::Text(TextCondition {
                        operator: TextOperator::BeginsWith,
                        value: "CA".into(),
                    }),
                ),
            },
        )
        .unwrap();

    assert_eq!(aliases(&harness.render(Page::Peers, &records)), vec!["carol"]);
}

#[test]
fn test_unsortable_column_is_reported_and_skipped() {
    let mut harness = TestHarness::new();
    let records = PeersFixture::records();

    harness
        .dispatch(
            Page::Peers,
            ViewAction::UpdateSort {
                view_index: 0,
                sort_by: vec![SortClause::descending("pubKey"), SortClause::ascending("peerAlias")],
            },
        )
        .unwrap();

    let rendered = harness.render(Page::Peers, &records);
    assert_eq!(aliases(&rendered), vec!["alice", "bob", "carol"]);
    assert_eq!(
        rendered.warning.map(|w| w.issues),
        Some(vec![ConfigIssue::NotSortable {
            column_key: "pubKey".into()
        }])
    );
}

// ============================================================================
// GROUPING
// ============================================================================

#[test]
fn test_group_by_status_totals_capacity() {
    let mut harness = TestHarness::new();
    let records = ClosedChannelsFixture::records();

    harness
        .dispatch(
            Page::ClosedChannels,
            ViewAction::UpdateGroupBy {
                view_index: 0,
                group_by: Some(GroupBy::new("status")),
            },
        )
        .unwrap();

    let rendered = harness.render(Page::ClosedChannels, &records);
    let totals: Vec<(String, usize, FieldValue)> = rendered
        .rows
        .iter()
        .filter_map(|r| r.as_summary())
        .map(|s| (s.label.clone(), s.member_count, s.value("capacity").clone()))
        .collect();

    assert_eq!(
        totals,
        vec![
            ("Cooperative Closed".to_string(), 3, FieldValue::Number(18_000_000.0)),
            ("Local Force Closed".to_string(), 1, FieldValue::Number(2_000_000.0)),
            ("Remote Force Closed".to_string(), 1, FieldValue::Number(1_000_000.0)),
        ]
    );
    assert_eq!(rendered.record_count(), 5);
    assert!(rendered.rows[0].is_summary());
}

#[test]
fn test_group_by_blank_alias_at_bottom() {
    let mut store = ViewStore::new().with_options(RenderOptions {
        blank_label: "(no alias)".into(),
        subtotal_location: SubtotalLocation::AtBottom,
    });
    let catalog = ColumnCatalog::closed_channels();
    let view = View::new("Default", catalog.columns.clone());
    store.register_page(catalog, view);
    store
        .dispatch(
            Page::ClosedChannels,
            ViewAction::UpdateGroupBy {
                view_index: 0,
                group_by: Some(GroupBy::new("peerAlias")),
            },
        )
        .unwrap();

    let records = ClosedChannelsFixture::records();
    let rendered = store.render(Page::ClosedChannels, &records).unwrap();

    assert_eq!(rendered.group_count(), 5);
    assert!(!rendered.rows[0].is_summary());
    let labels: Vec<&str> = rendered
        .rows
        .iter()
        .filter_map(|r| r.as_summary())
        .map(|s| s.label.as_str())
        .collect();
    assert_eq!(labels[3], "(no alias)");
}

#[test]
fn test_display_rows_follow_column_order() {
    let mut harness = TestHarness::new();
    let records = PeersFixture::records();

    // move connection status to the front
    let last = harness.selected(Page::Peers).columns.len() - 1;
    harness
        .dispatch(
            Page::Peers,
            ViewAction::UpdateColumnsOrder {
                view_index: 0,
                from_index: last,
                to_index: 0,
            },
        )
        .unwrap();

    let columns = harness.selected(Page::Peers).columns.clone();
    let rendered = harness.render(Page::Peers, &records);
    let display = rendered.display_rows(&columns);

    assert_eq!(display[0][0], "Connected");
    assert_eq!(display[0][1], "bob");
    assert_eq!(display[1][0], "Disconnected");
}
