//! FILENAME: core/view-store/tests/test_locked_columns.rs
//! PURPOSE: Locked columns survive every sequence of store actions.

mod common;

use common::{assert_locked_columns_present, TestHarness};
use proptest::prelude::*;
use records::Page;
use view_engine::View;
use view_store::{ViewAction, ViewError};

// ============================================================================
// DIRECT DELETION
// ============================================================================

#[test]
fn test_deleting_every_column_leaves_locked_ones() {
    for page in [Page::Peers, Page::ClosedChannels] {
        let mut harness = TestHarness::new();

        // keep deleting the first deletable column until none is left
        loop {
            let count = harness.selected(page).columns.len();
            let deleted = (0..count).any(|column_index| {
                harness
                    .dispatch(
                        page,
                        ViewAction::DeleteColumn {
                            view_index: 0,
                            column_index,
                        },
                    )
                    .is_ok()
            });
            if !deleted {
                break;
            }
        }

        assert_eq!(harness.column_keys(page), vec!["peerAlias".to_string()]);
        assert_locked_columns_present(&harness, page);
    }
}

#[test]
fn test_locked_column_rejected_after_reorder() {
    let mut harness = TestHarness::new();
    harness
        .dispatch(
            Page::Peers,
            ViewAction::UpdateColumnsOrder {
                view_index: 0,
                from_index: 0,
                to_index: 3,
            },
        )
        .unwrap();
    assert_eq!(harness.column_keys(Page::Peers)[3], "peerAlias");

    let result = harness.dispatch(
        Page::Peers,
        ViewAction::DeleteColumn {
            view_index: 0,
            column_index: 3,
        },
    );
    assert!(matches!(result, Err(ViewError::LockedColumn { .. })));
}

#[test]
fn test_added_and_loaded_views_get_locked_columns() {
    let mut harness = TestHarness::new();
    harness
        .dispatch(
            Page::Peers,
            ViewAction::AddView {
                view: View::new("Empty", vec![]),
            },
        )
        .unwrap();
    assert_eq!(harness.column_keys(Page::Peers), vec!["peerAlias".to_string()]);

    let mut loaded = harness.store.view_response(Page::Peers).unwrap().clone();
    loaded.views[0].columns.clear();
    let ticket = harness.store.begin_load(Page::Peers).unwrap();
    harness.store.complete_load(ticket, Ok(Some(loaded))).unwrap();

    assert_locked_columns_present(&harness, Page::Peers);
}

// ============================================================================
// ACTION SEQUENCES
// ============================================================================

fn page_strategy() -> impl Strategy<Value = Page> {
    prop_oneof![Just(Page::Peers), Just(Page::ClosedChannels)]
}

fn action_strategy() -> impl Strategy<Value = ViewAction> {
    let view_index = 0usize..8;
    let column_index = 0usize..20;
    prop_oneof![
        2 => (view_index.clone(), column_index.clone()).prop_map(|(view_index, column_index)| {
            ViewAction::DeleteColumn {
                view_index,
                column_index,
            }
        }),
        1 => (view_index.clone(), column_index.clone(), column_index).prop_map(
            |(view_index, from_index, to_index)| ViewAction::UpdateColumnsOrder {
                view_index,
                from_index,
                to_index,
            }
        ),
        1 => "[A-Za-z ]{0,12}".prop_map(|title| ViewAction::AddView {
            view: View::new(title, vec![]),
        }),
        1 => view_index.clone().prop_map(|view_index| ViewAction::DeleteView { view_index }),
        1 => view_index.prop_map(|view_index| ViewAction::SelectView { view_index }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        rng_seed: proptest::test_runner::RngSeed::Fixed(0),
        failure_persistence: None,
        ..ProptestConfig::default()
    })]

    #[test]
    fn test_locked_columns_survive_action_sequences(
        steps in prop::collection::vec((page_strategy(), action_strategy()), 1..40)
    ) {
        let mut harness = TestHarness::new();

        for (page, action) in steps {
            // rejected actions are fine, state must still hold
            let _ = harness.dispatch(page, action);

            assert_locked_columns_present(&harness, page);
            let response = harness.store.view_response(page).unwrap();
            prop_assert!(!response.views.is_empty());
            prop_assert!(response.selected_view_index < response.views.len());
        }
    }
}
