//! FILENAME: core/view-store/tests/common/mod.rs
//! Test harness and fixtures for view store integration tests.

use chrono::{TimeZone, Utc};
use persistence::MemoryViewRepository;
use records::{ColumnCatalog, FieldValue, Page, Record};
use view_engine::{RenderedView, View};
use view_store::{ViewAction, ViewError, ViewStore};

/// A store with the built-in pages registered plus an in-memory repository.
pub struct TestHarness {
    pub store: ViewStore,
    pub repo: MemoryViewRepository,
}

impl TestHarness {
    pub fn new() -> Self {
        let mut store = ViewStore::new();
        for catalog in [ColumnCatalog::peers(), ColumnCatalog::closed_channels()] {
            let default_view = View::new("Default", catalog.columns.clone());
            store.register_page(catalog, default_view);
        }
        TestHarness {
            store,
            repo: MemoryViewRepository::new(),
        }
    }

    pub fn dispatch(&mut self, page: Page, action: ViewAction) -> Result<(), ViewError> {
        self.store.dispatch(page, action)
    }

    pub fn selected(&self, page: Page) -> &View {
        self.store
            .selected_view(page)
            .expect("page should have a selected view")
    }

    pub fn column_keys(&self, page: Page) -> Vec<String> {
        self.selected(page).columns.iter().map(|c| c.key.clone()).collect()
    }

    pub fn render<'a>(&self, page: Page, records: &'a [Record]) -> RenderedView<'a> {
        self.store.render(page, records).expect("render should succeed")
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// FIXTURES
// ============================================================================

/// Closed channels with a mix of statuses, capacities and close dates.
pub struct ClosedChannelsFixture;

impl ClosedChannelsFixture {
    pub fn data() -> Vec<(&'static str, f64, &'static str, i64)> {
        vec![
            ("ACINQ", 5_000_000.0, "Cooperative Closed", 3),
            ("WalletOfSatoshi", 2_000_000.0, "Local Force Closed", 1),
            ("Kraken", 10_000_000.0, "Cooperative Closed", 5),
            ("", 1_000_000.0, "Remote Force Closed", 2),
            ("Bitrefill", 3_000_000.0, "Cooperative Closed", 4),
        ]
    }

    pub fn records() -> Vec<Record> {
        Self::data()
            .into_iter()
            .enumerate()
            .map(|(i, (alias, capacity, status, day))| {
                Record::new(i as u64 + 1)
                    .with("peerAlias", alias)
                    .with("capacity", capacity)
                    .with("status", FieldValue::enum_tag(status))
                    .with("closedOn", Utc.with_ymd_and_hms(2023, 3, day as u32, 12, 0, 0).unwrap())
                    .with("closedOnSecondsDelta", FieldValue::Duration(day * 3_600))
            })
            .collect()
    }
}

/// Peers with connection status and reconnect setting.
pub struct PeersFixture;

impl PeersFixture {
    pub fn records() -> Vec<Record> {
        let rows = [
            ("bob", "NodeConnectionStatusConnected", "AlwaysReconnect"),
            ("alice", "NodeConnectionStatusDisconnected", "AlwaysReconnect"),
            ("carol", "NodeConnectionStatusConnected", "DisableReconnect"),
        ];
        rows.iter()
            .enumerate()
            .map(|(i, (alias, status, setting))| {
                Record::new(format!("02{:064x}", i).as_str())
                    .with("peerAlias", *alias)
                    .with("pubKey", format!("02{:064x}", i))
                    .with("connectionStatus", FieldValue::enum_tag(*status))
                    .with("setting", FieldValue::enum_tag(*setting))
            })
            .collect()
    }
}

// ============================================================================
// ASSERTION HELPERS
// ============================================================================

/// Assert that every locked catalog column is still shown by every view.
pub fn assert_locked_columns_present(harness: &TestHarness, page: Page) {
    let catalog = harness.store.catalog(page).expect("page registered");
    let response = harness.store.view_response(page).expect("page registered");
    for view in &response.views {
        for locked in catalog.locked_columns() {
            assert!(
                view.column_index(&locked.key).is_some(),
                "view '{}' lost locked column '{}'",
                view.title,
                locked.key
            );
        }
    }
}
