//! FILENAME: core/records/src/catalog.rs
//! PURPOSE: Page-specific column catalogs.
//! CONTEXT: Every table page has a static, ordered list of the columns it can
//! show, plus the subsets that may be sorted and filtered on. Views pick and
//! reorder columns out of this catalog. The built-in catalogs mirror the
//! generated column definitions of the dashboard.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::column::{find_column, CellType, ColumnMetaData, SelectOption};
use crate::value::ValueType;

/// The table page a view belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Page {
    Channels,
    ClosedChannels,
    Peers,
    Payments,
    Invoices,
    OnChain,
    Forwards,
    Workflows,
}

impl Page {
    /// Stable name used for storage keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Page::Channels => "channels",
            Page::ClosedChannels => "closedChannels",
            Page::Peers => "peers",
            Page::Payments => "payments",
            Page::Invoices => "invoices",
            Page::OnChain => "onChain",
            Page::Forwards => "forwards",
            Page::Workflows => "workflows",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// All columns a page can show, in catalog order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnCatalog {
    pub page: Page,
    pub columns: Vec<ColumnMetaData>,
    pub sortable: Vec<String>,
    pub filterable: Vec<String>,
}

impl ColumnCatalog {
    /// Creates a catalog where every column is sortable and filterable.
    pub fn new(page: Page, columns: Vec<ColumnMetaData>) -> Self {
        let keys: Vec<String> = columns.iter().map(|c| c.key.clone()).collect();
        ColumnCatalog {
            page,
            columns,
            sortable: keys.clone(),
            filterable: keys,
        }
    }

    pub fn with_sortable(mut self, keys: &[&str]) -> Self {
        self.sortable = keys.iter().map(|k| k.to_string()).collect();
        self
    }

    pub fn with_filterable(mut self, keys: &[&str]) -> Self {
        self.filterable = keys.iter().map(|k| k.to_string()).collect();
        self
    }

    pub fn column(&self, key: &str) -> Option<&ColumnMetaData> {
        find_column(&self.columns, key)
    }

    /// Locked columns in catalog order.
    pub fn locked_columns(&self) -> impl Iterator<Item = &ColumnMetaData> {
        self.columns.iter().filter(|c| c.locked)
    }

    pub fn is_sortable(&self, key: &str) -> bool {
        self.sortable.iter().any(|k| k == key)
    }

    pub fn is_filterable(&self, key: &str) -> bool {
        self.filterable.iter().any(|k| k == key)
    }

    // ========================================================================
    // BUILT-IN CATALOGS
    // ========================================================================

    pub fn peers() -> Self {
        let columns = vec![
            ColumnMetaData::new("peerAlias", "Peer Alias", CellType::AliasCell, ValueType::String)
                .locked(),
            ColumnMetaData::new("pubKey", "Public key", CellType::LongTextCell, ValueType::String),
            ColumnMetaData::new("torqNodeAlias", "Torq Alias", CellType::AliasCell, ValueType::String),
            ColumnMetaData::new("setting", "Reconnect", CellType::TextCell, ValueType::Enum)
                .with_options(vec![
                    SelectOption::new("Always Reconnect", "AlwaysReconnect"),
                    SelectOption::new("Disable Reconnect", "DisableReconnect"),
                ]),
            ColumnMetaData::new("connectionStatus", "Status", CellType::TextCell, ValueType::Enum)
                .with_options(vec![
                    SelectOption::new("Disconnected", "NodeConnectionStatusDisconnected"),
                    SelectOption::new("Connected", "NodeConnectionStatusConnected"),
                ]),
        ];
        let shown = ["peerAlias", "torqNodeAlias", "setting", "connectionStatus"];

        ColumnCatalog::new(Page::Peers, columns)
            .with_sortable(&shown)
            .with_filterable(&shown)
    }

    pub fn closed_channels() -> Self {
        use CellType::*;

        let status_options = [
            "Opening",
            "Open",
            "Closing",
            "Cooperative Closed",
            "Local Force Closed",
            "Remote Force Closed",
            "Breach Closed",
            "Funding Cancelled Closed",
            "Abandoned Closed",
        ]
        .iter()
        .map(|s| SelectOption::new(*s, *s))
        .collect();

        let columns = vec![
            ColumnMetaData::new("peerAlias", "Peer Alias", AliasCell, ValueType::String).locked(),
            ColumnMetaData::new("shortChannelId", "Short Channel ID", LongTextCell, ValueType::String),
            ColumnMetaData::new("capacity", "Capacity", NumericCell, ValueType::Number),
            ColumnMetaData::new("lndShortChannelId", "LND Short Channel ID", LongTextCell, ValueType::String),
            ColumnMetaData::new("fundingTransactionHash", "Funding Transaction", LongTextCell, ValueType::String),
            ColumnMetaData::new("fundingBlockHeight", "Funding BlockHeight", NumericCell, ValueType::Number),
            ColumnMetaData::new("fundingBlockHeightDelta", "Funding BlockHeight Delta", NumericCell, ValueType::Number),
            ColumnMetaData::new("fundedOn", "Funding Date", DateCell, ValueType::Date),
            ColumnMetaData::new("fundedOnSecondsDelta", "Funding Date Delta (Seconds)", DurationCell, ValueType::Duration),
            ColumnMetaData::new("closingTransactionHash", "Closing Transaction", LongTextCell, ValueType::String),
            ColumnMetaData::new("closingBlockHeight", "Closing BlockHeight", NumericCell, ValueType::Number),
            ColumnMetaData::new("closingBlockHeightDelta", "Closing BlockHeight Delta", NumericCell, ValueType::Number),
            ColumnMetaData::new("closedOn", "Closing Date", DateCell, ValueType::Date),
            ColumnMetaData::new("closedOnSecondsDelta", "Closing Date Delta (Seconds)", DurationCell, ValueType::Duration),
            ColumnMetaData::new("nodeName", "Node Name", TextCell, ValueType::String),
            ColumnMetaData::new("pubKey", "Public key", LongTextCell, ValueType::String),
            ColumnMetaData::new("status", "Status", TextCell, ValueType::Enum).with_options(status_options),
        ];

        // Everything except the public key is sortable and filterable.
        let keys: Vec<&str> = columns
            .iter()
            .map(|c| c.key.as_str())
            .filter(|k| *k != "pubKey")
            .collect();
        let sortable = keys.iter().map(|k| k.to_string()).collect::<Vec<_>>();

        ColumnCatalog {
            page: Page::ClosedChannels,
            filterable: sortable.clone(),
            sortable,
            columns,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peers_catalog_has_one_locked_column() {
        let catalog = ColumnCatalog::peers();
        let locked: Vec<&str> = catalog.locked_columns().map(|c| c.key.as_str()).collect();
        assert_eq!(locked, vec!["peerAlias"]);
        assert!(!catalog.is_sortable("pubKey"));
        assert!(catalog.is_filterable("connectionStatus"));
    }

    #[test]
    fn closed_channels_catalog_types() {
        let catalog = ColumnCatalog::closed_channels();
        assert_eq!(catalog.columns.len(), 17);
        assert_eq!(catalog.column("fundedOn").map(|c| c.value_type), Some(ValueType::Date));
        assert_eq!(
            catalog.column("closedOnSecondsDelta").map(|c| c.value_type),
            Some(ValueType::Duration)
        );
        assert_eq!(catalog.column("status").map(|c| c.select_options.len()), Some(9));
        assert!(catalog.is_sortable("capacity"));
        assert!(!catalog.is_filterable("pubKey"));
    }

    #[test]
    fn generated_cell_types_fit_value_types() {
        for catalog in [ColumnCatalog::peers(), ColumnCatalog::closed_channels()] {
            for column in &catalog.columns {
                assert!(
                    column.cell_type.accepts(column.value_type),
                    "{} has {:?} for {}",
                    column.key,
                    column.cell_type,
                    column.value_type
                );
            }
        }
    }

    #[test]
    fn page_names() {
        assert_eq!(Page::ClosedChannels.to_string(), "closedChannels");
        assert_eq!(serde_json::to_string(&Page::OnChain).unwrap(), "\"onChain\"");
    }
}
