//! Re-fetching the blocked number list.

use crate::date::format_for_display;
use crate::dom::{EntryRow, EntryTable};
use async_trait::async_trait;
use blocklist_client::{BlocklistClient, BlocklistError};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Re-renders the list after it changed on the server.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListRefresher: Send + Sync {
    async fn refresh(&self) -> Result<(), BlocklistError>;
}

/// Fetches the listing and replaces the table rows with it.
pub struct TableRefresher {
    client: BlocklistClient,
    table: Arc<dyn EntryTable>,
}

impl TableRefresher {
    pub fn new(client: BlocklistClient, table: Arc<dyn EntryTable>) -> Self {
        Self { client, table }
    }
}

#[async_trait]
impl ListRefresher for TableRefresher {
    #[instrument(skip(self))]
    async fn refresh(&self) -> Result<(), BlocklistError> {
        let entries = self.client.list().await?;
        let rows: Vec<EntryRow> = entries
            .into_iter()
            .map(|e| EntryRow {
                phone: e.phone_number,
                timestamp: format_for_display(&e.created_at),
            })
            .collect();

        debug!("Rendering {} rows", rows.len());
        self.table.replace_rows(rows);
        Ok(())
    }
}
