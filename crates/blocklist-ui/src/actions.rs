//! Search, block and unblock actions against the registry.

use crate::date::format_for_display;
use crate::dom::{Button, Confirm, EntryTable, FormEvent, ResultPanel, TextInput};
use crate::generation::RequestGenerations;
use crate::phone::PhoneNumber;
use crate::refresh::ListRefresher;
use crate::toast::{ToastKind, Toaster};
use blocklist_client::{BlocklistClient, BlocklistEntry, BlocklistError, NewEntry};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Entry fields shown in the result panel.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryView {
    pub phone: String,
    pub location: String,
    pub reason: String,
    /// Incident date already formatted for display.
    pub incident_date: String,
}

impl From<&BlocklistEntry> for EntryView {
    fn from(entry: &BlocklistEntry) -> Self {
        Self {
            phone: entry.phone_number.clone(),
            location: entry.store_location.clone(),
            reason: entry.reason.clone(),
            incident_date: entry
                .incident_date
                .as_deref()
                .map(format_for_display)
                .unwrap_or_default(),
        }
    }
}

/// What the result panel shows after a search.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Found(EntryView),
    /// Expected outcome, not an error.
    NotFound,
    InvalidPhone,
    Failed,
}

impl SearchOutcome {
    pub fn is_error(&self) -> bool {
        matches!(self, SearchOutcome::InvalidPhone | SearchOutcome::Failed)
    }
}

impl fmt::Display for SearchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchOutcome::Found(view) => write!(
                f,
                "WARNING: Blocked Number\nPhone: {}\nLocation: {}\nReason: {}\nDate: {}",
                view.phone, view.location, view.reason, view.incident_date
            ),
            SearchOutcome::NotFound => f.write_str("Number not found in blocklist"),
            SearchOutcome::InvalidPhone => f.write_str("Please enter a valid phone number"),
            SearchOutcome::Failed => f.write_str("Error checking number"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchResult {
    Completed(SearchOutcome),
    /// A newer search or reset was issued while this one was in flight.
    Superseded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockOutcome {
    InvalidPhone,
    Blocked,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnblockOutcome {
    /// The row carried a key that is not a valid number; nothing was sent.
    InvalidPhone,
    Declined,
    Unblocked { row_removed: bool },
    Failed,
}

/// Raw field values of the block form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockForm {
    pub phone: String,
    pub reason: String,
    pub store_location: String,
    pub check_amount: String,
    pub notes: String,
}

impl BlockForm {
    pub fn to_new_entry(&self, phone: &PhoneNumber) -> NewEntry {
        NewEntry {
            phone_number: phone.to_string(),
            reason: self.reason.clone(),
            store_location: self.store_location.clone(),
            check_amount: parse_amount(&self.check_amount),
            notes: self.notes.clone(),
        }
    }
}

/// Parse the leading decimal number of `text`, ignoring trailing junk.
///
/// `"12.50 USD"` gives `12.5`; text without a leading number gives `None`.
pub fn parse_amount(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    let end = trimmed
        .find(|c: char| !(c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')))
        .unwrap_or(trimmed.len());
    let candidate = &trimmed[..end];

    (1..=candidate.len())
        .rev()
        .find_map(|i| candidate[..i].parse::<f64>().ok())
        .filter(|value| value.is_finite())
}

/// The search input, its button and the result panel.
#[derive(Clone)]
pub struct SearchBox {
    pub input: Arc<dyn TextInput>,
    pub button: Arc<dyn Button>,
    pub panel: Arc<dyn ResultPanel>,
}

/// Registry actions bound to the elements they update.
pub struct BlocklistActions {
    client: BlocklistClient,
    toaster: Toaster,
    search_box: SearchBox,
    table: Arc<dyn EntryTable>,
    confirm: Arc<dyn Confirm>,
    refresher: Option<Arc<dyn ListRefresher>>,
    refresh_delay: Duration,
    searches: RequestGenerations,
    searches_in_flight: AtomicUsize,
}

impl BlocklistActions {
    pub fn new(
        client: BlocklistClient,
        toaster: Toaster,
        search_box: SearchBox,
        table: Arc<dyn EntryTable>,
        confirm: Arc<dyn Confirm>,
    ) -> Self {
        Self {
            client,
            toaster,
            search_box,
            table,
            confirm,
            refresher: None,
            refresh_delay: Duration::from_millis(800),
            searches: RequestGenerations::new(),
            searches_in_flight: AtomicUsize::new(0),
        }
    }

    /// Refresh the list with `refresher` after each successful block.
    pub fn with_refresher(mut self, refresher: Arc<dyn ListRefresher>, delay: Duration) -> Self {
        self.refresher = Some(refresher);
        self.refresh_delay = delay;
        self
    }

    pub fn table(&self) -> &Arc<dyn EntryTable> {
        &self.table
    }

    /// Look up the number in the search box and show the outcome.
    ///
    /// A response that arrives after a newer search or reset is dropped
    /// without rendering. The search button stays disabled while the newest
    /// search is still in flight.
    #[instrument(skip(self))]
    pub async fn search(&self) -> SearchResult {
        let token = self.searches.begin();
        let panel = &self.search_box.panel;

        let phone = match PhoneNumber::parse(&self.search_box.input.value()) {
            Ok(phone) => phone,
            Err(e) => {
                debug!("Search rejected locally: {}", e);
                panel.render(&SearchOutcome::InvalidPhone);
                panel.set_visible(true);
                return SearchResult::Completed(SearchOutcome::InvalidPhone);
            }
        };

        self.search_box.button.set_enabled(false);
        self.searches_in_flight.fetch_add(1, Ordering::SeqCst);

        let outcome = match self.client.search(phone.as_str()).await {
            Ok(Some(entry)) => SearchOutcome::Found(EntryView::from(&entry)),
            Ok(None) => SearchOutcome::NotFound,
            Err(e) => {
                warn!(phone_number = %phone, "Search failed: {}", e);
                SearchOutcome::Failed
            }
        };

        let still_pending = self.searches_in_flight.fetch_sub(1, Ordering::SeqCst) - 1;

        if !self.searches.is_current(token) {
            debug!(phone_number = %phone, still_pending, "Discarding superseded search result");
            if still_pending == 0 {
                self.search_box.button.set_enabled(true);
            }
            return SearchResult::Superseded;
        }

        self.search_box.button.set_enabled(true);
        panel.render(&outcome);
        panel.set_visible(true);
        SearchResult::Completed(outcome)
    }

    /// Submit the block form.
    #[instrument(skip(self, event, form))]
    pub async fn submit_block(&self, event: &dyn FormEvent, form: &BlockForm) -> BlockOutcome {
        event.prevent_default();

        let phone = match PhoneNumber::parse(form.phone.trim()) {
            Ok(phone) => phone,
            Err(e) => {
                debug!("Block rejected locally: {}", e);
                self.toaster.notify(
                    "Please enter a valid international phone number",
                    ToastKind::Error,
                );
                return BlockOutcome::InvalidPhone;
            }
        };

        match self.client.create(&form.to_new_entry(&phone)).await {
            Ok(()) => {
                info!(phone_number = %phone, "Number blocked");
                self.toaster.notify("Number blocked successfully!", ToastKind::Success);
                self.reset_search_box();
                self.schedule_refresh();
                BlockOutcome::Blocked
            }
            Err(e) => {
                warn!(phone_number = %phone, "Block failed: {}", e);
                self.toaster.notify(block_failure_message(&e), ToastKind::Error);
                BlockOutcome::Failed
            }
        }
    }

    /// Unblock the row keyed by `row_phone` after the user confirms.
    #[instrument(skip(self))]
    pub async fn unblock(&self, row_phone: &str) -> UnblockOutcome {
        let phone = match PhoneNumber::parse(row_phone) {
            Ok(phone) => phone,
            Err(e) => {
                warn!("Unblock rejected locally: {}", e);
                self.toaster.notify("Failed to unblock number.", ToastKind::Error);
                return UnblockOutcome::InvalidPhone;
            }
        };

        if !self.confirm.confirm(&format!("Unblock number: {}?", phone)) {
            debug!("Unblock declined");
            return UnblockOutcome::Declined;
        }

        match self.client.delete(phone.as_str()).await {
            Ok(()) => {
                let row_removed = self.table.remove_row(row_phone);
                info!(phone_number = %phone, row_removed, "Number unblocked");
                self.toaster.notify("Number unblocked successfully!", ToastKind::Success);
                self.reset_search_box();
                UnblockOutcome::Unblocked { row_removed }
            }
            Err(e) => {
                warn!(phone_number = %phone, "Unblock failed: {}", e);
                self.toaster.notify("Failed to unblock number.", ToastKind::Error);
                UnblockOutcome::Failed
            }
        }
    }

    /// Clear the search input and hide the result panel.
    ///
    /// Any search still in flight is superseded.
    pub fn reset_search_box(&self) {
        self.searches.begin();
        self.search_box.input.set_value("");
        self.search_box.panel.clear();
        self.search_box.panel.set_visible(false);
    }

    /// Refresh the list in the background once `refresh_delay` has passed.
    fn schedule_refresh(&self) {
        let Some(refresher) = self.refresher.clone() else {
            debug!("No list refresher configured");
            return;
        };
        let toaster = self.toaster.clone();
        let delay = self.refresh_delay;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(e) = refresher.refresh().await {
                warn!("List refresh failed: {}", e);
                toaster.notify("Blocked, but the list could not be refreshed", ToastKind::Warning);
            }
        });
    }
}

fn block_failure_message(error: &BlocklistError) -> &'static str {
    if error.status().is_some() {
        "Failed to block number."
    } else {
        "Server error while saving"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::*;
    use crate::refresh::MockListRefresher;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct Fixture {
        actions: BlocklistActions,
        input: Arc<MemoryInput>,
        panel: Arc<MemoryPanel>,
        toasts: Arc<MemoryToastArea>,
    }

    fn fixture(mock_server: &MockServer, refresher: Option<MockListRefresher>) -> Fixture {
        let input = Arc::new(MemoryInput::with_value("searchPhone", "+14155551234"));
        let panel = Arc::new(MemoryPanel::new());
        let toasts = Arc::new(MemoryToastArea::new());
        let search_box = SearchBox {
            input: input.clone(),
            button: Arc::new(MemoryButton::new()),
            panel: panel.clone(),
        };

        let mut actions = BlocklistActions::new(
            BlocklistClient::new(mock_server.uri()).unwrap(),
            Toaster::new(toasts.clone()),
            search_box,
            Arc::new(MemoryTable::default()),
            Arc::new(ScriptedConfirm::default()),
        );
        if let Some(refresher) = refresher {
            actions = actions.with_refresher(Arc::new(refresher), Duration::from_millis(10));
        }

        Fixture {
            actions,
            input,
            panel,
            toasts,
        }
    }

    fn valid_form() -> BlockForm {
        BlockForm {
            phone: "+14155551234".into(),
            reason: "Bounced check".into(),
            store_location: "Main St".into(),
            check_amount: "125.50".into(),
            notes: String::new(),
        }
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("125.50"), Some(125.5));
        assert_eq!(parse_amount("  42 dollars"), Some(42.0));
        assert_eq!(parse_amount("1e3"), Some(1000.0));
        assert_eq!(parse_amount("3."), Some(3.0));
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("inf"), None);
    }

    #[test]
    fn test_search_outcome_display() {
        let found = SearchOutcome::Found(EntryView {
            phone: "+14155551234".into(),
            location: "Main St".into(),
            reason: "Fraud".into(),
            incident_date: "03/15/2024, 12:00 AM".into(),
        });

        let text = found.to_string();
        assert!(text.starts_with("WARNING: Blocked Number"));
        assert!(text.contains("Location: Main St"));
        assert!(text.contains("Date: 03/15/2024, 12:00 AM"));
        assert!(!found.is_error());
        assert!(!SearchOutcome::NotFound.is_error());
        assert!(SearchOutcome::Failed.is_error());
    }

    #[tokio::test]
    async fn test_block_resets_search_and_refreshes_list() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/blocklist"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&mock_server)
            .await;

        let mut refresher = MockListRefresher::new();
        refresher.expect_refresh().times(1).returning(|| Ok(()));

        let f = fixture(&mock_server, Some(refresher));
        f.panel.set_visible(true);

        let event = MemoryFormEvent::new();
        let outcome = f.actions.submit_block(&event, &valid_form()).await;

        assert_eq!(outcome, BlockOutcome::Blocked);
        assert!(event.default_prevented());
        assert_eq!(f.input.state().value, "");
        assert!(!f.panel.is_visible());
        assert_eq!(f.toasts.visible()[0].kind, ToastKind::Success);

        // The refresh runs in the background after the delay.
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    #[tokio::test]
    async fn test_block_returns_before_refresh_runs() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/blocklist"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&mock_server)
            .await;

        let mut refresher = MockListRefresher::new();
        refresher.expect_refresh().times(0);

        let mut f = fixture(&mock_server, None);
        f.actions = f
            .actions
            .with_refresher(Arc::new(refresher), Duration::from_secs(60));

        let outcome = tokio::time::timeout(
            Duration::from_secs(5),
            f.actions.submit_block(&MemoryFormEvent::new(), &valid_form()),
        )
        .await;

        assert_eq!(outcome, Ok(BlockOutcome::Blocked));
    }

    #[tokio::test]
    async fn test_refresh_failure_warns() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/blocklist"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&mock_server)
            .await;

        let mut refresher = MockListRefresher::new();
        refresher.expect_refresh().times(1).returning(|| {
            Err(BlocklistError::NotFound("/api/blocklist/all".into()))
        });

        let f = fixture(&mock_server, Some(refresher));
        let outcome = f
            .actions
            .submit_block(&MemoryFormEvent::new(), &valid_form())
            .await;

        assert_eq!(outcome, BlockOutcome::Blocked);
        tokio::time::sleep(Duration::from_millis(100)).await;
        let kinds: Vec<ToastKind> = f.toasts.visible().iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![ToastKind::Success, ToastKind::Warning]);
    }

    #[tokio::test]
    async fn test_network_failure_on_block() {
        let toasts = Arc::new(MemoryToastArea::new());
        let actions = BlocklistActions::new(
            BlocklistClient::new("http://127.0.0.1:1").unwrap(),
            Toaster::new(toasts.clone()),
            SearchBox {
                input: Arc::new(MemoryInput::new("searchPhone")),
                button: Arc::new(MemoryButton::new()),
                panel: Arc::new(MemoryPanel::new()),
            },
            Arc::new(MemoryTable::default()),
            Arc::new(ScriptedConfirm::default()),
        );

        let outcome = actions
            .submit_block(&MemoryFormEvent::new(), &valid_form())
            .await;

        assert_eq!(outcome, BlockOutcome::Failed);
        assert_eq!(toasts.visible()[0].message, "Server error while saving");
    }
}
