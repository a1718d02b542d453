//! Page wiring: routes page events to the controller and actions.

use crate::actions::{BlockForm, BlockOutcome, BlocklistActions, SearchResult, UnblockOutcome};
use crate::controller::PhoneField;
use crate::date::{format_for_display, looks_like_timestamp};
use crate::dom::FormEvent;
use tracing::debug;

/// An interaction delivered by the page.
pub enum PageEvent<'a> {
    /// Text changed in the telephone input with this id.
    Input { field_id: &'a str },
    /// The search box button was clicked.
    Search,
    /// The block form was submitted.
    Submit {
        event: &'a dyn FormEvent,
        form: &'a BlockForm,
    },
    /// An unblock button was clicked in the row carrying `phone`.
    UnblockClick { phone: &'a str },
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageResponse {
    Validated(bool),
    Searched(SearchResult),
    Submitted(BlockOutcome),
    Unblocked(UnblockOutcome),
    Ignored,
}

pub struct Page {
    phone_fields: Vec<PhoneField>,
    actions: BlocklistActions,
}

impl Page {
    pub fn new(actions: BlocklistActions) -> Self {
        Self {
            phone_fields: Vec::new(),
            actions,
        }
    }

    /// Attach live validation to a telephone input.
    pub fn with_phone_field(mut self, field: PhoneField) -> Self {
        self.phone_fields.push(field);
        self
    }

    pub fn actions(&self) -> &BlocklistActions {
        &self.actions
    }

    /// Rewrite raw ISO-8601 timestamp cells for display.
    /// Returns how many cells were rewritten.
    pub fn on_load(&self) -> usize {
        let table = self.actions.table();
        let mut rewritten = 0;

        for row in table.rows() {
            if looks_like_timestamp(&row.timestamp) {
                table.set_timestamp_text(&row.phone, &format_for_display(row.timestamp.trim()));
                rewritten += 1;
            }
        }

        debug!(rewritten, "Page loaded");
        rewritten
    }

    pub async fn dispatch(&self, event: PageEvent<'_>) -> PageResponse {
        match event {
            PageEvent::Input { field_id } => {
                match self.phone_fields.iter().find(|f| f.id() == field_id) {
                    Some(field) => PageResponse::Validated(field.on_input()),
                    None => {
                        debug!(field_id, "Input on unwired field ignored");
                        PageResponse::Ignored
                    }
                }
            }
            PageEvent::Search => PageResponse::Searched(self.actions.search().await),
            PageEvent::Submit { event, form } => {
                PageResponse::Submitted(self.actions.submit_block(event, form).await)
            }
            PageEvent::UnblockClick { phone } if !phone.is_empty() => {
                PageResponse::Unblocked(self.actions.unblock(phone).await)
            }
            PageEvent::UnblockClick { .. } => {
                debug!("Unblock click without a phone number ignored");
                PageResponse::Ignored
            }
        }
    }
}
