//! Line-oriented host for the blocklist page.

use crate::error::CommandError;
use blocklist_client::BlocklistClient;
use blocklist_ui::dom::{EntryTable, TextInput};
use blocklist_ui::memory::*;
use blocklist_ui::{
    BlockForm, BlocklistActions, ListRefresher, Page, PageEvent, PageResponse, PhoneField,
    SearchBox, TableRefresher, Toaster, UiConfig, SEARCH_FIELD_ID,
};
use std::fmt::Write;
use std::str::FromStr;
use std::sync::Arc;
use tracing::warn;

/// Id of the block form's phone input.
pub const FORM_FIELD_ID: &str = "phoneInput";

pub const HELP: &str = "\
commands:
  type <field-id> <text>    type into a phone field (searchPhone, phoneInput)
  search                    search the number in the search box
  block <phone> | <reason> | <location> | <amount> | <notes>
  unblock <phone>           unblock a listed number (asks to confirm)
  show                      print the page
  help                      print this help
  quit                      exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Type { field_id: String, text: String },
    Search,
    Block(BlockForm),
    Unblock(String),
    Show,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (name, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();

        match name {
            "type" => {
                let (field_id, text) = rest.split_once(' ').unwrap_or((rest, ""));
                if field_id.is_empty() {
                    return Err(CommandError::Usage("type <field-id> <text>"));
                }
                Ok(Command::Type {
                    field_id: field_id.to_string(),
                    text: text.to_string(),
                })
            }
            "search" => Ok(Command::Search),
            "block" => {
                let parts: Vec<&str> = rest.split('|').map(str::trim).collect();
                match parts.as_slice() {
                    [phone, reason, location, amount, notes @ ..] if !phone.is_empty() => {
                        Ok(Command::Block(BlockForm {
                            phone: phone.to_string(),
                            reason: reason.to_string(),
                            store_location: location.to_string(),
                            check_amount: amount.to_string(),
                            notes: notes.join("|"),
                        }))
                    }
                    _ => Err(CommandError::Usage(
                        "block <phone> | <reason> | <location> | <amount> | <notes>",
                    )),
                }
            }
            "unblock" if !rest.is_empty() => Ok(Command::Unblock(rest.to_string())),
            "unblock" => Err(CommandError::Usage("unblock <phone>")),
            "show" | "" => Ok(Command::Show),
            "help" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// The page, wired to in-memory elements that the console prints.
pub struct Console {
    page: Page,
    search_input: Arc<MemoryInput>,
    phone_input: Arc<MemoryInput>,
    panel: Arc<MemoryPanel>,
    toasts: Arc<MemoryToastArea>,
    table: Arc<MemoryTable>,
    confirm: Arc<ScriptedConfirm>,
    refresher: Arc<TableRefresher>,
}

impl Console {
    pub fn new(client: BlocklistClient, ui: &UiConfig) -> Self {
        let search_input = Arc::new(MemoryInput::new(SEARCH_FIELD_ID));
        let search_button = Arc::new(MemoryButton::new());
        let phone_input = Arc::new(MemoryInput::new(FORM_FIELD_ID));
        let submit_button = Arc::new(MemoryButton::new());
        let panel = Arc::new(MemoryPanel::new());
        let toasts = Arc::new(MemoryToastArea::new());
        let table = Arc::new(MemoryTable::default());
        let confirm = Arc::new(ScriptedConfirm::default());
        let refresher = Arc::new(TableRefresher::new(client.clone(), table.clone()));

        let actions = BlocklistActions::new(
            client,
            Toaster::with_duration(toasts.clone(), ui.toast_duration),
            SearchBox {
                input: search_input.clone(),
                button: search_button.clone(),
                panel: panel.clone(),
            },
            table.clone(),
            confirm.clone(),
        )
        .with_refresher(refresher.clone(), ui.refresh_delay);

        let page = Page::new(actions)
            .with_phone_field(PhoneField::bind(
                search_input.clone(),
                Some(search_button.clone()),
                None,
            ))
            .with_phone_field(PhoneField::bind(
                phone_input.clone(),
                Some(search_button),
                Some(submit_button),
            ));

        Self {
            page,
            search_input,
            phone_input,
            panel,
            toasts,
            table,
            confirm,
            refresher,
        }
    }

    /// Fetch the initial list and format its timestamps.
    pub async fn load(&self) {
        if let Err(e) = self.refresher.refresh().await {
            warn!("Initial list load failed: {}", e);
        }
        self.page.on_load();
    }

    /// Run one command. `confirmed` answers the unblock confirmation.
    pub async fn execute(&self, command: Command, confirmed: bool) -> Option<PageResponse> {
        match command {
            Command::Type { field_id, text } => {
                if field_id == SEARCH_FIELD_ID {
                    self.search_input.set_value(&text);
                } else if field_id == FORM_FIELD_ID {
                    self.phone_input.set_value(&text);
                }
                Some(
                    self.page
                        .dispatch(PageEvent::Input {
                            field_id: &field_id,
                        })
                        .await,
                )
            }
            Command::Search => Some(self.page.dispatch(PageEvent::Search).await),
            Command::Block(mut form) => {
                self.phone_input.set_value(&form.phone);
                self.page
                    .dispatch(PageEvent::Input {
                        field_id: FORM_FIELD_ID,
                    })
                    .await;
                form.phone = self.phone_input.value();

                let event = MemoryFormEvent::new();
                Some(
                    self.page
                        .dispatch(PageEvent::Submit {
                            event: &event,
                            form: &form,
                        })
                        .await,
                )
            }
            Command::Unblock(phone) => {
                self.confirm.push_answer(confirmed);
                let response = self
                    .page
                    .dispatch(PageEvent::UnblockClick { phone: &phone })
                    .await;
                self.confirm.clear_answers();
                Some(response)
            }
            Command::Show | Command::Help | Command::Quit => None,
        }
    }

    /// Text rendering of the page.
    pub fn render(&self) -> String {
        let mut out = String::new();

        let search = self.search_input.state();
        let _ = writeln!(out, "search: [{}]{}", search.value, validity_mark(&search));
        let form = self.phone_input.state();
        let _ = writeln!(out, "block form phone: [{}]{}", form.value, validity_mark(&form));

        if self.panel.is_visible() {
            if let Some(content) = self.panel.content() {
                let _ = writeln!(out, "--- result ---\n{}", content);
            }
        }

        let rows = self.table.rows();
        let _ = writeln!(out, "--- blocked numbers ({}) ---", rows.len());
        for row in rows {
            let _ = writeln!(out, "{:<18} {}", row.phone, row.timestamp);
        }

        for toast in self.toasts.visible() {
            let _ = writeln!(out, "[{}] {}", toast.kind.css_class(), toast.message);
        }

        out
    }
}

fn validity_mark(state: &InputState) -> String {
    match state.validity {
        Some(validity) => format!(" ({})", validity.css_class()),
        None => String::new(),
    }
}
