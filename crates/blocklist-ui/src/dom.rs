//! Element seams.
//!
//! Components receive the elements they touch instead of looking them up,
//! so each one can be driven by a real page binding or by the in-memory
//! implementations in [`crate::memory`].

use crate::actions::SearchOutcome;
use crate::toast::Toast;

/// Visual validity state of an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validity {
    Valid,
    Invalid,
}

impl Validity {
    pub fn from_valid(valid: bool) -> Self {
        if valid {
            Validity::Valid
        } else {
            Validity::Invalid
        }
    }

    /// CSS class the page styles this state with.
    pub fn css_class(self) -> &'static str {
        match self {
            Validity::Valid => "valid-input",
            Validity::Invalid => "invalid-input",
        }
    }
}

/// A text input field.
pub trait TextInput: Send + Sync {
    fn id(&self) -> &str;
    fn value(&self) -> String;
    fn set_value(&self, value: &str);
    /// Replace the current validity class with `validity`.
    fn set_validity(&self, validity: Validity);
    /// Show or hide the inline error next to the field.
    fn set_error_visible(&self, visible: bool);
}

pub trait Button: Send + Sync {
    fn set_enabled(&self, enabled: bool);
    fn is_enabled(&self) -> bool;
}

/// Container showing the outcome of the last search.
pub trait ResultPanel: Send + Sync {
    /// Replace the panel content wholesale.
    fn render(&self, outcome: &SearchOutcome);
    fn clear(&self);
    fn set_visible(&self, visible: bool);
}

/// Identifier of a toast within its area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToastId(pub u64);

/// Fixed notification container.
pub trait ToastArea: Send + Sync {
    fn append(&self, toast: &Toast) -> ToastId;
    fn remove(&self, id: ToastId);
}

/// A row of the blocked number table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRow {
    /// Value of the row's phone data attribute.
    pub phone: String,
    /// Text of the timestamp cell.
    pub timestamp: String,
}

/// The blocked number table.
pub trait EntryTable: Send + Sync {
    fn rows(&self) -> Vec<EntryRow>;
    fn set_timestamp_text(&self, phone: &str, text: &str);
    /// Remove the row keyed by `phone`. Returns whether a row was removed.
    fn remove_row(&self, phone: &str) -> bool;
    fn replace_rows(&self, rows: Vec<EntryRow>);
}

/// Interactive yes/no confirmation.
pub trait Confirm: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Event delivered to a form submit handler.
pub trait FormEvent {
    /// Suppress the browser's own navigation for this submission.
    fn prevent_default(&self);
}
