//! Interaction layer for the blocked phone number registry.
//!
//! Validates and formats phone numbers as they are typed, runs search,
//! block and unblock requests against the registry API, and reflects the
//! results in injected page elements and toasts.

pub mod actions;
pub mod config;
pub mod controller;
pub mod date;
pub mod dom;
pub mod error;
pub mod generation;
pub mod memory;
pub mod page;
pub mod phone;
pub mod refresh;
pub mod toast;

pub use actions::{
    parse_amount, BlockForm, BlockOutcome, BlocklistActions, EntryView, SearchBox,
    SearchOutcome, SearchResult, UnblockOutcome,
};
pub use config::UiConfig;
pub use controller::{PhoneField, SEARCH_FIELD_ID};
pub use date::format_for_display;
pub use error::PhoneError;
pub use page::{Page, PageEvent, PageResponse};
pub use phone::{is_valid, normalize, PhoneNumber};
pub use refresh::{ListRefresher, TableRefresher};
pub use toast::{Toast, ToastKind, Toaster};
