//! Live validation of telephone inputs.

use crate::dom::{Button, TextInput, Validity};
use crate::phone::{is_valid, normalize};
use std::sync::Arc;
use tracing::trace;

/// Id of the search box input.
pub const SEARCH_FIELD_ID: &str = "searchPhone";

/// A telephone input and the action button its validity gates.
#[derive(Clone)]
pub struct PhoneField {
    input: Arc<dyn TextInput>,
    button: Option<Arc<dyn Button>>,
}

impl PhoneField {
    /// Bind `input` to the button it controls.
    ///
    /// The search field controls the search box button, any other field the
    /// submit button of its enclosing form. A field with neither only
    /// updates its own state.
    pub fn bind(
        input: Arc<dyn TextInput>,
        search_button: Option<Arc<dyn Button>>,
        form_submit: Option<Arc<dyn Button>>,
    ) -> Self {
        let button = if input.id() == SEARCH_FIELD_ID {
            search_button
        } else {
            form_submit
        };
        Self { input, button }
    }

    pub fn id(&self) -> &str {
        self.input.id()
    }

    /// Handle an input event: normalize the text in place and reflect its
    /// validity. Returns whether the field now holds a valid number.
    pub fn on_input(&self) -> bool {
        let normalized = normalize(&self.input.value());
        self.input.set_value(&normalized);

        let valid = is_valid(&normalized);
        self.input.set_validity(Validity::from_valid(valid));
        self.input.set_error_visible(!valid);
        if let Some(button) = &self.button {
            button.set_enabled(valid);
        }

        trace!(field = %self.input.id(), valid, "Phone input validated");
        valid
    }
}
