//! UI layer errors.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    /// Carries the normalized text that failed validation.
    #[error("Invalid phone number: {0:?}")]
    Invalid(String),
}
