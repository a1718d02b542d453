//! Phone number cleanup and validation.

use crate::error::PhoneError;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// `+`, a non-zero leading digit, then 9 to 14 more digits.
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+[1-9][0-9]{9,14}$").expect("phone pattern is valid"));

/// Clean user-entered phone text.
///
/// Keeps only ASCII digits and `+`, prefixes a bare digit string with `+`
/// and drops zeros directly after the `+`. Never fails; the result may still
/// be invalid, so call [`is_valid`] before using it.
pub fn normalize(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();

    let cleaned = if cleaned.starts_with(|c: char| c.is_ascii_digit()) {
        format!("+{}", cleaned)
    } else {
        cleaned
    };

    if cleaned.starts_with("+0") {
        return format!("+{}", cleaned[1..].trim_start_matches('0'));
    }
    cleaned
}

/// Whether `phone` is a complete international-format number.
pub fn is_valid(phone: &str) -> bool {
    PHONE_PATTERN.is_match(phone)
}

/// A normalized phone number that passed [`is_valid`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Normalize then validate.
    pub fn parse(raw: &str) -> Result<Self, PhoneError> {
        let normalized = normalize(raw);
        if is_valid(&normalized) {
            Ok(Self(normalized))
        } else {
            Err(PhoneError::Invalid(normalized))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
