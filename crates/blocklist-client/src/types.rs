//! Registry API types.

use serde::{Deserialize, Serialize};

/// A blocklist entry as returned by the search endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlocklistEntry {
    #[serde(default)]
    pub id: Option<i64>,
    pub phone_number: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub store_location: String,
    #[serde(default)]
    pub check_amount: Option<f64>,
    #[serde(default)]
    pub notes: String,
    /// Incident date as sent by the server (ISO-8601 date or date-time).
    #[serde(default)]
    pub incident_date: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Create request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEntry {
    pub phone_number: String,
    pub reason: String,
    pub store_location: String,
    /// `None` is sent as `null` when the amount did not parse as a number.
    pub check_amount: Option<f64>,
    pub notes: String,
}

/// One row of the blocked number listing.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntrySummary {
    pub id: i64,
    pub phone_number: String,
    #[serde(default)]
    pub created_at: String,
}
