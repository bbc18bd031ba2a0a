//! Localized UI strings for the table widget.
//!
//! The bundle schema follows the table library's remote i18n files
//! (camelCase keys, `paginate` sub-object). The viewer fetches one of
//! these at startup; any field the bundle leaves out keeps its built-in
//! English text, and a bundle that fails to load entirely leaves the
//! defaults standing.

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LanguagePack {
    /// Label next to the free-text search box.
    pub search: String,
    /// Summary line; `_START_`, `_END_` and `_TOTAL_` are substituted.
    pub info: String,
    pub info_empty: String,
    /// Shown when the search query matches nothing.
    pub zero_records: String,
    /// Shown when the table has no data at all.
    pub empty_table: String,
    pub paginate: Paginate,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Paginate {
    pub first: String,
    pub previous: String,
    pub next: String,
    pub last: String,
}

impl Default for LanguagePack {
    fn default() -> Self {
        Self {
            search: "Search:".to_owned(),
            info: "Showing _START_ to _END_ of _TOTAL_ entries".to_owned(),
            info_empty: "Showing 0 to 0 of 0 entries".to_owned(),
            zero_records: "No matching records found".to_owned(),
            empty_table: "No data available in table".to_owned(),
            paginate: Paginate::default(),
        }
    }
}

impl Default for Paginate {
    fn default() -> Self {
        Self {
            first: "First".to_owned(),
            previous: "Previous".to_owned(),
            next: "Next".to_owned(),
            last: "Last".to_owned(),
        }
    }
}

impl LanguagePack {
    /// Parse a remote bundle body.
    pub fn from_json_bytes(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }
}
