//! Past generations as returned by `GET /generations`.

use chrono::{DateTime, Local, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// One archived generation. Read-only on the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: i64,
    pub original_image: String,
    pub generated_image: String,
    pub style: String,
    pub room_type: String,
    /// Server timestamp, usually SQLite's `YYYY-MM-DD HH:MM:SS` in UTC
    pub timestamp: String,
}

impl HistoryEntry {
    /// Parse the server timestamp. RFC 3339 is tried first, then the bare
    /// SQLite format which is assumed to be UTC.
    pub fn parsed_timestamp(&self) -> Option<DateTime<Utc>> {
        let raw = self.timestamp.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .map(|naive| naive.and_utc())
    }

    /// Local-time label for the history card; falls back to the raw value.
    pub fn display_timestamp(&self) -> String {
        match self.parsed_timestamp() {
            Some(ts) => ts.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
            None => self.timestamp.clone(),
        }
    }
}
