//! SQLite helper utilities
//!
//! SQLite has no native timestamp type and no array binding, so timestamps are
//! stored as RFC 3339 TEXT and `IN` lists are expanded into placeholders.

use chrono::Utc;

/// Get current UTC timestamp as RFC 3339 string for SQLite
#[inline]
pub fn now_iso8601() -> String {
    Utc::now().to_rfc3339()
}

/// Build a comma-separated placeholder list for an `IN (...)` clause.
///
/// An empty list yields `NULL`, which matches nothing.
pub fn in_placeholders(count: usize) -> String {
    if count == 0 {
        return "NULL".to_string();
    }
    vec!["?"; count].join(", ")
}
