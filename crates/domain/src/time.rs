//! Time and timestamp helpers.

use chrono::{DateTime, Utc};

/// UTC timestamp.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Next cache-busting stamp for icon URLs.
///
/// Milliseconds since the epoch, but always strictly greater than `previous`
/// so two refreshes within the same millisecond still produce distinct URLs.
#[must_use]
pub fn cache_bust(previous: i64) -> i64 {
    now().timestamp_millis().max(previous.saturating_add(1))
}
