//! Time and timestamp helpers.

use chrono::{DateTime, Utc};

/// UTC timestamp used for reservation windows.
pub type Timestamp = DateTime<Utc>;

/// Convert milliseconds since the Unix epoch back into a [`Timestamp`].
///
/// Returns `None` when the value is outside the range chrono can represent.
#[must_use]
pub fn from_millis(millis: i64) -> Option<Timestamp> {
    DateTime::from_timestamp_millis(millis)
}
