//! Time window — the half-open interval a reservation occupies.

use chrono::SubsecRound;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::time::Timestamp;

/// A half-open interval `[start, end)` with `start < end`.
///
/// Bounds are kept at millisecond precision, the resolution reservations are
/// stored with; anything finer is truncated on construction.
///
/// Two windows that merely touch (one ends exactly when the other starts)
/// do not overlap, so back-to-back bookings are allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawWindow")]
pub struct TimeWindow {
    start: Timestamp,
    end: Timestamp,
}

#[derive(Deserialize)]
struct RawWindow {
    start: Timestamp,
    end: Timestamp,
}

impl TryFrom<RawWindow> for TimeWindow {
    type Error = ValidationError;

    fn try_from(raw: RawWindow) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
    }
}

impl TimeWindow {
    /// Build a window, rejecting empty or inverted intervals.
    ///
    /// Both bounds are truncated to whole milliseconds before the check, so a
    /// sub-millisecond window is empty.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidTimeWindow`] when `end <= start`
    /// after truncation.
    pub fn new(start: Timestamp, end: Timestamp) -> Result<Self, ValidationError> {
        let start = start.trunc_subsecs(3);
        let end = end.trunc_subsecs(3);
        if end <= start {
            return Err(ValidationError::InvalidTimeWindow);
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub fn start(&self) -> Timestamp {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> Timestamp {
        self.end
    }

    /// Whether the two windows share at least one instant.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}
