//! Traffic-light classification of a line's upcoming departures.
//!
//! Each departure instant is compared with "now" and falls into one of
//! three windows (minutes, configurable):
//!
//! ```text
//!   |diff| <  amber_min               -> too close, RED
//!   amber_min <= |diff| <= amber_max  -> AMBER
//!   amber_max <  |diff| <= green_max  -> GREEN
//!   green_max <  |diff|               -> too far, RED
//! ```
//!
//! A line is GREEN if any instant is green, else AMBER if any instant is
//! amber, else RED.
//!
//! The difference is taken as an absolute value: a departure that left
//! four minutes ago scores like one leaving in four minutes. Tests pin this
//! behavior.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::domain::{DepartureInstant, Status};

const MICROS_PER_MINUTE: u64 = 60 * 1_000_000;

/// Error returned for threshold values that do not form ordered windows.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "invalid traffic-light thresholds: need green_max ({green_max}) > amber_max ({amber_max}) >= amber_min ({amber_min})"
)]
pub struct InvalidThresholds {
    pub green_max: u32,
    pub amber_max: u32,
    pub amber_min: u32,
}

/// Window boundaries in whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    green_max_mins: u32,
    amber_max_mins: u32,
    amber_min_mins: u32,
}

impl Thresholds {
    /// Create thresholds, checking `green_max > amber_max >= amber_min`.
    pub fn new(
        green_max_mins: u32,
        amber_max_mins: u32,
        amber_min_mins: u32,
    ) -> Result<Self, InvalidThresholds> {
        if green_max_mins <= amber_max_mins || amber_max_mins < amber_min_mins {
            return Err(InvalidThresholds {
                green_max: green_max_mins,
                amber_max: amber_max_mins,
                amber_min: amber_min_mins,
            });
        }
        Ok(Self {
            green_max_mins,
            amber_max_mins,
            amber_min_mins,
        })
    }

    pub fn green_max_mins(&self) -> u32 {
        self.green_max_mins
    }

    pub fn amber_max_mins(&self) -> u32 {
        self.amber_max_mins
    }

    pub fn amber_min_mins(&self) -> u32 {
        self.amber_min_mins
    }

    fn is_green(&self, abs_micros: u64) -> bool {
        abs_micros > u64::from(self.amber_max_mins) * MICROS_PER_MINUTE
            && abs_micros <= u64::from(self.green_max_mins) * MICROS_PER_MINUTE
    }

    fn is_amber(&self, abs_micros: u64) -> bool {
        abs_micros >= u64::from(self.amber_min_mins) * MICROS_PER_MINUTE
            && abs_micros <= u64::from(self.amber_max_mins) * MICROS_PER_MINUTE
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            green_max_mins: 6,
            amber_max_mins: 3,
            amber_min_mins: 2,
        }
    }
}

/// Absolute distance between an instant and now, in microseconds.
///
/// `None` only for differences too large to represent, which can never fall
/// inside a window.
fn abs_diff_micros(instant: &DepartureInstant, now: DateTime<Utc>) -> Option<u64> {
    instant
        .signed_duration_since(now)
        .num_microseconds()
        .map(i64::unsigned_abs)
}

/// Classify a line's departure instants relative to `now`.
///
/// Pure and total: an empty set is always [`Status::Red`].
pub fn classify(
    instants: &BTreeSet<DepartureInstant>,
    now: DateTime<Utc>,
    thresholds: &Thresholds,
) -> Status {
    let mut found_amber = false;

    for instant in instants {
        let Some(abs_micros) = abs_diff_micros(instant, now) else {
            continue;
        };
        if thresholds.is_green(abs_micros) {
            return Status::Green;
        }
        if thresholds.is_amber(abs_micros) {
            found_amber = true;
        }
    }

    if found_amber {
        Status::Amber
    } else {
        Status::Red
    }
}
