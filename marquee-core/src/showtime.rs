//! Showtime arithmetic for the countdown display.
//!
//! Slots are 12-hour wall-clock labels ("01:00 PM"). The next showing is
//! today's occurrence of that time, rolled forward one calendar day when it
//! has already passed. "Now" is always passed in so callers control the
//! clock; nothing here reads system time.

use chrono::{Duration, NaiveDateTime, NaiveTime};
use std::fmt;

/// Remaining time below which the countdown switches to "starting very soon".
pub const SOON_THRESHOLD_MINUTES: i64 = 5;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unrecognized slot label: {0}")]
pub struct SlotParseError(String);

/// Parses a slot label like "08:00 PM" into a time of day.
pub fn parse_slot(label: &str) -> Result<NaiveTime, SlotParseError> {
    NaiveTime::parse_from_str(label.trim(), "%I:%M %p")
        .map_err(|_| SlotParseError(label.to_string()))
}

/// Next occurrence of `slot` at or after `now`.
pub fn next_showing(slot: NaiveTime, now: NaiveDateTime) -> NaiveDateTime {
    let mut showing = now.date().and_time(slot);
    if showing < now {
        showing += Duration::days(1);
    }
    showing
}

/// The three mutually exclusive countdown states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    AlreadyStarted,
    StartingSoon,
    StartsIn { hours: i64, minutes: i64 },
}

/// Derives the countdown for a slot label at the given instant.
///
/// Whole hours and leftover whole minutes are floored, so anything under a
/// full minute before the showing already reads as started.
pub fn countdown(label: &str, now: NaiveDateTime) -> Result<Countdown, SlotParseError> {
    let showing = next_showing(parse_slot(label)?, now);
    let remaining = showing - now;
    let hours = remaining.num_hours();
    let minutes = remaining.num_minutes() % 60;

    Ok(if hours <= 0 && minutes <= 0 {
        Countdown::AlreadyStarted
    } else if hours == 0 && minutes < SOON_THRESHOLD_MINUTES {
        Countdown::StartingSoon
    } else {
        Countdown::StartsIn { hours, minutes }
    })
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Countdown::AlreadyStarted => write!(f, "Show already started!"),
            Countdown::StartingSoon => write!(f, "Starting very soon!"),
            Countdown::StartsIn { hours: 0, minutes } => write!(f, "Starts in {}m", minutes),
            Countdown::StartsIn { hours, minutes } => {
                write!(f, "Starts in {}h {}m", hours, minutes)
            }
        }
    }
}
