use chrono::{DateTime, Local, TimeDelta, TimeZone};

use crate::model::task::parse_deadline;

/// Width of the proximity window on either side of "now"
pub const NEAR_WINDOW_SECS: i64 = 24 * 60 * 60;

/// True when the deadline's local midnight lies within 24 hours of `now`,
/// in either direction. Unparseable deadlines are never near.
pub fn is_deadline_near(deadline: &str, now: DateTime<Local>) -> bool {
    is_near(deadline, &now)
}

/// [`is_deadline_near`] for any time zone: midnight is taken in `now`'s zone.
pub fn is_near<Tz: TimeZone>(deadline: &str, now: &DateTime<Tz>) -> bool {
    let Ok(date) = parse_deadline(deadline) else {
        return false;
    };
    let Some(midnight) = date.and_hms_opt(0, 0, 0) else {
        return false;
    };
    // Nonexistent local midnight (DST gap) is treated like a bad date
    let Some(due) = now.timezone().from_local_datetime(&midnight).earliest() else {
        return false;
    };
    let diff = due.signed_duration_since(now.clone());
    diff.abs() <= TimeDelta::seconds(NEAR_WINDOW_SECS)
}
