use crate::policy::{care_interval, fertilizing_interval, watering_interval};
use crate::types::CareKind;
use chrono::{DateTime, Duration, Utc};

/// Day count reported for a plant that was never cared for.
pub const NEVER_CARED_DAYS: i64 = 999;

pub(crate) const DAY_MS: i64 = 1000 * 60 * 60 * 24;

/// Whole days elapsed since `last`, rounded toward negative infinity.
pub fn days_since(last: Option<DateTime<Utc>>, now: DateTime<Utc>) -> i64 {
    match last {
        None => NEVER_CARED_DAYS,
        Some(at) => {
            let delta_ms = now.signed_duration_since(at).num_milliseconds();
            delta_ms.div_euclid(DAY_MS)
        }
    }
}

/// Due once `last` is strictly older than `now - interval_days`; exactly on
/// the deadline is not yet due.
fn is_past_deadline(last: Option<DateTime<Utc>>, interval_days: i64, now: DateTime<Utc>) -> bool {
    match last {
        None => true,
        Some(at) => at < now - Duration::days(interval_days),
    }
}

pub fn is_watering_due(last_watered: Option<DateTime<Utc>>, water_level: i32, now: DateTime<Utc>) -> bool {
    is_past_deadline(last_watered, watering_interval(water_level), now)
}

pub fn is_fertilizing_due(
    last_fertilized: Option<DateTime<Utc>>,
    fertilizer_level: i32,
    now: DateTime<Utc>,
) -> bool {
    is_past_deadline(last_fertilized, fertilizing_interval(fertilizer_level), now)
}

pub fn is_care_due(kind: CareKind, last: Option<DateTime<Utc>>, level: i32, now: DateTime<Utc>) -> bool {
    is_past_deadline(last, care_interval(kind, level), now)
}
