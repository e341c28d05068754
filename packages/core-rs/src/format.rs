use crate::schedule::days_since;
use crate::types::CareKind;
use chrono::{DateTime, Duration, Utc};

pub fn days_ago_label(last: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    if last.is_none() {
        return "Never".to_string();
    }
    match days_since(last, now) {
        0 => "Today".to_string(),
        1 => "1 day ago".to_string(),
        days => format!("{days} days ago"),
    }
}

/// Wording used on care cards, e.g. "never watered" or "4 days ago".
pub fn care_since_label(kind: CareKind, last: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    match last {
        None => format!("never {}", kind.past_tense()),
        Some(_) => format!("{} days ago", days_since(last, now)),
    }
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("{count} {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}

pub fn relative_time_label(at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(at) = at else {
        return "Never".to_string();
    };

    let elapsed = now.signed_duration_since(at);
    let minutes = elapsed.num_milliseconds().div_euclid(1000 * 60);
    let hours = elapsed.num_milliseconds().div_euclid(1000 * 60 * 60);
    let days = days_since(Some(at), now);

    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < 60 {
        plural(minutes, "minute")
    } else if hours < 24 {
        plural(hours, "hour")
    } else if days == 1 {
        "Yesterday".to_string()
    } else {
        format!("{days} days ago")
    }
}

/// Same UTC calendar date as `now`.
pub fn is_today(at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    at.is_some_and(|at| at.date_naive() == now.date_naive())
}

/// `at` is no older than `days` before `now`. A cutoff outside the
/// representable range counts every timestamp as within.
pub fn is_within_days(at: Option<DateTime<Utc>>, days: i64, now: DateTime<Utc>) -> bool {
    let Some(at) = at else {
        return false;
    };
    match Duration::try_days(days).and_then(|span| now.checked_sub_signed(span)) {
        Some(cutoff) => at >= cutoff,
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 18, 30, 0).unwrap()
    }

    #[test]
    fn days_ago_wording() {
        assert_eq!(days_ago_label(None, now()), "Never");
        assert_eq!(days_ago_label(Some(now() - Duration::hours(5)), now()), "Today");
        assert_eq!(days_ago_label(Some(now() - Duration::hours(30)), now()), "1 day ago");
        assert_eq!(days_ago_label(Some(now() - Duration::days(6)), now()), "6 days ago");
    }

    #[test]
    fn care_card_wording() {
        assert_eq!(care_since_label(CareKind::Water, None, now()), "never watered");
        assert_eq!(care_since_label(CareKind::Fertilize, None, now()), "never fertilized");
        assert_eq!(
            care_since_label(CareKind::Water, Some(now() - Duration::days(1)), now()),
            "1 days ago"
        );
    }

    #[test]
    fn relative_time_steps() {
        let label = |delta: Duration| relative_time_label(Some(now() - delta), now());
        assert_eq!(relative_time_label(None, now()), "Never");
        assert_eq!(label(Duration::seconds(20)), "Just now");
        assert_eq!(label(Duration::minutes(1)), "1 minute ago");
        assert_eq!(label(Duration::minutes(45)), "45 minutes ago");
        assert_eq!(label(Duration::hours(1)), "1 hour ago");
        assert_eq!(label(Duration::hours(23)), "23 hours ago");
        assert_eq!(label(Duration::hours(25)), "Yesterday");
        assert_eq!(label(Duration::days(4)), "4 days ago");
    }

    #[test]
    fn calendar_checks() {
        assert!(is_today(Some(now() - Duration::hours(18)), now()));
        assert!(!is_today(Some(now() - Duration::hours(19)), now()));
        assert!(!is_today(None, now()));

        assert!(is_within_days(Some(now() - Duration::days(7)), 7, now()));
        assert!(!is_within_days(Some(now() - Duration::days(8)), 7, now()));
        assert!(!is_within_days(None, 7, now()));
    }

    #[test]
    fn within_days_handles_extreme_spans() {
        assert!(is_within_days(Some(now()), i64::MAX, now()));
        assert!(is_within_days(Some(now()), i64::MIN, now()));
        assert!(!is_within_days(None, i64::MAX, now()));
    }
}
