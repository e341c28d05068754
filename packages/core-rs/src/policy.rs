use crate::types::CareKind;

/// Days between waterings for levels 1..=5.
pub const WATERING_INTERVALS: [i64; 5] = [7, 5, 4, 2, 1];
/// Days between fertilizings for levels 1..=5.
pub const FERTILIZING_INTERVALS: [i64; 5] = [14, 10, 7, 5, 3];

pub const DEFAULT_WATERING_INTERVAL: i64 = 3;
pub const DEFAULT_FERTILIZING_INTERVAL: i64 = 7;

fn lookup(table: &[i64; 5], level: i32, fallback: i64) -> i64 {
    usize::try_from(level)
        .ok()
        .and_then(|level| level.checked_sub(1))
        .and_then(|index| table.get(index))
        .copied()
        .unwrap_or(fallback)
}

pub fn watering_interval(level: i32) -> i64 {
    lookup(&WATERING_INTERVALS, level, DEFAULT_WATERING_INTERVAL)
}

pub fn fertilizing_interval(level: i32) -> i64 {
    lookup(&FERTILIZING_INTERVALS, level, DEFAULT_FERTILIZING_INTERVAL)
}

pub fn care_interval(kind: CareKind, level: i32) -> i64 {
    match kind {
        CareKind::Water => watering_interval(level),
        CareKind::Fertilize => fertilizing_interval(level),
    }
}
