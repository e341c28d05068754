use crate::schedule::{days_since, is_fertilizing_due, is_watering_due};
use crate::types::{CareKind, CareSubject, PlantCareState, PlantRecord, PlantStats};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CareNeeds {
    pub water: bool,
    pub fertilizer: bool,
}

impl CareNeeds {
    pub fn any(&self) -> bool {
        self.water || self.fertilizer
    }

    pub fn describe(&self) -> Option<String> {
        let water = CareKind::Water.gerund();
        let fertilize = CareKind::Fertilize.gerund();
        match (self.water, self.fertilizer) {
            (true, true) => Some(format!("{water} and {fertilize}")),
            (true, false) => Some(water.to_string()),
            (false, true) => Some(fertilize.to_string()),
            (false, false) => None,
        }
    }
}

pub fn care_needs(state: &PlantCareState, now: DateTime<Utc>) -> CareNeeds {
    CareNeeds {
        water: is_watering_due(state.last_watered, state.water_level, now),
        fertilizer: is_fertilizing_due(state.last_fertilized, state.fertilizer_level, now),
    }
}

/// Overdue days summed across the care types that are currently due.
pub fn neglect_score(state: &PlantCareState, now: DateTime<Utc>) -> i64 {
    let needs = care_needs(state, now);
    let water = if needs.water {
        days_since(state.last_watered, now)
    } else {
        0
    };
    let fertilizer = if needs.fertilizer {
        days_since(state.last_fertilized, now)
    } else {
        0
    };
    water + fertilizer
}

#[derive(Debug)]
pub struct NeglectReport<'a, T> {
    pub plant: Option<&'a T>,
    pub score: i64,
    pub total_plants: usize,
}

impl<T> NeglectReport<'_, T> {
    /// True when there was nothing to rank at all, as opposed to nothing due.
    pub fn is_empty_collection(&self) -> bool {
        self.total_plants == 0
    }
}

pub fn most_neglected<T: CareSubject>(plants: &[T], now: DateTime<Utc>) -> NeglectReport<'_, T> {
    let mut best: Option<(&T, i64)> = None;

    for plant in plants {
        let state = plant.care_state();
        if !care_needs(&state, now).any() {
            continue;
        }
        let score = neglect_score(&state, now);
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((plant, score)),
        }
    }

    NeglectReport {
        plant: best.map(|(plant, _)| plant),
        score: best.map(|(_, score)| score).unwrap_or(0),
        total_plants: plants.len(),
    }
}

/// Plants with at least one care type due, in input order.
pub fn plants_needing_care<T: CareSubject + Clone>(plants: &[T], now: DateTime<Utc>) -> Vec<T> {
    plants
        .iter()
        .filter(|plant| care_needs(&plant.care_state(), now).any())
        .cloned()
        .collect()
}

pub fn plant_stats<T: CareSubject>(plants: &[T], now: DateTime<Utc>) -> PlantStats {
    plants.iter().fold(
        PlantStats {
            total_plants: plants.len(),
            ..PlantStats::default()
        },
        |mut stats, plant| {
            let needs = care_needs(&plant.care_state(), now);
            if needs.water {
                stats.plants_needing_water += 1;
            }
            if needs.fertilizer {
                stats.plants_needing_fertilizer += 1;
            }
            stats
        },
    )
}

/// Banner text for a plant that needs attention, `None` if nothing is due.
pub fn attention_message(plant: &PlantRecord, now: DateTime<Utc>) -> Option<String> {
    let needs = care_needs(&plant.care_state(), now).describe()?;
    Some(format!(
        "{} ({}) at {} needs {}",
        plant.name, plant.user_id, plant.location, needs
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 9, 1, 8, 0, 0).unwrap()
    }

    fn state(water_days: Option<i64>, fert_days: Option<i64>) -> PlantCareState {
        PlantCareState {
            water_level: 3,
            fertilizer_level: 3,
            last_watered: water_days.map(|days| now() - Duration::days(days)),
            last_fertilized: fert_days.map(|days| now() - Duration::days(days)),
        }
    }

    #[test]
    fn score_is_zero_when_nothing_due() {
        // level 3: water every 4 days, fertilize every 7
        assert_eq!(neglect_score(&state(Some(4), Some(7)), now()), 0);
        assert_eq!(neglect_score(&state(Some(0), Some(0)), now()), 0);
    }

    #[test]
    fn score_sums_only_due_types() {
        assert_eq!(neglect_score(&state(Some(6), Some(3)), now()), 6);
        assert_eq!(neglect_score(&state(Some(6), Some(10)), now()), 16);
        assert_eq!(neglect_score(&state(None, Some(1)), now()), 999);
    }

    #[test]
    fn most_neglected_of_empty_or_healthy_is_none() {
        let empty: Vec<PlantCareState> = Vec::new();
        let report = most_neglected(&empty, now());
        assert!(report.plant.is_none());
        assert!(report.is_empty_collection());

        let healthy = vec![state(Some(1), Some(1))];
        let report = most_neglected(&healthy, now());
        assert!(report.plant.is_none());
        assert!(!report.is_empty_collection());
        assert_eq!(report.total_plants, 1);
    }

    #[test]
    fn ties_keep_first_encountered() {
        let a = state(Some(5), Some(1));
        let b = state(Some(9), Some(1));
        let c = state(Some(9), Some(2));
        let plants = vec![a, b, c];

        let report = most_neglected(&plants, now());
        assert!(std::ptr::eq(report.plant.unwrap(), &plants[1]));
        assert_eq!(report.score, 9);
    }

    #[test]
    fn needs_and_stats() {
        let plants = vec![
            state(Some(10), Some(1)),
            state(Some(1), Some(10)),
            state(None, None),
            state(Some(1), Some(1)),
        ];

        let due = plants_needing_care(&plants, now());
        assert_eq!(due.len(), 3);
        assert_eq!(due[0], plants[0]);

        let stats = plant_stats(&plants, now());
        assert_eq!(stats.total_plants, 4);
        assert_eq!(stats.plants_needing_water, 2);
        assert_eq!(stats.plants_needing_fertilizer, 2);
    }

    #[test]
    fn describes_needs() {
        let both = care_needs(&state(None, None), now());
        assert_eq!(both.describe().as_deref(), Some("watering and fertilizing"));
        let water = care_needs(&state(Some(5), Some(0)), now());
        assert_eq!(water.describe().as_deref(), Some("watering"));
        let fertilizer = care_needs(&state(Some(0), Some(8)), now());
        assert_eq!(fertilizer.describe().as_deref(), Some("fertilizing"));
        let none = care_needs(&state(Some(0), Some(0)), now());
        assert_eq!(none.describe(), None);
    }
}
