use crate::policy::care_interval;
use crate::schedule::{days_since, NEVER_CARED_DAYS};
use crate::store::PlantStore;
use crate::types::{CareKind, CareSubject, PlantCareState, ReCareCheck};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

pub fn check_re_care(kind: CareKind, last: Option<DateTime<Utc>>, level: i32, now: DateTime<Utc>) -> ReCareCheck {
    let interval_days = care_interval(kind, level);
    match last {
        // First care never asks for confirmation.
        None => ReCareCheck {
            needs_confirmation: false,
            days_since: NEVER_CARED_DAYS,
            interval_days,
        },
        Some(_) => {
            let days_since = days_since(last, now);
            ReCareCheck {
                needs_confirmation: days_since < interval_days,
                days_since,
                interval_days,
            }
        }
    }
}

pub fn check_watering_re_care(last_watered: Option<DateTime<Utc>>, water_level: i32, now: DateTime<Utc>) -> ReCareCheck {
    check_re_care(CareKind::Water, last_watered, water_level, now)
}

pub fn check_fertilizing_re_care(
    last_fertilized: Option<DateTime<Utc>>,
    fertilizer_level: i32,
    now: DateTime<Utc>,
) -> ReCareCheck {
    check_re_care(CareKind::Fertilize, last_fertilized, fertilizer_level, now)
}

pub fn check_state_re_care(kind: CareKind, state: &PlantCareState, now: DateTime<Utc>) -> ReCareCheck {
    check_re_care(kind, state.last_cared(kind), state.level(kind), now)
}

pub fn confirmation_message(kind: CareKind, check: &ReCareCheck) -> String {
    format!(
        "You {} this plant {} days ago, but the recommended interval is every {} days. Are you sure you want to {} it again?",
        kind.past_tense(),
        check.days_since,
        check.interval_days,
        kind.verb()
    )
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum CareOutcome {
    #[serde(rename_all = "camelCase")]
    Committed {
        plant_id: String,
        kind: CareKind,
        at: DateTime<Utc>,
    },
    #[serde(rename_all = "camelCase")]
    NeedsConfirmation {
        kind: CareKind,
        check: ReCareCheck,
        message: String,
    },
    #[serde(rename_all = "camelCase")]
    StorageFailure { kind: CareKind, reason: String },
}

impl CareOutcome {
    pub fn kind(&self) -> CareKind {
        match self {
            CareOutcome::Committed { kind, .. }
            | CareOutcome::NeedsConfirmation { kind, .. }
            | CareOutcome::StorageFailure { kind, .. } => *kind,
        }
    }

    pub fn is_committed(&self) -> bool {
        matches!(self, CareOutcome::Committed { .. })
    }

    pub fn message(&self) -> String {
        match self {
            CareOutcome::Committed { kind, .. } => format!("Plant {} successfully!", kind.past_tense()),
            CareOutcome::NeedsConfirmation { message, .. } => message.clone(),
            CareOutcome::StorageFailure { kind, .. } => format!("Failed to mark as {}", kind.past_tense()),
        }
    }
}

fn write_care<S: PlantStore + ?Sized>(store: &mut S, kind: CareKind, plant_id: &str, now: DateTime<Utc>) -> CareOutcome {
    match store.write_last_cared(plant_id, kind, now) {
        Ok(()) => {
            info!(plant_id, %kind, "care committed");
            CareOutcome::Committed {
                plant_id: plant_id.to_string(),
                kind,
                at: now,
            }
        }
        Err(error) => {
            warn!(plant_id, %kind, %error, "care write failed");
            CareOutcome::StorageFailure {
                kind,
                reason: error.to_string(),
            }
        }
    }
}

/// Records care for `plant_id` unless it is too soon and `force` is unset.
/// The store is written iff no confirmation is needed or `force` is set.
pub fn commit_care_action<S: PlantStore + ?Sized>(
    store: &mut S,
    kind: CareKind,
    plant_id: &str,
    force: bool,
    now: DateTime<Utc>,
) -> CareOutcome {
    let plant = match store.read_plant(plant_id) {
        Ok(Some(plant)) => plant,
        Ok(None) => {
            warn!(plant_id, %kind, "care requested for unknown plant");
            return CareOutcome::StorageFailure {
                kind,
                reason: format!("plant not found: {plant_id}"),
            };
        }
        Err(error) => {
            warn!(plant_id, %kind, %error, "care lookup failed");
            return CareOutcome::StorageFailure {
                kind,
                reason: error.to_string(),
            };
        }
    };

    let state = plant.care_state();
    let check = check_state_re_care(kind, &state, now);
    if check.needs_confirmation && !force {
        return CareOutcome::NeedsConfirmation {
            kind,
            message: confirmation_message(kind, &check),
            check,
        };
    }

    write_care(store, kind, plant_id, now)
}

/// Records care without consulting the interval.
pub fn mark_cared<S: PlantStore + ?Sized>(store: &mut S, kind: CareKind, plant_id: &str, now: DateTime<Utc>) -> CareOutcome {
    write_care(store, kind, plant_id, now)
}
