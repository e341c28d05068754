use crate::confirm::{check_state_re_care, commit_care_action, mark_cared, CareOutcome};
use crate::error::StoreError;
use crate::neglect::{attention_message, most_neglected, plant_stats, plants_needing_care};
use crate::store::PlantStore;
use crate::types::{CareKind, CareSubject, PlantRecord, PlantStats, ReCareCheck};
use chrono::{DateTime, Utc};
use tracing::debug;

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Owned result of ranking the stored collection.
#[derive(Debug, Clone, PartialEq)]
pub struct MostNeglected {
    pub plant: Option<PlantRecord>,
    pub score: i64,
    pub total_plants: usize,
    pub message: Option<String>,
}

impl MostNeglected {
    pub fn is_empty_collection(&self) -> bool {
        self.total_plants == 0
    }
}

pub struct CareService<S, C = SystemClock> {
    store: S,
    clock: C,
}

impl<S: PlantStore> CareService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            clock: SystemClock,
        }
    }
}

impl<S: PlantStore, C: Clock> CareService<S, C> {
    pub fn with_clock(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn check_re_care(&self, kind: CareKind, plant_id: &str) -> Result<ReCareCheck, StoreError> {
        let plant = self
            .store
            .read_plant(plant_id)?
            .ok_or_else(|| StoreError::NotFound(plant_id.to_string()))?;
        Ok(check_state_re_care(kind, &plant.care_state(), self.clock.now()))
    }

    pub fn commit_care_action(&mut self, kind: CareKind, plant_id: &str, force: bool) -> CareOutcome {
        let now = self.clock.now();
        commit_care_action(&mut self.store, kind, plant_id, force, now)
    }

    pub fn mark_cared(&mut self, kind: CareKind, plant_id: &str) -> CareOutcome {
        let now = self.clock.now();
        mark_cared(&mut self.store, kind, plant_id, now)
    }

    pub fn most_neglected(&self) -> Result<MostNeglected, StoreError> {
        let now = self.clock.now();
        let plants = self.store.read_all_plants()?;
        let report = most_neglected(&plants, now);
        debug!(total = report.total_plants, score = report.score, "ranked plants");

        Ok(MostNeglected {
            message: report.plant.and_then(|plant| attention_message(plant, now)),
            plant: report.plant.cloned(),
            score: report.score,
            total_plants: report.total_plants,
        })
    }

    pub fn plants_needing_care(&self) -> Result<Vec<PlantRecord>, StoreError> {
        let plants = self.store.read_all_plants()?;
        Ok(plants_needing_care(&plants, self.clock.now()))
    }

    /// Stats across every plant, or only those owned by `user_id`.
    pub fn stats(&self, user_id: Option<&str>) -> Result<PlantStats, StoreError> {
        let plants = match user_id {
            Some(user_id) => self.store.user_plants(user_id)?,
            None => self.store.read_all_plants()?,
        };
        Ok(plant_stats(&plants, self.clock.now()))
    }
}
