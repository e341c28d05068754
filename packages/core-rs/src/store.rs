use crate::config::CareConfig;
use crate::error::StoreError;
use crate::types::{CareKind, NewPlant, PlantRecord, PlantUpdate};
use chrono::{DateTime, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const STORE_VERSION: u8 = 1;

/// Persistence for the plant collection. Implementors only load and persist
/// the whole collection; the per-plant operations are built on top.
pub trait PlantStore {
    fn load(&self) -> Result<Vec<PlantRecord>, StoreError>;

    fn persist(&mut self, plants: &[PlantRecord]) -> Result<(), StoreError>;

    fn read_all_plants(&self) -> Result<Vec<PlantRecord>, StoreError> {
        self.load()
    }

    fn read_plant(&self, id: &str) -> Result<Option<PlantRecord>, StoreError> {
        Ok(self.load()?.into_iter().find(|plant| plant.id == id))
    }

    fn user_plants(&self, user_id: &str) -> Result<Vec<PlantRecord>, StoreError> {
        Ok(self
            .load()?
            .into_iter()
            .filter(|plant| plant.user_id == user_id)
            .collect())
    }

    fn write_last_cared(&mut self, id: &str, kind: CareKind, at: DateTime<Utc>) -> Result<(), StoreError> {
        let mut plants = self.load()?;
        let plant = plants
            .iter_mut()
            .find(|plant| plant.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        plant.set_last_cared(kind, at);
        self.persist(&plants)?;
        debug!(plant_id = id, %kind, %at, "recorded care");
        Ok(())
    }

    fn save_plant(&mut self, plant: NewPlant, now: DateTime<Utc>) -> Result<PlantRecord, StoreError> {
        let mut plants = self.load()?;
        let record = plant.into_record(generate_plant_id(now), now);
        plants.push(record.clone());
        self.persist(&plants)?;
        info!(plant_id = %record.id, name = %record.name, "saved plant");
        Ok(record)
    }

    fn update_plant(&mut self, id: &str, update: PlantUpdate) -> Result<PlantRecord, StoreError> {
        let mut plants = self.load()?;
        let plant = plants
            .iter_mut()
            .find(|plant| plant.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        update.apply(plant);
        let updated = plant.clone();
        self.persist(&plants)?;
        Ok(updated)
    }

    /// Removes the plant if present; returns whether anything was removed.
    fn delete_plant(&mut self, id: &str) -> Result<bool, StoreError> {
        let mut plants = self.load()?;
        let before = plants.len();
        plants.retain(|plant| plant.id != id);
        if plants.len() == before {
            return Ok(false);
        }
        self.persist(&plants)?;
        info!(plant_id = id, "deleted plant");
        Ok(true)
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.persist(&[])
    }
}

/// Creation millis followed by nine random lowercase alphanumerics.
pub fn generate_plant_id(now: DateTime<Utc>) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(9)
        .map(|byte| char::from(byte).to_ascii_lowercase())
        .collect();
    format!("{}{suffix}", now.timestamp_millis())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreFile {
    pub version: u8,
    pub plants: Vec<PlantRecord>,
}

impl Default for StoreFile {
    fn default() -> Self {
        Self {
            version: STORE_VERSION,
            plants: Vec::new(),
        }
    }
}

/// The whole collection kept as one JSON document on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &CareConfig) -> Self {
        Self::new(config.resolve_store_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|value| value.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl PlantStore for JsonFileStore {
    fn load(&self) -> Result<Vec<PlantRecord>, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no plant store yet");
                return Ok(Vec::new());
            }
            Err(error) => return Err(error.into()),
        };

        let file: StoreFile = serde_json::from_str(&contents).map_err(|error| {
            warn!(path = %self.path.display(), %error, "plant store failed to parse");
            StoreError::from(error)
        })?;
        Ok(file.plants)
    }

    fn persist(&mut self, plants: &[PlantRecord]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let file = StoreFile {
            version: STORE_VERSION,
            plants: plants.to_vec(),
        };
        let data = serde_json::to_string_pretty(&file)?;

        // Replace in one step so a failed write leaves the old file intact.
        let temp = self.temp_path();
        fs::write(&temp, data)?;
        if let Err(error) = fs::rename(&temp, &self.path) {
            let _ = fs::remove_file(&temp);
            return Err(error.into());
        }
        debug!(path = %self.path.display(), count = plants.len(), "persisted plants");
        Ok(())
    }
}

/// In-memory store for tests and previews. Writes can be made to fail.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    plants: Vec<PlantRecord>,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_plants(plants: Vec<PlantRecord>) -> Self {
        Self {
            plants,
            fail_writes: false,
        }
    }

    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    pub fn plants(&self) -> &[PlantRecord] {
        &self.plants
    }
}

impl PlantStore for MemoryStore {
    fn load(&self) -> Result<Vec<PlantRecord>, StoreError> {
        Ok(self.plants.clone())
    }

    fn persist(&mut self, plants: &[PlantRecord]) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Unavailable("writes disabled".to_string()));
        }
        self.plants = plants.to_vec();
        Ok(())
    }
}
