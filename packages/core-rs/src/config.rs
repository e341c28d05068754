use dirs::data_dir;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

pub const STORE_PATH_ENV: &str = "PLANTCARE_STORE_PATH";
const APP_DIR: &str = "plantcare";
const STORE_FILE: &str = "plants.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareConfig {
    #[serde(default)]
    pub store_path: Option<PathBuf>,
}

impl CareConfig {
    pub fn from_env() -> Self {
        Self {
            store_path: env::var_os(STORE_PATH_ENV)
                .filter(|value| !value.is_empty())
                .map(PathBuf::from),
        }
    }

    /// Explicit path, else the per-user data dir, else the working directory.
    pub fn resolve_store_path(&self) -> PathBuf {
        if let Some(path) = &self.store_path {
            return path.clone();
        }
        data_dir()
            .map(|dir| dir.join(APP_DIR).join(STORE_FILE))
            .unwrap_or_else(|| PathBuf::from(STORE_FILE))
    }
}
