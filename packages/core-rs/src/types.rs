use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CareKind {
    Water,
    Fertilize,
}

impl CareKind {
    pub fn verb(self) -> &'static str {
        match self {
            CareKind::Water => "water",
            CareKind::Fertilize => "fertilize",
        }
    }

    pub fn past_tense(self) -> &'static str {
        match self {
            CareKind::Water => "watered",
            CareKind::Fertilize => "fertilized",
        }
    }

    pub fn gerund(self) -> &'static str {
        match self {
            CareKind::Water => "watering",
            CareKind::Fertilize => "fertilizing",
        }
    }
}

impl fmt::Display for CareKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())
    }
}

/// The slice of a plant the scheduling rules look at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantCareState {
    pub water_level: i32,
    pub fertilizer_level: i32,
    pub last_watered: Option<DateTime<Utc>>,
    pub last_fertilized: Option<DateTime<Utc>>,
}

impl PlantCareState {
    pub fn last_cared(&self, kind: CareKind) -> Option<DateTime<Utc>> {
        match kind {
            CareKind::Water => self.last_watered,
            CareKind::Fertilize => self.last_fertilized,
        }
    }

    pub fn level(&self, kind: CareKind) -> i32 {
        match kind {
            CareKind::Water => self.water_level,
            CareKind::Fertilize => self.fertilizer_level,
        }
    }
}

/// Anything the neglect ranking can evaluate.
pub trait CareSubject {
    fn care_state(&self) -> PlantCareState;
}

impl CareSubject for PlantCareState {
    fn care_state(&self) -> PlantCareState {
        self.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub scientific_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(default)]
    pub plant_type: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perma_people_description: Option<String>,
    pub sunlight_level: i32,
    pub water_level: i32,
    pub fertilizer_level: i32,
    #[serde(default)]
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wikipedia_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perma_people_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_watered: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_fertilized: Option<DateTime<Utc>>,
}

impl PlantRecord {
    pub fn display_name(&self) -> &str {
        self.nickname
            .as_deref()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or(&self.name)
    }

    /// Local photo first, then the plant database image, then Wikipedia.
    pub fn display_image(&self) -> Option<&str> {
        self.image_uri
            .as_deref()
            .or(self.api_image_url.as_deref())
            .or(self.wikipedia_image_url.as_deref())
    }

    pub fn set_last_cared(&mut self, kind: CareKind, at: DateTime<Utc>) {
        match kind {
            CareKind::Water => self.last_watered = Some(at),
            CareKind::Fertilize => self.last_fertilized = Some(at),
        }
    }
}

impl CareSubject for PlantRecord {
    fn care_state(&self) -> PlantCareState {
        PlantCareState {
            water_level: self.water_level,
            fertilizer_level: self.fertilizer_level,
            last_watered: self.last_watered,
            last_fertilized: self.last_fertilized,
        }
    }
}

/// A plant as entered by the user, before the store assigns `id` and `createdAt`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPlant {
    pub name: String,
    #[serde(default)]
    pub scientific_name: String,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub plant_type: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub perma_people_description: Option<String>,
    pub sunlight_level: i32,
    pub water_level: i32,
    pub fertilizer_level: i32,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub image_uri: Option<String>,
    #[serde(default)]
    pub api_image_url: Option<String>,
    #[serde(default)]
    pub wikipedia_image_url: Option<String>,
    #[serde(default)]
    pub perma_people_id: Option<i64>,
    #[serde(default)]
    pub last_watered: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_fertilized: Option<DateTime<Utc>>,
}

impl NewPlant {
    pub fn into_record(self, id: String, created_at: DateTime<Utc>) -> PlantRecord {
        PlantRecord {
            id,
            name: self.name,
            scientific_name: self.scientific_name,
            nickname: self.nickname,
            plant_type: self.plant_type,
            location: self.location,
            description: self.description,
            perma_people_description: self.perma_people_description,
            sunlight_level: self.sunlight_level,
            water_level: self.water_level,
            fertilizer_level: self.fertilizer_level,
            user_id: self.user_id,
            image_uri: self.image_uri,
            api_image_url: self.api_image_url,
            wikipedia_image_url: self.wikipedia_image_url,
            perma_people_id: self.perma_people_id,
            created_at,
            last_watered: self.last_watered,
            last_fertilized: self.last_fertilized,
        }
    }
}

/// Partial edit of a stored plant; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantUpdate {
    pub name: Option<String>,
    pub nickname: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub sunlight_level: Option<i32>,
    pub water_level: Option<i32>,
    pub fertilizer_level: Option<i32>,
    pub image_uri: Option<String>,
    pub last_watered: Option<DateTime<Utc>>,
    pub last_fertilized: Option<DateTime<Utc>>,
}

impl PlantUpdate {
    pub fn apply(self, plant: &mut PlantRecord) {
        if let Some(name) = self.name {
            plant.name = name;
        }
        if let Some(nickname) = self.nickname {
            plant.nickname = Some(nickname);
        }
        if let Some(location) = self.location {
            plant.location = location;
        }
        if let Some(description) = self.description {
            plant.description = description;
        }
        if let Some(level) = self.sunlight_level {
            plant.sunlight_level = level;
        }
        if let Some(level) = self.water_level {
            plant.water_level = level;
        }
        if let Some(level) = self.fertilizer_level {
            plant.fertilizer_level = level;
        }
        if let Some(uri) = self.image_uri {
            plant.image_uri = Some(uri);
        }
        if let Some(at) = self.last_watered {
            plant.last_watered = Some(at);
        }
        if let Some(at) = self.last_fertilized {
            plant.last_fertilized = Some(at);
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantStats {
    pub total_plants: usize,
    pub plants_needing_water: usize,
    pub plants_needing_fertilizer: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReCareCheck {
    pub needs_confirmation: bool,
    pub days_since: i64,
    pub interval_days: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_record_without_care_history() {
        let json = r#"{
            "id": "1700000000000abc123def",
            "name": "Monstera",
            "scientificName": "Monstera deliciosa",
            "plantType": "Indoor",
            "location": "Living room",
            "description": "",
            "sunlightLevel": 3,
            "waterLevel": 2,
            "fertilizerLevel": 4,
            "userId": "Anna",
            "createdAt": "2024-05-01T10:00:00.000Z"
        }"#;

        let plant: PlantRecord = serde_json::from_str(json).unwrap();
        assert_eq!(plant.scientific_name, "Monstera deliciosa");
        assert_eq!(plant.last_watered, None);
        assert_eq!(plant.care_state().fertilizer_level, 4);
    }

    #[test]
    fn care_kind_vocabulary() {
        assert_eq!(CareKind::Water.to_string(), "water");
        assert_eq!(CareKind::Water.gerund(), "watering");
        assert_eq!(CareKind::Fertilize.past_tense(), "fertilized");
        assert_eq!(CareKind::Fertilize.gerund(), "fertilizing");
    }

    #[test]
    fn display_helpers_follow_priority() {
        let mut plant = NewPlant {
            name: "Ficus".to_string(),
            water_level: 3,
            fertilizer_level: 3,
            sunlight_level: 3,
            wikipedia_image_url: Some("wiki.jpg".to_string()),
            api_image_url: Some("api.jpg".to_string()),
            ..NewPlant::default()
        }
        .into_record("p1".to_string(), Utc::now());

        assert_eq!(plant.display_name(), "Ficus");
        assert_eq!(plant.display_image(), Some("api.jpg"));

        plant.nickname = Some("Fred".to_string());
        plant.image_uri = Some("local.jpg".to_string());
        assert_eq!(plant.display_name(), "Fred");
        assert_eq!(plant.display_image(), Some("local.jpg"));
    }

    #[test]
    fn update_touches_only_given_fields() {
        let mut plant = NewPlant {
            name: "Aloe".to_string(),
            location: "Kitchen".to_string(),
            water_level: 1,
            fertilizer_level: 1,
            sunlight_level: 5,
            ..NewPlant::default()
        }
        .into_record("p2".to_string(), Utc::now());

        PlantUpdate {
            water_level: Some(2),
            ..PlantUpdate::default()
        }
        .apply(&mut plant);

        assert_eq!(plant.water_level, 2);
        assert_eq!(plant.location, "Kitchen");
    }
}
