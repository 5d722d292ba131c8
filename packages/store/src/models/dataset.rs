use chrono::{DateTime, Utc};
use sea_orm::{IntoActiveModel, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::common::UpdateSchema;
use crate::entity::dataset;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dataset {
    #[serde(skip_serializing)]
    pub id: i32,
    pub uuid: Uuid,
    pub name: String,
    pub description: String,
    pub audio_dir: String,
    pub created_on: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateDataset {
    #[serde(default = "Uuid::new_v4")]
    pub uuid: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub audio_dir: String,
}

impl CreateDataset {
    pub fn new(name: impl Into<String>, audio_dir: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
            description: String::new(),
            audio_dir: audio_dir.into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct UpdateDataset {
    pub name: Option<String>,
    pub description: Option<String>,
    pub audio_dir: Option<String>,
}

impl From<dataset::Model> for Dataset {
    fn from(m: dataset::Model) -> Self {
        Self {
            id: m.id,
            uuid: m.uuid,
            name: m.name,
            description: m.description,
            audio_dir: m.audio_dir,
            created_on: m.created_on,
        }
    }
}

impl IntoActiveModel<dataset::ActiveModel> for CreateDataset {
    fn into_active_model(self) -> dataset::ActiveModel {
        dataset::ActiveModel {
            uuid: Set(self.uuid),
            name: Set(self.name),
            description: Set(self.description),
            audio_dir: Set(self.audio_dir),
            created_on: Set(Utc::now()),
            ..Default::default()
        }
    }
}

impl UpdateSchema<dataset::ActiveModel> for UpdateDataset {
    fn apply(self, active: &mut dataset::ActiveModel) {
        if let Some(name) = self.name {
            active.name = Set(name);
        }
        if let Some(description) = self.description {
            active.description = Set(description);
        }
        if let Some(audio_dir) = self.audio_dir {
            active.audio_dir = Set(audio_dir);
        }
    }
}
