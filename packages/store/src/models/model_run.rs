use chrono::{DateTime, Utc};
use sea_orm::{IntoActiveModel, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::common::UpdateSchema;
use crate::entity::model_run;

/// One execution of a named, versioned model over a set of clips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelRun {
    #[serde(skip_serializing)]
    pub id: i32,
    pub uuid: Uuid,
    pub name: String,
    pub version: String,
    pub description: String,
    pub created_on: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateModelRun {
    #[serde(default = "Uuid::new_v4")]
    pub uuid: Uuid,
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub description: String,
}

impl CreateModelRun {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
            version: version.into(),
            description: String::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct UpdateModelRun {
    pub description: Option<String>,
}

impl From<model_run::Model> for ModelRun {
    fn from(m: model_run::Model) -> Self {
        Self {
            id: m.id,
            uuid: m.uuid,
            name: m.name,
            version: m.version,
            description: m.description,
            created_on: m.created_on,
        }
    }
}

impl IntoActiveModel<model_run::ActiveModel> for CreateModelRun {
    fn into_active_model(self) -> model_run::ActiveModel {
        model_run::ActiveModel {
            uuid: Set(self.uuid),
            name: Set(self.name),
            version: Set(self.version),
            description: Set(self.description),
            created_on: Set(Utc::now()),
            ..Default::default()
        }
    }
}

impl UpdateSchema<model_run::ActiveModel> for UpdateModelRun {
    fn apply(self, active: &mut model_run::ActiveModel) {
        if let Some(description) = self.description {
            active.description = Set(description);
        }
    }
}
