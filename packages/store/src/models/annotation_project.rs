use chrono::{DateTime, Utc};
use sea_orm::{IntoActiveModel, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::shared::double_option;
use crate::api::common::UpdateSchema;
use crate::entity::annotation_project;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotationProject {
    #[serde(skip_serializing)]
    pub id: i32,
    pub uuid: Uuid,
    pub name: String,
    pub description: String,
    pub annotation_instructions: Option<String>,
    pub created_on: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAnnotationProject {
    #[serde(default = "Uuid::new_v4")]
    pub uuid: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub annotation_instructions: Option<String>,
}

impl CreateAnnotationProject {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
            description: description.into(),
            annotation_instructions: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct UpdateAnnotationProject {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub annotation_instructions: Option<Option<String>>,
}

impl From<annotation_project::Model> for AnnotationProject {
    fn from(m: annotation_project::Model) -> Self {
        Self {
            id: m.id,
            uuid: m.uuid,
            name: m.name,
            description: m.description,
            annotation_instructions: m.annotation_instructions,
            created_on: m.created_on,
        }
    }
}

impl IntoActiveModel<annotation_project::ActiveModel> for CreateAnnotationProject {
    fn into_active_model(self) -> annotation_project::ActiveModel {
        annotation_project::ActiveModel {
            uuid: Set(self.uuid),
            name: Set(self.name),
            description: Set(self.description),
            annotation_instructions: Set(self.annotation_instructions),
            created_on: Set(Utc::now()),
            ..Default::default()
        }
    }
}

impl UpdateSchema<annotation_project::ActiveModel> for UpdateAnnotationProject {
    fn apply(self, active: &mut annotation_project::ActiveModel) {
        if let Some(name) = self.name {
            active.name = Set(name);
        }
        if let Some(description) = self.description {
            active.description = Set(description);
        }
        if let Some(instructions) = self.annotation_instructions {
            active.annotation_instructions = Set(instructions);
        }
    }
}
