use chrono::{DateTime, Utc};
use sea_orm::{IntoActiveModel, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::clip_annotation;

/// Annotations made on a clip: tags, notes and sound event annotations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClipAnnotation {
    #[serde(skip_serializing)]
    pub id: i32,
    pub uuid: Uuid,
    pub clip_id: i32,
    pub created_on: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateClipAnnotation {
    #[serde(default = "Uuid::new_v4")]
    pub uuid: Uuid,
    pub clip_id: i32,
}

impl CreateClipAnnotation {
    pub fn new(clip_id: i32) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            clip_id,
        }
    }
}

impl From<clip_annotation::Model> for ClipAnnotation {
    fn from(m: clip_annotation::Model) -> Self {
        Self {
            id: m.id,
            uuid: m.uuid,
            clip_id: m.clip_id,
            created_on: m.created_on,
        }
    }
}

impl IntoActiveModel<clip_annotation::ActiveModel> for CreateClipAnnotation {
    fn into_active_model(self) -> clip_annotation::ActiveModel {
        clip_annotation::ActiveModel {
            uuid: Set(self.uuid),
            clip_id: Set(self.clip_id),
            created_on: Set(Utc::now()),
            ..Default::default()
        }
    }
}
