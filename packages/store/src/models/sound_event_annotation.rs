use chrono::{DateTime, Utc};
use sea_orm::{IntoActiveModel, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::sound_event_annotation;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SoundEventAnnotation {
    #[serde(skip_serializing)]
    pub id: i32,
    pub uuid: Uuid,
    pub clip_annotation_id: i32,
    pub sound_event_id: i32,
    pub created_by_id: Option<i32>,
    pub created_on: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSoundEventAnnotation {
    #[serde(default = "Uuid::new_v4")]
    pub uuid: Uuid,
    pub clip_annotation_id: i32,
    pub sound_event_id: i32,
    pub created_by_id: Option<i32>,
}

impl CreateSoundEventAnnotation {
    pub fn new(clip_annotation_id: i32, sound_event_id: i32) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            clip_annotation_id,
            sound_event_id,
            created_by_id: None,
        }
    }
}

impl From<sound_event_annotation::Model> for SoundEventAnnotation {
    fn from(m: sound_event_annotation::Model) -> Self {
        Self {
            id: m.id,
            uuid: m.uuid,
            clip_annotation_id: m.clip_annotation_id,
            sound_event_id: m.sound_event_id,
            created_by_id: m.created_by_id,
            created_on: m.created_on,
        }
    }
}

impl IntoActiveModel<sound_event_annotation::ActiveModel> for CreateSoundEventAnnotation {
    fn into_active_model(self) -> sound_event_annotation::ActiveModel {
        sound_event_annotation::ActiveModel {
            uuid: Set(self.uuid),
            clip_annotation_id: Set(self.clip_annotation_id),
            sound_event_id: Set(self.sound_event_id),
            created_by_id: Set(self.created_by_id),
            created_on: Set(Utc::now()),
            ..Default::default()
        }
    }
}
