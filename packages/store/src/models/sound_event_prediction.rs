use chrono::{DateTime, Utc};
use sea_orm::{IntoActiveModel, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::common::UpdateSchema;
use crate::entity::sound_event_prediction;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SoundEventPrediction {
    #[serde(skip_serializing)]
    pub id: i32,
    pub uuid: Uuid,
    pub clip_prediction_id: i32,
    pub sound_event_id: i32,
    pub score: f64,
    pub created_on: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSoundEventPrediction {
    #[serde(default = "Uuid::new_v4")]
    pub uuid: Uuid,
    pub clip_prediction_id: i32,
    pub sound_event_id: i32,
    pub score: f64,
}

impl CreateSoundEventPrediction {
    pub fn new(clip_prediction_id: i32, sound_event_id: i32, score: f64) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            clip_prediction_id,
            sound_event_id,
            score,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct UpdateSoundEventPrediction {
    pub score: Option<f64>,
}

impl From<sound_event_prediction::Model> for SoundEventPrediction {
    fn from(m: sound_event_prediction::Model) -> Self {
        Self {
            id: m.id,
            uuid: m.uuid,
            clip_prediction_id: m.clip_prediction_id,
            sound_event_id: m.sound_event_id,
            score: m.score,
            created_on: m.created_on,
        }
    }
}

impl IntoActiveModel<sound_event_prediction::ActiveModel> for CreateSoundEventPrediction {
    fn into_active_model(self) -> sound_event_prediction::ActiveModel {
        sound_event_prediction::ActiveModel {
            uuid: Set(self.uuid),
            clip_prediction_id: Set(self.clip_prediction_id),
            sound_event_id: Set(self.sound_event_id),
            score: Set(self.score),
            created_on: Set(Utc::now()),
            ..Default::default()
        }
    }
}

impl UpdateSchema<sound_event_prediction::ActiveModel> for UpdateSoundEventPrediction {
    fn apply(self, active: &mut sound_event_prediction::ActiveModel) {
        if let Some(score) = self.score {
            active.score = Set(score);
        }
    }
}
