use chrono::{DateTime, Utc};
use sea_orm::{IntoActiveModel, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::clip_prediction;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClipPrediction {
    #[serde(skip_serializing)]
    pub id: i32,
    pub uuid: Uuid,
    pub clip_id: i32,
    pub created_on: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateClipPrediction {
    #[serde(default = "Uuid::new_v4")]
    pub uuid: Uuid,
    pub clip_id: i32,
}

impl CreateClipPrediction {
    pub fn new(clip_id: i32) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            clip_id,
        }
    }
}

impl From<clip_prediction::Model> for ClipPrediction {
    fn from(m: clip_prediction::Model) -> Self {
        Self {
            id: m.id,
            uuid: m.uuid,
            clip_id: m.clip_id,
            created_on: m.created_on,
        }
    }
}

impl IntoActiveModel<clip_prediction::ActiveModel> for CreateClipPrediction {
    fn into_active_model(self) -> clip_prediction::ActiveModel {
        clip_prediction::ActiveModel {
            uuid: Set(self.uuid),
            clip_id: Set(self.clip_id),
            created_on: Set(Utc::now()),
            ..Default::default()
        }
    }
}
