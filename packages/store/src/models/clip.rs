use chrono::{DateTime, Utc};
use sea_orm::{IntoActiveModel, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::common::UpdateSchema;
use crate::entity::clip;

/// A time span of a recording, in seconds from its start.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Clip {
    #[serde(skip_serializing)]
    pub id: i32,
    pub uuid: Uuid,
    pub recording_id: i32,
    pub start_time: f64,
    pub end_time: f64,
    pub created_on: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateClip {
    #[serde(default = "Uuid::new_v4")]
    pub uuid: Uuid,
    pub recording_id: i32,
    pub start_time: f64,
    pub end_time: f64,
}

impl CreateClip {
    pub fn new(recording_id: i32, start_time: f64, end_time: f64) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            recording_id,
            start_time,
            end_time,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct UpdateClip {
    pub start_time: Option<f64>,
    pub end_time: Option<f64>,
}

impl From<clip::Model> for Clip {
    fn from(m: clip::Model) -> Self {
        Self {
            id: m.id,
            uuid: m.uuid,
            recording_id: m.recording_id,
            start_time: m.start_time,
            end_time: m.end_time,
            created_on: m.created_on,
        }
    }
}

impl IntoActiveModel<clip::ActiveModel> for CreateClip {
    fn into_active_model(self) -> clip::ActiveModel {
        clip::ActiveModel {
            uuid: Set(self.uuid),
            recording_id: Set(self.recording_id),
            start_time: Set(self.start_time),
            end_time: Set(self.end_time),
            created_on: Set(Utc::now()),
            ..Default::default()
        }
    }
}

impl UpdateSchema<clip::ActiveModel> for UpdateClip {
    fn apply(self, active: &mut clip::ActiveModel) {
        if let Some(start_time) = self.start_time {
            active.start_time = Set(start_time);
        }
        if let Some(end_time) = self.end_time {
            active.end_time = Set(end_time);
        }
    }
}
