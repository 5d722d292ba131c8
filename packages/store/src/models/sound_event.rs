use chrono::{DateTime, Utc};
use sea_orm::{IntoActiveModel, Set};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::api::common::UpdateSchema;
use crate::entity::sound_event;

/// A region of a recording's spectrogram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// e.g. `"TimeInterval"` or `"BoundingBox"`.
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: Value,
}

impl Geometry {
    pub fn new(kind: impl Into<String>, coordinates: Value) -> Self {
        Self {
            kind: kind.into(),
            coordinates,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SoundEvent {
    #[serde(skip_serializing)]
    pub id: i32,
    pub uuid: Uuid,
    pub recording_id: i32,
    pub geometry: Geometry,
    pub created_on: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSoundEvent {
    #[serde(default = "Uuid::new_v4")]
    pub uuid: Uuid,
    pub recording_id: i32,
    pub geometry: Geometry,
}

impl CreateSoundEvent {
    pub fn new(recording_id: i32, geometry: Geometry) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            recording_id,
            geometry,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct UpdateSoundEvent {
    pub geometry: Option<Geometry>,
}

impl From<sound_event::Model> for SoundEvent {
    fn from(m: sound_event::Model) -> Self {
        Self {
            id: m.id,
            uuid: m.uuid,
            recording_id: m.recording_id,
            geometry: Geometry {
                kind: m.geometry_type,
                coordinates: m.geometry,
            },
            created_on: m.created_on,
        }
    }
}

impl IntoActiveModel<sound_event::ActiveModel> for CreateSoundEvent {
    fn into_active_model(self) -> sound_event::ActiveModel {
        sound_event::ActiveModel {
            uuid: Set(self.uuid),
            recording_id: Set(self.recording_id),
            geometry_type: Set(self.geometry.kind),
            geometry: Set(self.geometry.coordinates),
            created_on: Set(Utc::now()),
            ..Default::default()
        }
    }
}

impl UpdateSchema<sound_event::ActiveModel> for UpdateSoundEvent {
    fn apply(self, active: &mut sound_event::ActiveModel) {
        if let Some(geometry) = self.geometry {
            active.geometry_type = Set(geometry.kind);
            active.geometry = Set(geometry.coordinates);
        }
    }
}
