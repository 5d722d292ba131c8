use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sea_orm::{IntoActiveModel, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::shared::double_option;
use crate::api::common::UpdateSchema;
use crate::entity::recording;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recording {
    #[serde(skip_serializing)]
    pub id: i32,
    pub uuid: Uuid,
    pub path: String,
    pub hash: Option<String>,
    pub duration: f64,
    pub channels: i32,
    pub samplerate: i32,
    pub time_expansion: f64,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub rights: Option<String>,
    pub created_on: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateRecording {
    #[serde(default = "Uuid::new_v4")]
    pub uuid: Uuid,
    pub path: String,
    pub hash: Option<String>,
    pub duration: f64,
    pub channels: i32,
    pub samplerate: i32,
    #[serde(default = "default_time_expansion")]
    pub time_expansion: f64,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub rights: Option<String>,
}

fn default_time_expansion() -> f64 {
    1.0
}

impl CreateRecording {
    pub fn new(path: impl Into<String>, duration: f64, samplerate: i32, channels: i32) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            path: path.into(),
            hash: None,
            duration,
            channels,
            samplerate,
            time_expansion: default_time_expansion(),
            date: None,
            time: None,
            latitude: None,
            longitude: None,
            rights: None,
        }
    }
}

/// Partial update. Nullable columns use `Some(None)` to clear a value.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct UpdateRecording {
    pub path: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub hash: Option<Option<String>>,
    pub duration: Option<f64>,
    pub channels: Option<i32>,
    pub samplerate: Option<i32>,
    pub time_expansion: Option<f64>,
    #[serde(default, deserialize_with = "double_option")]
    pub date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "double_option")]
    pub time: Option<Option<NaiveTime>>,
    #[serde(default, deserialize_with = "double_option")]
    pub latitude: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub longitude: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub rights: Option<Option<String>>,
}

impl From<recording::Model> for Recording {
    fn from(m: recording::Model) -> Self {
        Self {
            id: m.id,
            uuid: m.uuid,
            path: m.path,
            hash: m.hash,
            duration: m.duration,
            channels: m.channels,
            samplerate: m.samplerate,
            time_expansion: m.time_expansion,
            date: m.date,
            time: m.time,
            latitude: m.latitude,
            longitude: m.longitude,
            rights: m.rights,
            created_on: m.created_on,
        }
    }
}

impl IntoActiveModel<recording::ActiveModel> for CreateRecording {
    fn into_active_model(self) -> recording::ActiveModel {
        recording::ActiveModel {
            uuid: Set(self.uuid),
            path: Set(self.path),
            hash: Set(self.hash),
            duration: Set(self.duration),
            channels: Set(self.channels),
            samplerate: Set(self.samplerate),
            time_expansion: Set(self.time_expansion),
            date: Set(self.date),
            time: Set(self.time),
            latitude: Set(self.latitude),
            longitude: Set(self.longitude),
            rights: Set(self.rights),
            created_on: Set(Utc::now()),
            ..Default::default()
        }
    }
}

impl UpdateSchema<recording::ActiveModel> for UpdateRecording {
    fn apply(self, active: &mut recording::ActiveModel) {
        if let Some(path) = self.path {
            active.path = Set(path);
        }
        if let Some(hash) = self.hash {
            active.hash = Set(hash);
        }
        if let Some(duration) = self.duration {
            active.duration = Set(duration);
        }
        if let Some(channels) = self.channels {
            active.channels = Set(channels);
        }
        if let Some(samplerate) = self.samplerate {
            active.samplerate = Set(samplerate);
        }
        if let Some(time_expansion) = self.time_expansion {
            active.time_expansion = Set(time_expansion);
        }
        if let Some(date) = self.date {
            active.date = Set(date);
        }
        if let Some(time) = self.time {
            active.time = Set(time);
        }
        if let Some(latitude) = self.latitude {
            active.latitude = Set(latitude);
        }
        if let Some(longitude) = self.longitude {
            active.longitude = Set(longitude);
        }
        if let Some(rights) = self.rights {
            active.rights = Set(rights);
        }
    }
}
