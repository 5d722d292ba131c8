use chrono::{DateTime, Utc};
use sea_orm::{IntoActiveModel, Set};
use serde::{Deserialize, Serialize};

use crate::api::common::UpdateSchema;
use crate::entity::tag;

/// A `key: value` label, shared by every entity that carries tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub id: i32,
    pub key: String,
    pub value: String,
    pub created_on: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTag {
    pub key: String,
    pub value: String,
}

impl CreateTag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct UpdateTag {
    pub key: Option<String>,
    pub value: Option<String>,
}

/// A tag as attached to a prediction, with the model's confidence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictedTag {
    pub tag: Tag,
    pub score: f64,
}

impl From<tag::Model> for Tag {
    fn from(m: tag::Model) -> Self {
        Self {
            id: m.id,
            key: m.key,
            value: m.value,
            created_on: m.created_on,
        }
    }
}

impl IntoActiveModel<tag::ActiveModel> for CreateTag {
    fn into_active_model(self) -> tag::ActiveModel {
        tag::ActiveModel {
            key: Set(self.key),
            value: Set(self.value),
            created_on: Set(Utc::now()),
            ..Default::default()
        }
    }
}

impl UpdateSchema<tag::ActiveModel> for UpdateTag {
    fn apply(self, active: &mut tag::ActiveModel) {
        if let Some(key) = self.key {
            active.key = Set(key);
        }
        if let Some(value) = self.value {
            active.value = Set(value);
        }
    }
}
