use chrono::{DateTime, Utc};
use sea_orm::{IntoActiveModel, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::common::UpdateSchema;
use crate::entity::note;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    #[serde(skip_serializing)]
    pub id: i32,
    pub uuid: Uuid,
    pub message: String,
    /// Flags the note as a problem that needs attention.
    pub is_issue: bool,
    pub created_by_id: Option<i32>,
    pub created_on: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateNote {
    #[serde(default = "Uuid::new_v4")]
    pub uuid: Uuid,
    pub message: String,
    #[serde(default)]
    pub is_issue: bool,
    pub created_by_id: Option<i32>,
}

impl CreateNote {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            message: message.into(),
            is_issue: false,
            created_by_id: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct UpdateNote {
    pub message: Option<String>,
    pub is_issue: Option<bool>,
}

impl From<note::Model> for Note {
    fn from(m: note::Model) -> Self {
        Self {
            id: m.id,
            uuid: m.uuid,
            message: m.message,
            is_issue: m.is_issue,
            created_by_id: m.created_by_id,
            created_on: m.created_on,
        }
    }
}

impl IntoActiveModel<note::ActiveModel> for CreateNote {
    fn into_active_model(self) -> note::ActiveModel {
        note::ActiveModel {
            uuid: Set(self.uuid),
            message: Set(self.message),
            is_issue: Set(self.is_issue),
            created_by_id: Set(self.created_by_id),
            created_on: Set(Utc::now()),
            ..Default::default()
        }
    }
}

impl UpdateSchema<note::ActiveModel> for UpdateNote {
    fn apply(self, active: &mut note::ActiveModel) {
        if let Some(message) = self.message {
            active.message = Set(message);
        }
        if let Some(is_issue) = self.is_issue {
            active.is_issue = Set(is_issue);
        }
    }
}
