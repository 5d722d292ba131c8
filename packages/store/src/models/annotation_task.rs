use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use sea_orm::{IntoActiveModel, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::{annotation_status_badge, annotation_task};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotationTask {
    #[serde(skip_serializing)]
    pub id: i32,
    pub uuid: Uuid,
    pub annotation_project_id: i32,
    pub clip_id: i32,
    pub clip_annotation_id: i32,
    pub created_on: DateTime<Utc>,
}

/// Payload for a task whose clip annotation already exists.
///
/// Use `annotation_tasks::create_task` to create both at once.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAnnotationTask {
    #[serde(default = "Uuid::new_v4")]
    pub uuid: Uuid,
    pub annotation_project_id: i32,
    pub clip_id: i32,
    pub clip_annotation_id: i32,
}

impl CreateAnnotationTask {
    pub fn new(annotation_project_id: i32, clip_id: i32, clip_annotation_id: i32) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            annotation_project_id,
            clip_id,
            clip_annotation_id,
        }
    }
}

impl From<annotation_task::Model> for AnnotationTask {
    fn from(m: annotation_task::Model) -> Self {
        Self {
            id: m.id,
            uuid: m.uuid,
            annotation_project_id: m.annotation_project_id,
            clip_id: m.clip_id,
            clip_annotation_id: m.clip_annotation_id,
            created_on: m.created_on,
        }
    }
}

impl IntoActiveModel<annotation_task::ActiveModel> for CreateAnnotationTask {
    fn into_active_model(self) -> annotation_task::ActiveModel {
        annotation_task::ActiveModel {
            uuid: Set(self.uuid),
            annotation_project_id: Set(self.annotation_project_id),
            clip_id: Set(self.clip_id),
            clip_annotation_id: Set(self.clip_annotation_id),
            created_on: Set(Utc::now()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationState {
    Assigned,
    Completed,
    Verified,
    Rejected,
}

impl AnnotationState {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnnotationState::Assigned => "assigned",
            AnnotationState::Completed => "completed",
            AnnotationState::Verified => "verified",
            AnnotationState::Rejected => "rejected",
        }
    }
}

impl fmt::Display for AnnotationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnnotationState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "assigned" => Ok(AnnotationState::Assigned),
            "completed" => Ok(AnnotationState::Completed),
            "verified" => Ok(AnnotationState::Verified),
            "rejected" => Ok(AnnotationState::Rejected),
            other => Err(format!("unknown annotation state: {other}")),
        }
    }
}

/// A state change recorded on an annotation task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusBadge {
    #[serde(skip_serializing)]
    pub id: i32,
    pub annotation_task_id: i32,
    pub user_id: Option<i32>,
    pub state: AnnotationState,
    pub created_on: DateTime<Utc>,
}

impl TryFrom<annotation_status_badge::Model> for StatusBadge {
    type Error = String;

    fn try_from(m: annotation_status_badge::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: m.id,
            annotation_task_id: m.annotation_task_id,
            user_id: m.user_id,
            state: m.state.parse()?,
            created_on: m.created_on,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_round_trips_through_column_text() {
        for state in [
            AnnotationState::Assigned,
            AnnotationState::Completed,
            AnnotationState::Verified,
            AnnotationState::Rejected,
        ] {
            assert_eq!(state.as_str().parse::<AnnotationState>(), Ok(state));
        }
    }

    #[test]
    fn unknown_state_is_rejected() {
        assert!("archived".parse::<AnnotationState>().is_err());
    }
}
