use chrono::{DateTime, Utc};
use sea_orm::{IntoActiveModel, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::common::UpdateSchema;
use crate::entity::{clip_evaluation, evaluation, sound_event_evaluation};

/// Comparison of a model run against ground truth annotations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    #[serde(skip_serializing)]
    pub id: i32,
    pub uuid: Uuid,
    /// e.g. `"clip_classification"` or `"sound_event_detection"`.
    pub task: String,
    pub score: f64,
    pub created_on: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateEvaluation {
    #[serde(default = "Uuid::new_v4")]
    pub uuid: Uuid,
    pub task: String,
    #[serde(default)]
    pub score: f64,
}

impl CreateEvaluation {
    pub fn new(task: impl Into<String>, score: f64) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            task: task.into(),
            score,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct UpdateEvaluation {
    pub task: Option<String>,
    pub score: Option<f64>,
}

impl From<evaluation::Model> for Evaluation {
    fn from(m: evaluation::Model) -> Self {
        Self {
            id: m.id,
            uuid: m.uuid,
            task: m.task,
            score: m.score,
            created_on: m.created_on,
        }
    }
}

impl IntoActiveModel<evaluation::ActiveModel> for CreateEvaluation {
    fn into_active_model(self) -> evaluation::ActiveModel {
        evaluation::ActiveModel {
            uuid: Set(self.uuid),
            task: Set(self.task),
            score: Set(self.score),
            created_on: Set(Utc::now()),
            ..Default::default()
        }
    }
}

impl UpdateSchema<evaluation::ActiveModel> for UpdateEvaluation {
    fn apply(self, active: &mut evaluation::ActiveModel) {
        if let Some(task) = self.task {
            active.task = Set(task);
        }
        if let Some(score) = self.score {
            active.score = Set(score);
        }
    }
}

/// A clip annotation matched against a clip prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClipEvaluation {
    #[serde(skip_serializing)]
    pub id: i32,
    pub uuid: Uuid,
    pub evaluation_id: i32,
    pub clip_annotation_id: i32,
    pub clip_prediction_id: i32,
    pub score: f64,
    pub created_on: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateClipEvaluation {
    #[serde(default = "Uuid::new_v4")]
    pub uuid: Uuid,
    pub evaluation_id: i32,
    pub clip_annotation_id: i32,
    pub clip_prediction_id: i32,
    #[serde(default)]
    pub score: f64,
}

impl CreateClipEvaluation {
    pub fn new(
        evaluation_id: i32,
        clip_annotation_id: i32,
        clip_prediction_id: i32,
        score: f64,
    ) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            evaluation_id,
            clip_annotation_id,
            clip_prediction_id,
            score,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct UpdateClipEvaluation {
    pub score: Option<f64>,
}

impl From<clip_evaluation::Model> for ClipEvaluation {
    fn from(m: clip_evaluation::Model) -> Self {
        Self {
            id: m.id,
            uuid: m.uuid,
            evaluation_id: m.evaluation_id,
            clip_annotation_id: m.clip_annotation_id,
            clip_prediction_id: m.clip_prediction_id,
            score: m.score,
            created_on: m.created_on,
        }
    }
}

impl IntoActiveModel<clip_evaluation::ActiveModel> for CreateClipEvaluation {
    fn into_active_model(self) -> clip_evaluation::ActiveModel {
        clip_evaluation::ActiveModel {
            uuid: Set(self.uuid),
            evaluation_id: Set(self.evaluation_id),
            clip_annotation_id: Set(self.clip_annotation_id),
            clip_prediction_id: Set(self.clip_prediction_id),
            score: Set(self.score),
            created_on: Set(Utc::now()),
            ..Default::default()
        }
    }
}

impl UpdateSchema<clip_evaluation::ActiveModel> for UpdateClipEvaluation {
    fn apply(self, active: &mut clip_evaluation::ActiveModel) {
        if let Some(score) = self.score {
            active.score = Set(score);
        }
    }
}

/// A pairing of an annotated and a predicted sound event inside a clip
/// evaluation. Either side may be missing (false negative or false positive).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SoundEventEvaluation {
    #[serde(skip_serializing)]
    pub id: i32,
    pub uuid: Uuid,
    pub clip_evaluation_id: i32,
    /// Sound event annotation.
    pub source_id: Option<i32>,
    /// Sound event prediction.
    pub target_id: Option<i32>,
    pub affinity: f64,
    pub score: f64,
    pub created_on: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSoundEventEvaluation {
    #[serde(default = "Uuid::new_v4")]
    pub uuid: Uuid,
    pub clip_evaluation_id: i32,
    pub source_id: Option<i32>,
    pub target_id: Option<i32>,
    #[serde(default)]
    pub affinity: f64,
    #[serde(default)]
    pub score: f64,
}

impl CreateSoundEventEvaluation {
    pub fn new(
        clip_evaluation_id: i32,
        source_id: Option<i32>,
        target_id: Option<i32>,
        affinity: f64,
        score: f64,
    ) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            clip_evaluation_id,
            source_id,
            target_id,
            affinity,
            score,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct UpdateSoundEventEvaluation {
    pub affinity: Option<f64>,
    pub score: Option<f64>,
}

impl From<sound_event_evaluation::Model> for SoundEventEvaluation {
    fn from(m: sound_event_evaluation::Model) -> Self {
        Self {
            id: m.id,
            uuid: m.uuid,
            clip_evaluation_id: m.clip_evaluation_id,
            source_id: m.source_id,
            target_id: m.target_id,
            affinity: m.affinity,
            score: m.score,
            created_on: m.created_on,
        }
    }
}

impl IntoActiveModel<sound_event_evaluation::ActiveModel> for CreateSoundEventEvaluation {
    fn into_active_model(self) -> sound_event_evaluation::ActiveModel {
        sound_event_evaluation::ActiveModel {
            uuid: Set(self.uuid),
            clip_evaluation_id: Set(self.clip_evaluation_id),
            source_id: Set(self.source_id),
            target_id: Set(self.target_id),
            affinity: Set(self.affinity),
            score: Set(self.score),
            created_on: Set(Utc::now()),
            ..Default::default()
        }
    }
}

impl UpdateSchema<sound_event_evaluation::ActiveModel> for UpdateSoundEventEvaluation {
    fn apply(self, active: &mut sound_event_evaluation::ActiveModel) {
        if let Some(affinity) = self.affinity {
            active.affinity = Set(affinity);
        }
        if let Some(score) = self.score {
            active.score = Set(score);
        }
    }
}
