use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ColumnTrait, Condition, ConnectionTrait, Set, TransactionTrait};
use uuid::Uuid;

use super::common::associations::clear_features;
use super::common::{BaseApi, HasFeatures, Resource};
use crate::entity::{sound_event_evaluation, sound_event_evaluation_feature};
use crate::error::ApiResult;
use crate::models::{
    CreateSoundEventEvaluation, SoundEventEvaluation, UpdateSoundEventEvaluation,
};

impl HasFeatures for sound_event_evaluation::Entity {
    type FeatureLink = sound_event_evaluation_feature::Entity;

    fn feature_link_parent_column() -> sound_event_evaluation_feature::Column {
        sound_event_evaluation_feature::Column::SoundEventEvaluationId
    }

    fn feature_link_name_column() -> sound_event_evaluation_feature::Column {
        sound_event_evaluation_feature::Column::FeatureNameId
    }

    fn feature_link_value_column() -> sound_event_evaluation_feature::Column {
        sound_event_evaluation_feature::Column::Value
    }

    fn new_feature_link(
        parent_id: i32,
        feature_name_id: i32,
        value: f64,
    ) -> sound_event_evaluation_feature::ActiveModel {
        sound_event_evaluation_feature::ActiveModel {
            sound_event_evaluation_id: Set(parent_id),
            feature_name_id: Set(feature_name_id),
            value: Set(value),
            created_on: Set(Utc::now()),
        }
    }
}

pub struct SoundEventEvaluations;

#[async_trait]
impl Resource for SoundEventEvaluations {
    type Entity = sound_event_evaluation::Entity;
    type Model = sound_event_evaluation::Model;
    type ActiveModel = sound_event_evaluation::ActiveModel;
    type PrimaryKey = Uuid;
    type Schema = SoundEventEvaluation;
    type Create = CreateSoundEventEvaluation;
    type Update = UpdateSoundEventEvaluation;
    type Key = Uuid;

    fn primary_key(obj: &SoundEventEvaluation) -> Uuid {
        obj.uuid
    }

    fn primary_key_condition(pk: &Uuid) -> Condition {
        Condition::all().add(sound_event_evaluation::Column::Uuid.eq(*pk))
    }

    fn create_key(data: &CreateSoundEventEvaluation) -> Uuid {
        data.uuid
    }

    fn model_key(model: &sound_event_evaluation::Model) -> Uuid {
        model.uuid
    }

    fn key_condition(keys: &[Uuid]) -> Condition {
        Condition::all().add(sound_event_evaluation::Column::Uuid.is_in(keys.iter().copied()))
    }

    fn key_columns() -> Vec<sound_event_evaluation::Column> {
        vec![sound_event_evaluation::Column::Uuid]
    }

    async fn delete_dependents<C>(db: &C, model: &sound_event_evaluation::Model) -> ApiResult<()>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        clear_features::<sound_event_evaluation::Entity, C>(db, model.id).await?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct SoundEventEvaluationFilter {
    pub clip_evaluation_id: Option<i32>,
}

impl SoundEventEvaluationFilter {
    pub fn into_conditions(self) -> Vec<Condition> {
        self.clip_evaluation_id
            .map(|id| Condition::all().add(sound_event_evaluation::Column::ClipEvaluationId.eq(id)))
            .into_iter()
            .collect()
    }
}

pub type SoundEventEvaluationApi = BaseApi<SoundEventEvaluations>;
