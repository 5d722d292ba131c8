use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Query as SeaQuery;
use sea_orm::{ColumnTrait, Condition, ConnectionTrait, Set, TransactionTrait};
use uuid::Uuid;

use super::common::associations::clear_features;
use super::common::base::delete_resources;
use super::common::utils::delete_where;
use super::common::{BaseApi, HasFeatures, Resource};
use super::sound_event_evaluations::SoundEventEvaluations;
use crate::entity::{
    clip_evaluation, clip_evaluation_feature, sound_event_evaluation,
    sound_event_evaluation_feature,
};
use crate::error::ApiResult;
use crate::models::{ClipEvaluation, CreateClipEvaluation, UpdateClipEvaluation};

impl HasFeatures for clip_evaluation::Entity {
    type FeatureLink = clip_evaluation_feature::Entity;

    fn feature_link_parent_column() -> clip_evaluation_feature::Column {
        clip_evaluation_feature::Column::ClipEvaluationId
    }

    fn feature_link_name_column() -> clip_evaluation_feature::Column {
        clip_evaluation_feature::Column::FeatureNameId
    }

    fn feature_link_value_column() -> clip_evaluation_feature::Column {
        clip_evaluation_feature::Column::Value
    }

    fn new_feature_link(
        parent_id: i32,
        feature_name_id: i32,
        value: f64,
    ) -> clip_evaluation_feature::ActiveModel {
        clip_evaluation_feature::ActiveModel {
            clip_evaluation_id: Set(parent_id),
            feature_name_id: Set(feature_name_id),
            value: Set(value),
            created_on: Set(Utc::now()),
        }
    }
}

/// Delete the sound event evaluations under the clip evaluations matched by
/// `clip_evaluation_ids`, metrics included.
pub(crate) async fn delete_sound_event_evaluations<C>(
    db: &C,
    clip_evaluation_ids: Condition,
) -> ApiResult<()>
where
    C: ConnectionTrait,
{
    delete_where::<sound_event_evaluation_feature::Entity, C>(
        db,
        Condition::all().add(
            sound_event_evaluation_feature::Column::SoundEventEvaluationId.in_subquery(
                SeaQuery::select()
                    .column(sound_event_evaluation::Column::Id)
                    .from(sound_event_evaluation::Entity)
                    .cond_where(clip_evaluation_ids.clone())
                    .to_owned(),
            ),
        ),
    )
    .await?;
    delete_resources::<SoundEventEvaluations, C>(db, clip_evaluation_ids).await?;
    Ok(())
}

pub struct ClipEvaluations;

#[async_trait]
impl Resource for ClipEvaluations {
    type Entity = clip_evaluation::Entity;
    type Model = clip_evaluation::Model;
    type ActiveModel = clip_evaluation::ActiveModel;
    type PrimaryKey = Uuid;
    type Schema = ClipEvaluation;
    type Create = CreateClipEvaluation;
    type Update = UpdateClipEvaluation;
    type Key = Uuid;

    fn primary_key(obj: &ClipEvaluation) -> Uuid {
        obj.uuid
    }

    fn primary_key_condition(pk: &Uuid) -> Condition {
        Condition::all().add(clip_evaluation::Column::Uuid.eq(*pk))
    }

    fn create_key(data: &CreateClipEvaluation) -> Uuid {
        data.uuid
    }

    fn model_key(model: &clip_evaluation::Model) -> Uuid {
        model.uuid
    }

    fn key_condition(keys: &[Uuid]) -> Condition {
        Condition::all().add(clip_evaluation::Column::Uuid.is_in(keys.iter().copied()))
    }

    fn key_columns() -> Vec<clip_evaluation::Column> {
        vec![clip_evaluation::Column::Uuid]
    }

    async fn delete_dependents<C>(db: &C, model: &clip_evaluation::Model) -> ApiResult<()>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        clear_features::<clip_evaluation::Entity, C>(db, model.id).await?;
        delete_sound_event_evaluations(
            db,
            Condition::all().add(sound_event_evaluation::Column::ClipEvaluationId.eq(model.id)),
        )
        .await
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClipEvaluationFilter {
    pub evaluation_id: Option<i32>,
    pub clip_annotation_id: Option<i32>,
    pub clip_prediction_id: Option<i32>,
}

impl ClipEvaluationFilter {
    pub fn into_conditions(self) -> Vec<Condition> {
        let mut conditions = Vec::new();
        if let Some(id) = self.evaluation_id {
            conditions.push(Condition::all().add(clip_evaluation::Column::EvaluationId.eq(id)));
        }
        if let Some(id) = self.clip_annotation_id {
            conditions.push(Condition::all().add(clip_evaluation::Column::ClipAnnotationId.eq(id)));
        }
        if let Some(id) = self.clip_prediction_id {
            conditions.push(Condition::all().add(clip_evaluation::Column::ClipPredictionId.eq(id)));
        }
        conditions
    }
}

pub type ClipEvaluationApi = BaseApi<ClipEvaluations>;
