use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Query as SeaQuery;
use sea_orm::{ColumnTrait, Condition, ConnectionTrait, Set, TransactionTrait};
use uuid::Uuid;

use super::clip_evaluations::{ClipEvaluations, delete_sound_event_evaluations};
use super::common::associations::clear_features;
use super::common::base::delete_resources;
use super::common::utils::delete_where;
use super::common::{BaseApi, HasFeatures, Resource};
use crate::entity::{
    clip_evaluation, clip_evaluation_feature, evaluation, evaluation_feature,
    sound_event_evaluation,
};
use crate::error::ApiResult;
use crate::models::{CreateEvaluation, Evaluation, UpdateEvaluation};

impl HasFeatures for evaluation::Entity {
    type FeatureLink = evaluation_feature::Entity;

    fn feature_link_parent_column() -> evaluation_feature::Column {
        evaluation_feature::Column::EvaluationId
    }

    fn feature_link_name_column() -> evaluation_feature::Column {
        evaluation_feature::Column::FeatureNameId
    }

    fn feature_link_value_column() -> evaluation_feature::Column {
        evaluation_feature::Column::Value
    }

    fn new_feature_link(
        parent_id: i32,
        feature_name_id: i32,
        value: f64,
    ) -> evaluation_feature::ActiveModel {
        evaluation_feature::ActiveModel {
            evaluation_id: Set(parent_id),
            feature_name_id: Set(feature_name_id),
            value: Set(value),
            created_on: Set(Utc::now()),
        }
    }
}

pub struct Evaluations;

#[async_trait]
impl Resource for Evaluations {
    type Entity = evaluation::Entity;
    type Model = evaluation::Model;
    type ActiveModel = evaluation::ActiveModel;
    type PrimaryKey = Uuid;
    type Schema = Evaluation;
    type Create = CreateEvaluation;
    type Update = UpdateEvaluation;
    type Key = Uuid;

    fn primary_key(obj: &Evaluation) -> Uuid {
        obj.uuid
    }

    fn primary_key_condition(pk: &Uuid) -> Condition {
        Condition::all().add(evaluation::Column::Uuid.eq(*pk))
    }

    fn create_key(data: &CreateEvaluation) -> Uuid {
        data.uuid
    }

    fn model_key(model: &evaluation::Model) -> Uuid {
        model.uuid
    }

    fn key_condition(keys: &[Uuid]) -> Condition {
        Condition::all().add(evaluation::Column::Uuid.is_in(keys.iter().copied()))
    }

    fn key_columns() -> Vec<evaluation::Column> {
        vec![evaluation::Column::Uuid]
    }

    /// Metrics and every clip evaluation of the run go with it.
    async fn delete_dependents<C>(db: &C, model: &evaluation::Model) -> ApiResult<()>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        clear_features::<evaluation::Entity, C>(db, model.id).await?;

        let clip_evaluations = || {
            SeaQuery::select()
                .column(clip_evaluation::Column::Id)
                .from(clip_evaluation::Entity)
                .and_where(clip_evaluation::Column::EvaluationId.eq(model.id))
                .to_owned()
        };
        delete_sound_event_evaluations(
            db,
            Condition::all()
                .add(sound_event_evaluation::Column::ClipEvaluationId.in_subquery(clip_evaluations())),
        )
        .await?;
        delete_where::<clip_evaluation_feature::Entity, C>(
            db,
            Condition::all()
                .add(clip_evaluation_feature::Column::ClipEvaluationId.in_subquery(clip_evaluations())),
        )
        .await?;
        delete_resources::<ClipEvaluations, C>(
            db,
            Condition::all().add(clip_evaluation::Column::EvaluationId.eq(model.id)),
        )
        .await?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct EvaluationFilter {
    pub task: Option<String>,
}

impl EvaluationFilter {
    pub fn into_conditions(self) -> Vec<Condition> {
        self.task
            .map(|task| Condition::all().add(evaluation::Column::Task.eq(task)))
            .into_iter()
            .collect()
    }
}

pub type EvaluationApi = BaseApi<Evaluations>;
