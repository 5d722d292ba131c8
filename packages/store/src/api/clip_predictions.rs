use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Query as SeaQuery;
use sea_orm::{ColumnTrait, Condition, ConnectionTrait, Set, TransactionTrait};
use uuid::Uuid;

use super::common::associations::{clear_tags, get_scored_tags};
use super::common::base::delete_resources;
use super::common::utils::delete_where;
use super::common::{BaseApi, HasTags, NoUpdate, Resource};
use super::sound_event_predictions::SoundEventPredictions;
use crate::entity::{
    clip_prediction, clip_prediction_tag, model_run_clip_prediction, sound_event_prediction,
    sound_event_prediction_tag,
};
use crate::error::ApiResult;
use crate::models::{ClipPrediction, CreateClipPrediction, PredictedTag, Tag};

impl HasTags for clip_prediction::Entity {
    type TagLink = clip_prediction_tag::Entity;
    /// Confidence of the prediction.
    type TagData = f64;

    fn tag_link_parent_column() -> clip_prediction_tag::Column {
        clip_prediction_tag::Column::ClipPredictionId
    }

    fn tag_link_tag_column() -> clip_prediction_tag::Column {
        clip_prediction_tag::Column::TagId
    }

    fn new_tag_link(parent_id: i32, tag_id: i32, score: f64) -> clip_prediction_tag::ActiveModel {
        clip_prediction_tag::ActiveModel {
            clip_prediction_id: Set(parent_id),
            tag_id: Set(tag_id),
            score: Set(score),
            created_on: Set(Utc::now()),
        }
    }
}

pub struct ClipPredictions;

#[async_trait]
impl Resource for ClipPredictions {
    type Entity = clip_prediction::Entity;
    type Model = clip_prediction::Model;
    type ActiveModel = clip_prediction::ActiveModel;
    type PrimaryKey = Uuid;
    type Schema = ClipPrediction;
    type Create = CreateClipPrediction;
    type Update = NoUpdate;
    type Key = Uuid;

    fn primary_key(obj: &ClipPrediction) -> Uuid {
        obj.uuid
    }

    fn primary_key_condition(pk: &Uuid) -> Condition {
        Condition::all().add(clip_prediction::Column::Uuid.eq(*pk))
    }

    fn create_key(data: &CreateClipPrediction) -> Uuid {
        data.uuid
    }

    fn model_key(model: &clip_prediction::Model) -> Uuid {
        model.uuid
    }

    fn key_condition(keys: &[Uuid]) -> Condition {
        Condition::all().add(clip_prediction::Column::Uuid.is_in(keys.iter().copied()))
    }

    fn key_columns() -> Vec<clip_prediction::Column> {
        vec![clip_prediction::Column::Uuid]
    }

    /// Tags, sound event predictions and model run links go with the
    /// prediction.
    async fn delete_dependents<C>(db: &C, model: &clip_prediction::Model) -> ApiResult<()>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        clear_tags::<clip_prediction::Entity, C>(db, model.id).await?;
        delete_where::<sound_event_prediction_tag::Entity, C>(
            db,
            Condition::all().add(
                sound_event_prediction_tag::Column::SoundEventPredictionId.in_subquery(
                    SeaQuery::select()
                        .column(sound_event_prediction::Column::Id)
                        .from(sound_event_prediction::Entity)
                        .and_where(sound_event_prediction::Column::ClipPredictionId.eq(model.id))
                        .to_owned(),
                ),
            ),
        )
        .await?;
        delete_resources::<SoundEventPredictions, C>(
            db,
            Condition::all().add(sound_event_prediction::Column::ClipPredictionId.eq(model.id)),
        )
        .await?;
        delete_where::<model_run_clip_prediction::Entity, C>(
            db,
            Condition::all()
                .add(model_run_clip_prediction::Column::ClipPredictionId.eq(model.id)),
        )
        .await?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClipPredictionFilter {
    pub clip_id: Option<i32>,
    pub model_run_id: Option<i32>,
}

impl ClipPredictionFilter {
    pub fn into_conditions(self) -> Vec<Condition> {
        let mut conditions = Vec::new();
        if let Some(clip_id) = self.clip_id {
            conditions.push(Condition::all().add(clip_prediction::Column::ClipId.eq(clip_id)));
        }
        if let Some(model_run_id) = self.model_run_id {
            conditions.push(
                Condition::all().add(
                    clip_prediction::Column::Id.in_subquery(
                        SeaQuery::select()
                            .column(model_run_clip_prediction::Column::ClipPredictionId)
                            .from(model_run_clip_prediction::Entity)
                            .and_where(model_run_clip_prediction::Column::ModelRunId.eq(model_run_id))
                            .to_owned(),
                    ),
                ),
            );
        }
        conditions
    }
}

pub type ClipPredictionApi = BaseApi<ClipPredictions>;

impl ClipPredictionApi {
    /// Predicted tags with their scores, ordered by key then value.
    pub async fn get_predicted_tags<C>(
        &self,
        db: &C,
        obj: &ClipPrediction,
    ) -> ApiResult<Vec<PredictedTag>>
    where
        C: ConnectionTrait,
    {
        let model = self.get_model(db, &obj.uuid).await?;
        let tags = get_scored_tags::<clip_prediction::Entity, C>(
            db,
            &model,
            clip_prediction_tag::Column::Score,
        )
        .await?;
        Ok(tags
            .into_iter()
            .map(|(tag, score)| PredictedTag {
                tag: Tag::from(tag),
                score,
            })
            .collect())
    }
}
