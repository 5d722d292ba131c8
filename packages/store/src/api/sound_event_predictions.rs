use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ColumnTrait, Condition, ConnectionTrait, Set, TransactionTrait};
use uuid::Uuid;

use super::common::associations::{clear_tags, get_scored_tags};
use super::common::{BaseApi, HasTags, Resource};
use crate::entity::{sound_event_prediction, sound_event_prediction_tag};
use crate::error::ApiResult;
use crate::models::{
    CreateSoundEventPrediction, PredictedTag, SoundEventPrediction, Tag,
    UpdateSoundEventPrediction,
};

impl HasTags for sound_event_prediction::Entity {
    type TagLink = sound_event_prediction_tag::Entity;
    type TagData = f64;

    fn tag_link_parent_column() -> sound_event_prediction_tag::Column {
        sound_event_prediction_tag::Column::SoundEventPredictionId
    }

    fn tag_link_tag_column() -> sound_event_prediction_tag::Column {
        sound_event_prediction_tag::Column::TagId
    }

    fn new_tag_link(
        parent_id: i32,
        tag_id: i32,
        score: f64,
    ) -> sound_event_prediction_tag::ActiveModel {
        sound_event_prediction_tag::ActiveModel {
            sound_event_prediction_id: Set(parent_id),
            tag_id: Set(tag_id),
            score: Set(score),
            created_on: Set(Utc::now()),
        }
    }
}

pub struct SoundEventPredictions;

#[async_trait]
impl Resource for SoundEventPredictions {
    type Entity = sound_event_prediction::Entity;
    type Model = sound_event_prediction::Model;
    type ActiveModel = sound_event_prediction::ActiveModel;
    type PrimaryKey = Uuid;
    type Schema = SoundEventPrediction;
    type Create = CreateSoundEventPrediction;
    type Update = UpdateSoundEventPrediction;
    type Key = Uuid;

    fn primary_key(obj: &SoundEventPrediction) -> Uuid {
        obj.uuid
    }

    fn primary_key_condition(pk: &Uuid) -> Condition {
        Condition::all().add(sound_event_prediction::Column::Uuid.eq(*pk))
    }

    fn create_key(data: &CreateSoundEventPrediction) -> Uuid {
        data.uuid
    }

    fn model_key(model: &sound_event_prediction::Model) -> Uuid {
        model.uuid
    }

    fn key_condition(keys: &[Uuid]) -> Condition {
        Condition::all().add(sound_event_prediction::Column::Uuid.is_in(keys.iter().copied()))
    }

    fn key_columns() -> Vec<sound_event_prediction::Column> {
        vec![sound_event_prediction::Column::Uuid]
    }

    async fn delete_dependents<C>(db: &C, model: &sound_event_prediction::Model) -> ApiResult<()>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        clear_tags::<sound_event_prediction::Entity, C>(db, model.id).await?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct SoundEventPredictionFilter {
    pub clip_prediction_id: Option<i32>,
    pub min_score: Option<f64>,
}

impl SoundEventPredictionFilter {
    pub fn into_conditions(self) -> Vec<Condition> {
        let mut conditions = Vec::new();
        if let Some(id) = self.clip_prediction_id {
            conditions
                .push(Condition::all().add(sound_event_prediction::Column::ClipPredictionId.eq(id)));
        }
        if let Some(min_score) = self.min_score {
            conditions.push(Condition::all().add(sound_event_prediction::Column::Score.gte(min_score)));
        }
        conditions
    }
}

pub type SoundEventPredictionApi = BaseApi<SoundEventPredictions>;

impl SoundEventPredictionApi {
    pub async fn get_predicted_tags<C>(
        &self,
        db: &C,
        obj: &SoundEventPrediction,
    ) -> ApiResult<Vec<PredictedTag>>
    where
        C: ConnectionTrait,
    {
        let model = self.get_model(db, &obj.uuid).await?;
        let tags = get_scored_tags::<sound_event_prediction::Entity, C>(
            db,
            &model,
            sound_event_prediction_tag::Column::Score,
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
