use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ColumnTrait, Condition, ConnectionTrait, Set, TransactionTrait};
use uuid::Uuid;

use super::common::associations::clear_features;
use super::common::{BaseApi, HasFeatures, Resource};
use crate::entity::{sound_event, sound_event_feature};
use crate::error::ApiResult;
use crate::models::{CreateSoundEvent, SoundEvent, UpdateSoundEvent};

impl HasFeatures for sound_event::Entity {
    type FeatureLink = sound_event_feature::Entity;

    fn feature_link_parent_column() -> sound_event_feature::Column {
        sound_event_feature::Column::SoundEventId
    }

    fn feature_link_name_column() -> sound_event_feature::Column {
        sound_event_feature::Column::FeatureNameId
    }

    fn feature_link_value_column() -> sound_event_feature::Column {
        sound_event_feature::Column::Value
    }

    fn new_feature_link(
        parent_id: i32,
        feature_name_id: i32,
        value: f64,
    ) -> sound_event_feature::ActiveModel {
        sound_event_feature::ActiveModel {
            sound_event_id: Set(parent_id),
            feature_name_id: Set(feature_name_id),
            value: Set(value),
            created_on: Set(Utc::now()),
        }
    }
}

pub struct SoundEvents;

#[async_trait]
impl Resource for SoundEvents {
    type Entity = sound_event::Entity;
    type Model = sound_event::Model;
    type ActiveModel = sound_event::ActiveModel;
    type PrimaryKey = Uuid;
    type Schema = SoundEvent;
    type Create = CreateSoundEvent;
    type Update = UpdateSoundEvent;
    type Key = Uuid;

    fn primary_key(obj: &SoundEvent) -> Uuid {
        obj.uuid
    }

    fn primary_key_condition(pk: &Uuid) -> Condition {
        Condition::all().add(sound_event::Column::Uuid.eq(*pk))
    }

    fn create_key(data: &CreateSoundEvent) -> Uuid {
        data.uuid
    }

    fn model_key(model: &sound_event::Model) -> Uuid {
        model.uuid
    }

    fn key_condition(keys: &[Uuid]) -> Condition {
        Condition::all().add(sound_event::Column::Uuid.is_in(keys.iter().copied()))
    }

    fn key_columns() -> Vec<sound_event::Column> {
        vec![sound_event::Column::Uuid]
    }

    async fn delete_dependents<C>(db: &C, model: &sound_event::Model) -> ApiResult<()>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        clear_features::<sound_event::Entity, C>(db, model.id).await?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct SoundEventFilter {
    pub recording_id: Option<i32>,
    pub geometry_type: Option<String>,
}

impl SoundEventFilter {
    pub fn into_conditions(self) -> Vec<Condition> {
        let mut conditions = Vec::new();
        if let Some(recording_id) = self.recording_id {
            conditions.push(Condition::all().add(sound_event::Column::RecordingId.eq(recording_id)));
        }
        if let Some(geometry_type) = self.geometry_type {
            conditions.push(Condition::all().add(sound_event::Column::GeometryType.eq(geometry_type)));
        }
        conditions
    }
}

pub type SoundEventApi = BaseApi<SoundEvents>;
