use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ColumnTrait, Condition, ConnectionTrait, Set, TransactionTrait};
use uuid::Uuid;

use super::common::associations::clear_features;
use super::common::{BaseApi, HasFeatures, Resource};
use crate::entity::{clip, clip_feature};
use crate::error::ApiResult;
use crate::models::{Clip, CreateClip, UpdateClip};

impl HasFeatures for clip::Entity {
    type FeatureLink = clip_feature::Entity;

    fn feature_link_parent_column() -> clip_feature::Column {
        clip_feature::Column::ClipId
    }

    fn feature_link_name_column() -> clip_feature::Column {
        clip_feature::Column::FeatureNameId
    }

    fn feature_link_value_column() -> clip_feature::Column {
        clip_feature::Column::Value
    }

    fn new_feature_link(parent_id: i32, feature_name_id: i32, value: f64) -> clip_feature::ActiveModel {
        clip_feature::ActiveModel {
            clip_id: Set(parent_id),
            feature_name_id: Set(feature_name_id),
            value: Set(value),
            created_on: Set(Utc::now()),
        }
    }
}

/// `(recording_id, start_time, end_time)` with the times as raw bits so the
/// key can be hashed.
pub type ClipKey = (i32, u64, u64);

/// Bits of `time` with `-0.0` folded into `0.0`, matching SQL equality.
fn time_bits(time: f64) -> u64 {
    if time == 0.0 { 0.0_f64.to_bits() } else { time.to_bits() }
}

fn clip_key(recording_id: i32, start_time: f64, end_time: f64) -> ClipKey {
    (recording_id, time_bits(start_time), time_bits(end_time))
}

pub struct Clips;

#[async_trait]
impl Resource for Clips {
    type Entity = clip::Entity;
    type Model = clip::Model;
    type ActiveModel = clip::ActiveModel;
    type PrimaryKey = Uuid;
    type Schema = Clip;
    type Create = CreateClip;
    type Update = UpdateClip;
    type Key = ClipKey;

    fn primary_key(obj: &Clip) -> Uuid {
        obj.uuid
    }

    fn primary_key_condition(pk: &Uuid) -> Condition {
        Condition::all().add(clip::Column::Uuid.eq(*pk))
    }

    fn create_key(data: &CreateClip) -> ClipKey {
        clip_key(data.recording_id, data.start_time, data.end_time)
    }

    fn model_key(model: &clip::Model) -> ClipKey {
        clip_key(model.recording_id, model.start_time, model.end_time)
    }

    fn key_condition(keys: &[ClipKey]) -> Condition {
        keys.iter()
            .fold(Condition::any(), |condition, &(recording_id, start, end)| {
                condition.add(
                    Condition::all()
                        .add(clip::Column::RecordingId.eq(recording_id))
                        .add(clip::Column::StartTime.eq(f64::from_bits(start)))
                        .add(clip::Column::EndTime.eq(f64::from_bits(end))),
                )
            })
    }

    fn key_columns() -> Vec<clip::Column> {
        vec![clip::Column::RecordingId, clip::Column::StartTime, clip::Column::EndTime]
    }

    async fn delete_dependents<C>(db: &C, model: &clip::Model) -> ApiResult<()>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        clear_features::<clip::Entity, C>(db, model.id).await?;
        Ok(())
    }
}

/// Filters for listing clips.
#[derive(Debug, Clone, Default)]
pub struct ClipFilter {
    pub recording_id: Option<i32>,
    /// Clips starting at or after this time.
    pub start_time: Option<f64>,
    /// Clips ending at or before this time.
    pub end_time: Option<f64>,
}

impl ClipFilter {
    pub fn into_conditions(self) -> Vec<Condition> {
        let mut conditions = Vec::new();
        if let Some(recording_id) = self.recording_id {
            conditions.push(Condition::all().add(clip::Column::RecordingId.eq(recording_id)));
        }
        if let Some(start_time) = self.start_time {
            conditions.push(Condition::all().add(clip::Column::StartTime.gte(start_time)));
        }
        if let Some(end_time) = self.end_time {
            conditions.push(Condition::all().add(clip::Column::EndTime.lte(end_time)));
        }
        conditions
    }
}

pub type ClipApi = BaseApi<Clips>;
