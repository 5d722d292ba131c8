use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sea_orm::sea_query::Query as SeaQuery;
use sea_orm::{ColumnTrait, Condition, ConnectionTrait, Set, TransactionTrait};
use uuid::Uuid;

use super::common::associations::{clear_features, clear_notes, clear_tags};
use super::common::utils::{delete_where, get_object, search_condition};
use super::common::{BaseApi, HasFeatures, HasNotes, HasTags, Resource};
use crate::entity::{
    dataset_recording, recording, recording_feature, recording_note, recording_tag,
};
use crate::error::ApiResult;
use crate::models::{CreateRecording, Recording, UpdateRecording};

impl HasTags for recording::Entity {
    type TagLink = recording_tag::Entity;
    type TagData = ();

    fn tag_link_parent_column() -> recording_tag::Column {
        recording_tag::Column::RecordingId
    }

    fn tag_link_tag_column() -> recording_tag::Column {
        recording_tag::Column::TagId
    }

    fn new_tag_link(parent_id: i32, tag_id: i32, _data: ()) -> recording_tag::ActiveModel {
        recording_tag::ActiveModel {
            recording_id: Set(parent_id),
            tag_id: Set(tag_id),
            created_on: Set(Utc::now()),
        }
    }
}

impl HasNotes for recording::Entity {
    type NoteLink = recording_note::Entity;

    fn note_link_parent_column() -> recording_note::Column {
        recording_note::Column::RecordingId
    }

    fn note_link_note_column() -> recording_note::Column {
        recording_note::Column::NoteId
    }

    fn new_note_link(parent_id: i32, note_id: i32) -> recording_note::ActiveModel {
        recording_note::ActiveModel {
            recording_id: Set(parent_id),
            note_id: Set(note_id),
            created_on: Set(Utc::now()),
        }
    }
}

impl HasFeatures for recording::Entity {
    type FeatureLink = recording_feature::Entity;

    fn feature_link_parent_column() -> recording_feature::Column {
        recording_feature::Column::RecordingId
    }

    fn feature_link_name_column() -> recording_feature::Column {
        recording_feature::Column::FeatureNameId
    }

    fn feature_link_value_column() -> recording_feature::Column {
        recording_feature::Column::Value
    }

    fn new_feature_link(
        parent_id: i32,
        feature_name_id: i32,
        value: f64,
    ) -> recording_feature::ActiveModel {
        recording_feature::ActiveModel {
            recording_id: Set(parent_id),
            feature_name_id: Set(feature_name_id),
            value: Set(value),
            created_on: Set(Utc::now()),
        }
    }
}

pub struct Recordings;

#[async_trait]
impl Resource for Recordings {
    type Entity = recording::Entity;
    type Model = recording::Model;
    type ActiveModel = recording::ActiveModel;
    type PrimaryKey = Uuid;
    type Schema = Recording;
    type Create = CreateRecording;
    type Update = UpdateRecording;
    type Key = String;

    fn primary_key(obj: &Recording) -> Uuid {
        obj.uuid
    }

    fn primary_key_condition(pk: &Uuid) -> Condition {
        Condition::all().add(recording::Column::Uuid.eq(*pk))
    }

    fn create_key(data: &CreateRecording) -> String {
        data.path.clone()
    }

    fn model_key(model: &recording::Model) -> String {
        model.path.clone()
    }

    fn key_condition(keys: &[String]) -> Condition {
        Condition::all().add(recording::Column::Path.is_in(keys.iter().map(String::as_str)))
    }

    fn key_columns() -> Vec<recording::Column> {
        vec![recording::Column::Path]
    }

    /// Tags, notes, features and dataset memberships go with the recording.
    /// Clips and sound events must be deleted first.
    async fn delete_dependents<C>(db: &C, model: &recording::Model) -> ApiResult<()>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        clear_tags::<recording::Entity, C>(db, model.id).await?;
        clear_notes::<recording::Entity, C>(db, model.id).await?;
        clear_features::<recording::Entity, C>(db, model.id).await?;
        delete_where::<dataset_recording::Entity, C>(
            db,
            Condition::all().add(dataset_recording::Column::RecordingId.eq(model.id)),
        )
        .await?;
        Ok(())
    }
}

/// Filters for listing recordings.
#[derive(Debug, Clone, Default)]
pub struct RecordingFilter {
    /// Case-insensitive substring of the path.
    pub search: Option<String>,
    pub dataset_id: Option<i32>,
    pub samplerate: Option<i32>,
    pub channels: Option<i32>,
    pub min_duration: Option<f64>,
    pub max_duration: Option<f64>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    /// Only recordings carrying this tag.
    pub tag_id: Option<i32>,
    /// Only recordings with (or without) coordinates.
    pub has_location: Option<bool>,
}

impl RecordingFilter {
    pub fn into_conditions(self) -> Vec<Condition> {
        let mut conditions = Vec::new();
        if let Some(search) = self.search
            && let Some(condition) = search_condition(recording::Column::Path, &search)
        {
            conditions.push(condition);
        }
        if let Some(dataset_id) = self.dataset_id {
            conditions.push(
                Condition::all().add(
                    recording::Column::Id.in_subquery(
                        SeaQuery::select()
                            .column(dataset_recording::Column::RecordingId)
                            .from(dataset_recording::Entity)
                            .and_where(dataset_recording::Column::DatasetId.eq(dataset_id))
                            .to_owned(),
                    ),
                ),
            );
        }
        if let Some(tag_id) = self.tag_id {
            conditions.push(
                Condition::all().add(
                    recording::Column::Id.in_subquery(
                        SeaQuery::select()
                            .column(recording_tag::Column::RecordingId)
                            .from(recording_tag::Entity)
                            .and_where(recording_tag::Column::TagId.eq(tag_id))
                            .to_owned(),
                    ),
                ),
            );
        }
        if let Some(samplerate) = self.samplerate {
            conditions.push(Condition::all().add(recording::Column::Samplerate.eq(samplerate)));
        }
        if let Some(channels) = self.channels {
            conditions.push(Condition::all().add(recording::Column::Channels.eq(channels)));
        }
        if let Some(min) = self.min_duration {
            conditions.push(Condition::all().add(recording::Column::Duration.gte(min)));
        }
        if let Some(max) = self.max_duration {
            conditions.push(Condition::all().add(recording::Column::Duration.lte(max)));
        }
        if let Some(from) = self.date_from {
            conditions.push(Condition::all().add(recording::Column::Date.gte(from)));
        }
        if let Some(to) = self.date_to {
            conditions.push(Condition::all().add(recording::Column::Date.lte(to)));
        }
        if let Some(has_location) = self.has_location {
            let condition = if has_location {
                Condition::all()
                    .add(recording::Column::Latitude.is_not_null())
                    .add(recording::Column::Longitude.is_not_null())
            } else {
                Condition::any()
                    .add(recording::Column::Latitude.is_null())
                    .add(recording::Column::Longitude.is_null())
            };
            conditions.push(condition);
        }
        conditions
    }
}

pub type RecordingApi = BaseApi<Recordings>;

impl RecordingApi {
    pub async fn get_by_path<C>(&self, db: &C, path: &str) -> ApiResult<Recording>
    where
        C: ConnectionTrait,
    {
        let model = get_object::<recording::Entity, C>(
            db,
            Condition::all().add(recording::Column::Path.eq(path)),
        )
        .await?;
        Ok(self.schema(model))
    }
}
