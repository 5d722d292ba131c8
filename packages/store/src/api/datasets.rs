use std::path::Path;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter, Set, TransactionTrait,
};
use tracing::{debug, instrument};
use uuid::Uuid;

use super::common::utils::{SortBy, create_object, delete_where, get_object, get_objects};
use super::common::{BaseApi, Resource};
use super::recordings::RecordingFilter;
use crate::entity::{dataset, dataset_recording, recording};
use crate::error::ApiResult;
use crate::models::{CreateDataset, Dataset, Recording, UpdateDataset};

pub struct Datasets;

#[async_trait]
impl Resource for Datasets {
    type Entity = dataset::Entity;
    type Model = dataset::Model;
    type ActiveModel = dataset::ActiveModel;
    type PrimaryKey = Uuid;
    type Schema = Dataset;
    type Create = CreateDataset;
    type Update = UpdateDataset;
    type Key = String;

    fn primary_key(obj: &Dataset) -> Uuid {
        obj.uuid
    }

    fn primary_key_condition(pk: &Uuid) -> Condition {
        Condition::all().add(dataset::Column::Uuid.eq(*pk))
    }

    fn create_key(data: &CreateDataset) -> String {
        data.name.clone()
    }

    fn model_key(model: &dataset::Model) -> String {
        model.name.clone()
    }

    fn key_condition(keys: &[String]) -> Condition {
        Condition::all().add(dataset::Column::Name.is_in(keys.iter().map(String::as_str)))
    }

    fn key_columns() -> Vec<dataset::Column> {
        vec![dataset::Column::Name]
    }

    /// Memberships go with the dataset; the recordings stay.
    async fn delete_dependents<C>(db: &C, model: &dataset::Model) -> ApiResult<()>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        delete_where::<dataset_recording::Entity, C>(
            db,
            membership_condition(model.id, None),
        )
        .await?;
        Ok(())
    }
}

fn membership_condition(dataset_id: i32, recording_id: Option<i32>) -> Condition {
    let condition = Condition::all().add(dataset_recording::Column::DatasetId.eq(dataset_id));
    match recording_id {
        Some(recording_id) => {
            condition.add(dataset_recording::Column::RecordingId.eq(recording_id))
        }
        None => condition,
    }
}

/// Path of `recording_path` relative to `audio_dir`, or unchanged when it
/// lies outside it.
fn relative_path(audio_dir: &str, recording_path: &str) -> String {
    Path::new(recording_path)
        .strip_prefix(audio_dir)
        .map(|path| path.to_string_lossy().into_owned())
        .unwrap_or_else(|_| recording_path.to_string())
}

pub type DatasetApi = BaseApi<Datasets>;

impl DatasetApi {
    pub async fn get_by_name<C>(&self, db: &C, name: &str) -> ApiResult<Dataset>
    where
        C: ConnectionTrait,
    {
        let model = get_object::<dataset::Entity, C>(
            db,
            Condition::all().add(dataset::Column::Name.eq(name)),
        )
        .await?;
        Ok(self.schema(model))
    }

    /// Add `recording` to the dataset. Adding a member twice is a no-op.
    #[instrument(skip_all, fields(dataset = %obj.uuid, recording = %recording.uuid))]
    pub async fn add_recording<C>(
        &self,
        db: &C,
        obj: &Dataset,
        recording: &Recording,
    ) -> ApiResult<Dataset>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let dataset = self.get_model(db, &obj.uuid).await?;
        let recording = get_object::<recording::Entity, C>(
            db,
            Condition::all().add(recording::Column::Uuid.eq(recording.uuid)),
        )
        .await?;

        let existing = dataset_recording::Entity::find()
            .filter(membership_condition(dataset.id, Some(recording.id)))
            .one(db)
            .await?;
        if existing.is_some() {
            debug!("Recording already in dataset");
            return Ok(self.schema(dataset));
        }

        create_object(
            db,
            dataset_recording::ActiveModel {
                dataset_id: Set(dataset.id),
                recording_id: Set(recording.id),
                path: Set(relative_path(&dataset.audio_dir, &recording.path)),
                created_on: Set(Utc::now()),
            },
        )
        .await?;
        Ok(self.schema(dataset))
    }

    /// Remove `recording` from the dataset. Removing a non-member is a no-op.
    #[instrument(skip_all, fields(dataset = %obj.uuid, recording = %recording.uuid))]
    pub async fn remove_recording<C>(
        &self,
        db: &C,
        obj: &Dataset,
        recording: &Recording,
    ) -> ApiResult<Dataset>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let dataset = self.get_model(db, &obj.uuid).await?;
        let removed = delete_where::<dataset_recording::Entity, C>(
            db,
            membership_condition(dataset.id, Some(recording.id)),
        )
        .await?;
        if removed == 0 {
            debug!("Recording not in dataset");
        }
        Ok(self.schema(dataset))
    }

    /// A page of the dataset's recordings plus their total count.
    pub async fn get_recordings<C>(
        &self,
        db: &C,
        obj: &Dataset,
        limit: Option<i64>,
        offset: Option<u64>,
    ) -> ApiResult<(Vec<Recording>, u64)>
    where
        C: ConnectionTrait,
    {
        let dataset = self.get_model(db, &obj.uuid).await?;
        let filters = RecordingFilter {
            dataset_id: Some(dataset.id),
            ..Default::default()
        }
        .into_conditions();
        let (models, total) = get_objects::<recording::Entity, C>(
            db,
            limit,
            offset,
            filters,
            Some(SortBy::asc(recording::Column::Path)),
        )
        .await?;
        Ok((models.into_iter().map(Recording::from).collect(), total))
    }
}
