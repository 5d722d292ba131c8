use async_trait::async_trait;
use sea_orm::{ColumnTrait, Condition, ConnectionTrait, TransactionTrait};
use tracing::{debug, instrument};

use super::common::utils::{delete_where, get_object, search_condition};
use super::common::{BaseApi, HasId, Resource};
use crate::entity::{
    annotation_project_tag, clip_annotation_tag, clip_prediction_tag, recording_tag,
    sound_event_annotation_tag, sound_event_prediction_tag, tag,
};
use crate::error::{ApiError, ApiResult};
use crate::models::{CreateTag, Tag, UpdateTag};

pub struct Tags;

#[async_trait]
impl Resource for Tags {
    type Entity = tag::Entity;
    type Model = tag::Model;
    type ActiveModel = tag::ActiveModel;
    type PrimaryKey = i32;
    type Schema = Tag;
    type Create = CreateTag;
    type Update = UpdateTag;
    type Key = (String, String);

    fn primary_key(obj: &Tag) -> i32 {
        obj.id
    }

    fn primary_key_condition(pk: &i32) -> Condition {
        tag::Entity::id_condition(*pk)
    }

    fn create_key(data: &CreateTag) -> (String, String) {
        (data.key.clone(), data.value.clone())
    }

    fn model_key(model: &tag::Model) -> (String, String) {
        (model.key.clone(), model.value.clone())
    }

    fn key_condition(keys: &[(String, String)]) -> Condition {
        keys.iter().fold(Condition::any(), |condition, (key, value)| {
            condition.add(key_value_condition(key, value))
        })
    }

    fn key_columns() -> Vec<tag::Column> {
        vec![tag::Column::Key, tag::Column::Value]
    }

    /// Detach the tag from everything that carries it.
    async fn delete_dependents<C>(db: &C, model: &tag::Model) -> ApiResult<()>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let id = model.id;
        delete_where::<recording_tag::Entity, C>(
            db,
            Condition::all().add(recording_tag::Column::TagId.eq(id)),
        )
        .await?;
        delete_where::<annotation_project_tag::Entity, C>(
            db,
            Condition::all().add(annotation_project_tag::Column::TagId.eq(id)),
        )
        .await?;
        delete_where::<clip_annotation_tag::Entity, C>(
            db,
            Condition::all().add(clip_annotation_tag::Column::TagId.eq(id)),
        )
        .await?;
        delete_where::<sound_event_annotation_tag::Entity, C>(
            db,
            Condition::all().add(sound_event_annotation_tag::Column::TagId.eq(id)),
        )
        .await?;
        delete_where::<clip_prediction_tag::Entity, C>(
            db,
            Condition::all().add(clip_prediction_tag::Column::TagId.eq(id)),
        )
        .await?;
        delete_where::<sound_event_prediction_tag::Entity, C>(
            db,
            Condition::all().add(sound_event_prediction_tag::Column::TagId.eq(id)),
        )
        .await?;
        Ok(())
    }
}

fn key_value_condition(key: &str, value: &str) -> Condition {
    Condition::all()
        .add(tag::Column::Key.eq(key))
        .add(tag::Column::Value.eq(value))
}

/// Filters for listing tags.
#[derive(Debug, Clone, Default)]
pub struct TagFilter {
    pub key: Option<String>,
    /// Substring match on the value, case-insensitive.
    pub search: Option<String>,
}

impl TagFilter {
    pub fn into_conditions(self) -> Vec<Condition> {
        let mut conditions = Vec::new();
        if let Some(key) = self.key {
            conditions.push(Condition::all().add(tag::Column::Key.eq(key)));
        }
        if let Some(search) = self.search
            && let Some(condition) = search_condition(tag::Column::Value, &search)
        {
            conditions.push(condition);
        }
        conditions
    }
}

pub type TagApi = BaseApi<Tags>;

impl TagApi {
    pub async fn get_by_key_value<C>(&self, db: &C, key: &str, value: &str) -> ApiResult<Tag>
    where
        C: ConnectionTrait,
    {
        let model = get_object::<tag::Entity, C>(db, key_value_condition(key, value)).await?;
        Ok(self.schema(model))
    }

    /// Return the `(key, value)` tag, creating it when missing.
    #[instrument(skip(self, db))]
    pub async fn get_or_create<C>(&self, db: &C, key: &str, value: &str) -> ApiResult<Tag>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        match self.get_by_key_value(db, key, value).await {
            Err(err) if err.is_not_found() => {}
            other => return other,
        }
        match self.create(db, CreateTag::new(key, value)).await {
            Err(ApiError::DuplicateObject { .. }) => {
                debug!("Tag created concurrently, fetching it");
                self.get_by_key_value(db, key, value).await
            }
            other => other,
        }
    }
}
