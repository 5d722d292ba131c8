use async_trait::async_trait;
use sea_orm::{ColumnTrait, Condition, ConnectionTrait, TransactionTrait};
use tracing::{debug, instrument};

use super::common::utils::{delete_where, get_object};
use super::common::{BaseApi, HasId, Resource};
use crate::entity::{
    clip_evaluation_feature, clip_feature, evaluation_feature, feature_name, recording_feature,
    sound_event_evaluation_feature, sound_event_feature,
};
use crate::error::{ApiError, ApiResult};
use crate::models::{CreateFeatureName, FeatureName, UpdateFeatureName};

pub struct FeatureNames;

#[async_trait]
impl Resource for FeatureNames {
    type Entity = feature_name::Entity;
    type Model = feature_name::Model;
    type ActiveModel = feature_name::ActiveModel;
    type PrimaryKey = i32;
    type Schema = FeatureName;
    type Create = CreateFeatureName;
    type Update = UpdateFeatureName;
    type Key = String;

    fn primary_key(obj: &FeatureName) -> i32 {
        obj.id
    }

    fn primary_key_condition(pk: &i32) -> Condition {
        feature_name::Entity::id_condition(*pk)
    }

    fn create_key(data: &CreateFeatureName) -> String {
        data.name.clone()
    }

    fn model_key(model: &feature_name::Model) -> String {
        model.name.clone()
    }

    fn key_condition(keys: &[String]) -> Condition {
        Condition::all().add(feature_name::Column::Name.is_in(keys.iter().map(String::as_str)))
    }

    fn key_columns() -> Vec<feature_name::Column> {
        vec![feature_name::Column::Name]
    }

    async fn delete_dependents<C>(db: &C, model: &feature_name::Model) -> ApiResult<()>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let id = model.id;
        delete_where::<recording_feature::Entity, C>(
            db,
            Condition::all().add(recording_feature::Column::FeatureNameId.eq(id)),
        )
        .await?;
        delete_where::<clip_feature::Entity, C>(
            db,
            Condition::all().add(clip_feature::Column::FeatureNameId.eq(id)),
        )
        .await?;
        delete_where::<sound_event_feature::Entity, C>(
            db,
            Condition::all().add(sound_event_feature::Column::FeatureNameId.eq(id)),
        )
        .await?;
        delete_where::<evaluation_feature::Entity, C>(
            db,
            Condition::all().add(evaluation_feature::Column::FeatureNameId.eq(id)),
        )
        .await?;
        delete_where::<clip_evaluation_feature::Entity, C>(
            db,
            Condition::all().add(clip_evaluation_feature::Column::FeatureNameId.eq(id)),
        )
        .await?;
        delete_where::<sound_event_evaluation_feature::Entity, C>(
            db,
            Condition::all().add(sound_event_evaluation_feature::Column::FeatureNameId.eq(id)),
        )
        .await?;
        Ok(())
    }
}

pub type FeatureNameApi = BaseApi<FeatureNames>;

impl FeatureNameApi {
    pub async fn get_by_name<C>(&self, db: &C, name: &str) -> ApiResult<FeatureName>
    where
        C: ConnectionTrait,
    {
        let model = get_object::<feature_name::Entity, C>(
            db,
            Condition::all().add(feature_name::Column::Name.eq(name)),
        )
        .await?;
        Ok(self.schema(model))
    }

    #[instrument(skip(self, db))]
    pub async fn get_or_create<C>(&self, db: &C, name: &str) -> ApiResult<FeatureName>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        match self.get_by_name(db, name).await {
            Err(err) if err.is_not_found() => {}
            other => return other,
        }
        match self.create(db, CreateFeatureName::new(name)).await {
            Err(ApiError::DuplicateObject { .. }) => {
                debug!("Feature name created concurrently, fetching it");
                self.get_by_name(db, name).await
            }
            other => other,
        }
    }
}
