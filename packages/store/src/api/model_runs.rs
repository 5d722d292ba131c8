use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Query as SeaQuery;
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter, Set, TransactionTrait,
};
use tracing::{debug, instrument};
use uuid::Uuid;

use super::common::utils::{SortBy, create_object, delete_where, get_object, get_objects};
use super::common::{BaseApi, Resource};
use crate::entity::{clip_prediction, model_run, model_run_clip_prediction};
use crate::error::ApiResult;
use crate::models::{ClipPrediction, CreateModelRun, ModelRun, UpdateModelRun};

pub struct ModelRuns;

#[async_trait]
impl Resource for ModelRuns {
    type Entity = model_run::Entity;
    type Model = model_run::Model;
    type ActiveModel = model_run::ActiveModel;
    type PrimaryKey = Uuid;
    type Schema = ModelRun;
    type Create = CreateModelRun;
    type Update = UpdateModelRun;
    /// `(name, version)`
    type Key = (String, String);

    fn primary_key(obj: &ModelRun) -> Uuid {
        obj.uuid
    }

    fn primary_key_condition(pk: &Uuid) -> Condition {
        Condition::all().add(model_run::Column::Uuid.eq(*pk))
    }

    fn create_key(data: &CreateModelRun) -> (String, String) {
        (data.name.clone(), data.version.clone())
    }

    fn model_key(model: &model_run::Model) -> (String, String) {
        (model.name.clone(), model.version.clone())
    }

    fn key_condition(keys: &[(String, String)]) -> Condition {
        keys.iter().fold(Condition::any(), |condition, (name, version)| {
            condition.add(
                Condition::all()
                    .add(model_run::Column::Name.eq(name.as_str()))
                    .add(model_run::Column::Version.eq(version.as_str())),
            )
        })
    }

    fn key_columns() -> Vec<model_run::Column> {
        vec![model_run::Column::Name, model_run::Column::Version]
    }

    /// Unlinks the run's predictions. The predictions themselves stay.
    async fn delete_dependents<C>(db: &C, model: &model_run::Model) -> ApiResult<()>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        delete_where::<model_run_clip_prediction::Entity, C>(
            db,
            Condition::all().add(model_run_clip_prediction::Column::ModelRunId.eq(model.id)),
        )
        .await?;
        Ok(())
    }
}

fn link_condition(model_run_id: i32, clip_prediction_id: i32) -> Condition {
    Condition::all()
        .add(model_run_clip_prediction::Column::ModelRunId.eq(model_run_id))
        .add(model_run_clip_prediction::Column::ClipPredictionId.eq(clip_prediction_id))
}

pub type ModelRunApi = BaseApi<ModelRuns>;

impl ModelRunApi {
    pub async fn get_by_name_version<C>(
        &self,
        db: &C,
        name: &str,
        version: &str,
    ) -> ApiResult<ModelRun>
    where
        C: ConnectionTrait,
    {
        let model = get_object::<model_run::Entity, C>(
            db,
            Condition::all()
                .add(model_run::Column::Name.eq(name))
                .add(model_run::Column::Version.eq(version)),
        )
        .await?;
        Ok(self.schema(model))
    }

    /// Attach a clip prediction to the run. Attaching it twice is a no-op.
    #[instrument(skip_all, fields(model_run = %obj.uuid, clip_prediction = %prediction.uuid))]
    pub async fn add_clip_prediction<C>(
        &self,
        db: &C,
        obj: &ModelRun,
        prediction: &ClipPrediction,
    ) -> ApiResult<ModelRun>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let run = self.get_model(db, &obj.uuid).await?;
        let prediction = get_object::<clip_prediction::Entity, C>(
            db,
            Condition::all().add(clip_prediction::Column::Uuid.eq(prediction.uuid)),
        )
        .await?;

        let existing = model_run_clip_prediction::Entity::find()
            .filter(link_condition(run.id, prediction.id))
            .one(db)
            .await?;
        if existing.is_some() {
            debug!("Clip prediction already in model run");
            return Ok(self.schema(run));
        }

        create_object(
            db,
            model_run_clip_prediction::ActiveModel {
                model_run_id: Set(run.id),
                clip_prediction_id: Set(prediction.id),
                created_on: Set(Utc::now()),
            },
        )
        .await?;
        Ok(self.schema(run))
    }

    #[instrument(skip_all, fields(model_run = %obj.uuid, clip_prediction = %prediction.uuid))]
    pub async fn remove_clip_prediction<C>(
        &self,
        db: &C,
        obj: &ModelRun,
        prediction: &ClipPrediction,
    ) -> ApiResult<ModelRun>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let run = self.get_model(db, &obj.uuid).await?;
        let removed = delete_where::<model_run_clip_prediction::Entity, C>(
            db,
            link_condition(run.id, prediction.id),
        )
        .await?;
        if removed == 0 {
            debug!("Clip prediction not in model run");
        }
        Ok(self.schema(run))
    }

    /// A page of the run's clip predictions, oldest first, plus their count.
    pub async fn get_clip_predictions<C>(
        &self,
        db: &C,
        obj: &ModelRun,
        limit: Option<i64>,
        offset: Option<u64>,
    ) -> ApiResult<(Vec<ClipPrediction>, u64)>
    where
        C: ConnectionTrait,
    {
        let run = self.get_model(db, &obj.uuid).await?;
        let in_run = Condition::all().add(
            clip_prediction::Column::Id.in_subquery(
                SeaQuery::select()
                    .column(model_run_clip_prediction::Column::ClipPredictionId)
                    .from(model_run_clip_prediction::Entity)
                    .and_where(model_run_clip_prediction::Column::ModelRunId.eq(run.id))
                    .to_owned(),
            ),
        );
        let (models, total) = get_objects::<clip_prediction::Entity, C>(
            db,
            limit,
            offset,
            vec![in_run],
            Some(SortBy::asc(clip_prediction::Column::Id)),
        )
        .await?;
        Ok((models.into_iter().map(ClipPrediction::from).collect(), total))
    }
}
