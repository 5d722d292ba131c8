use std::collections::HashSet;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Query as SeaQuery;
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionSession, TransactionTrait,
};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::clip_annotations::ClipAnnotations;
use super::common::base::delete_resources;
use super::common::utils::{create_object, delete_where, get_object};
use super::common::{BaseApi, NoUpdate, Resource};
use crate::entity::{annotation_status_badge, annotation_task, clip_annotation};
use crate::error::{ApiError, ApiResult};
use crate::models::{
    AnnotationProject, AnnotationState, AnnotationTask, Clip, CreateAnnotationTask,
    CreateClipAnnotation, StatusBadge,
};

pub struct AnnotationTasks;

#[async_trait]
impl Resource for AnnotationTasks {
    type Entity = annotation_task::Entity;
    type Model = annotation_task::Model;
    type ActiveModel = annotation_task::ActiveModel;
    type PrimaryKey = Uuid;
    type Schema = AnnotationTask;
    type Create = CreateAnnotationTask;
    type Update = NoUpdate;
    /// `(annotation_project_id, clip_id)`
    type Key = (i32, i32);

    fn primary_key(obj: &AnnotationTask) -> Uuid {
        obj.uuid
    }

    fn primary_key_condition(pk: &Uuid) -> Condition {
        Condition::all().add(annotation_task::Column::Uuid.eq(*pk))
    }

    fn create_key(data: &CreateAnnotationTask) -> (i32, i32) {
        (data.annotation_project_id, data.clip_id)
    }

    fn model_key(model: &annotation_task::Model) -> (i32, i32) {
        (model.annotation_project_id, model.clip_id)
    }

    fn key_condition(keys: &[(i32, i32)]) -> Condition {
        keys.iter()
            .fold(Condition::any(), |condition, &(project_id, clip_id)| {
                condition.add(
                    Condition::all()
                        .add(annotation_task::Column::AnnotationProjectId.eq(project_id))
                        .add(annotation_task::Column::ClipId.eq(clip_id)),
                )
            })
    }

    fn key_columns() -> Vec<annotation_task::Column> {
        vec![
            annotation_task::Column::AnnotationProjectId,
            annotation_task::Column::ClipId,
        ]
    }

    async fn delete_dependents<C>(db: &C, model: &annotation_task::Model) -> ApiResult<()>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        delete_where::<annotation_status_badge::Entity, C>(
            db,
            Condition::all().add(annotation_status_badge::Column::AnnotationTaskId.eq(model.id)),
        )
        .await?;
        Ok(())
    }

    /// The clip annotation belongs to the task and goes with it.
    async fn delete_owned<C>(db: &C, model: &annotation_task::Model) -> ApiResult<()>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let clip_annotation = get_object::<clip_annotation::Entity, C>(
            db,
            Condition::all().add(clip_annotation::Column::Id.eq(model.clip_annotation_id)),
        )
        .await?;
        ClipAnnotations::delete_dependents(db, &clip_annotation).await?;
        delete_resources::<ClipAnnotations, C>(
            db,
            Condition::all().add(clip_annotation::Column::Id.eq(clip_annotation.id)),
        )
        .await?;
        Ok(())
    }
}

/// Filters for listing annotation tasks.
#[derive(Debug, Clone, Default)]
pub struct AnnotationTaskFilter {
    pub annotation_project_id: Option<i32>,
    pub clip_id: Option<i32>,
    /// Only tasks with a badge in this state.
    pub state: Option<AnnotationState>,
    /// Only tasks with a badge from this user.
    pub user_id: Option<i32>,
}

impl AnnotationTaskFilter {
    pub fn into_conditions(self) -> Vec<Condition> {
        let mut conditions = Vec::new();
        if let Some(project_id) = self.annotation_project_id {
            conditions.push(
                Condition::all().add(annotation_task::Column::AnnotationProjectId.eq(project_id)),
            );
        }
        if let Some(clip_id) = self.clip_id {
            conditions.push(Condition::all().add(annotation_task::Column::ClipId.eq(clip_id)));
        }
        if self.state.is_some() || self.user_id.is_some() {
            let mut badges = SeaQuery::select()
                .column(annotation_status_badge::Column::AnnotationTaskId)
                .from(annotation_status_badge::Entity)
                .to_owned();
            if let Some(state) = self.state {
                badges.and_where(annotation_status_badge::Column::State.eq(state.as_str()));
            }
            if let Some(user_id) = self.user_id {
                badges.and_where(annotation_status_badge::Column::UserId.eq(user_id));
            }
            conditions.push(Condition::all().add(annotation_task::Column::Id.in_subquery(badges)));
        }
        conditions
    }
}

fn badge_condition(task_id: i32, state: AnnotationState, user_id: Option<i32>) -> Condition {
    let condition = Condition::all()
        .add(annotation_status_badge::Column::AnnotationTaskId.eq(task_id))
        .add(annotation_status_badge::Column::State.eq(state.as_str()));
    match user_id {
        Some(user_id) => condition.add(annotation_status_badge::Column::UserId.eq(user_id)),
        None => condition.add(annotation_status_badge::Column::UserId.is_null()),
    }
}

pub type AnnotationTaskApi = BaseApi<AnnotationTasks>;

impl AnnotationTaskApi {
    /// Create the task for `clip` in `project` together with the clip
    /// annotation it owns. Fails with `DuplicateObject` when the clip
    /// already has a task in the project.
    #[instrument(skip_all, fields(project = %project.uuid, clip = %clip.uuid))]
    pub async fn create_task<C>(
        &self,
        db: &C,
        project: &AnnotationProject,
        clip: &Clip,
    ) -> ApiResult<AnnotationTask>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let txn = db.begin().await?;
        let created = async {
            let clip_annotation =
                create_object(&txn, CreateClipAnnotation::new(clip.id).into_active_model())
                    .await?;
            let task = CreateAnnotationTask::new(project.id, clip.id, clip_annotation.id);
            create_object(&txn, task.into_active_model()).await
        }
        .await;

        match created {
            Ok(model) => {
                txn.commit().await?;
                Ok(self.schema(model))
            }
            Err(err) => {
                txn.rollback().await?;
                Err(err)
            }
        }
    }

    /// Create tasks for every clip that has none in `project` yet. Returns
    /// the new tasks in clip order.
    #[instrument(skip_all, fields(project = %project.uuid, count = clips.len()))]
    pub async fn create_tasks<C>(
        &self,
        db: &C,
        project: &AnnotationProject,
        clips: &[Clip],
    ) -> ApiResult<Vec<AnnotationTask>>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let clip_ids: Vec<i32> = clips.iter().map(|clip| clip.id).collect();
        let existing: HashSet<i32> = annotation_task::Entity::find()
            .filter(annotation_task::Column::AnnotationProjectId.eq(project.id))
            .filter(annotation_task::Column::ClipId.is_in(clip_ids))
            .select_only()
            .column(annotation_task::Column::ClipId)
            .into_tuple::<i32>()
            .all(db)
            .await?
            .into_iter()
            .collect();

        let mut seen = existing;
        let mut tasks = Vec::new();
        for clip in clips {
            if !seen.insert(clip.id) {
                continue;
            }
            tasks.push(self.create_task(db, project, clip).await?);
        }
        info!(created = tasks.len(), "Created annotation tasks");
        Ok(tasks)
    }

    /// Record that the task reached `state`. Recording the same state for
    /// the same user twice is a no-op.
    #[instrument(skip(self, db, obj), fields(task = %obj.uuid))]
    pub async fn add_status_badge<C>(
        &self,
        db: &C,
        obj: &AnnotationTask,
        state: AnnotationState,
        user_id: Option<i32>,
    ) -> ApiResult<AnnotationTask>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let task = self.get_model(db, &obj.uuid).await?;
        let existing = annotation_status_badge::Entity::find()
            .filter(badge_condition(task.id, state, user_id))
            .one(db)
            .await?;
        if existing.is_some() {
            debug!("Status badge already present");
            return Ok(self.schema(task));
        }

        create_object(
            db,
            annotation_status_badge::ActiveModel {
                annotation_task_id: Set(task.id),
                user_id: Set(user_id),
                state: Set(state.as_str().to_string()),
                created_on: Set(Utc::now()),
                ..Default::default()
            },
        )
        .await?;
        Ok(self.schema(task))
    }

    /// Drop the badge. Removing a badge the task does not have is a no-op.
    #[instrument(skip(self, db, obj), fields(task = %obj.uuid))]
    pub async fn remove_status_badge<C>(
        &self,
        db: &C,
        obj: &AnnotationTask,
        state: AnnotationState,
        user_id: Option<i32>,
    ) -> ApiResult<AnnotationTask>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let task = self.get_model(db, &obj.uuid).await?;
        let removed = delete_where::<annotation_status_badge::Entity, C>(
            db,
            badge_condition(task.id, state, user_id),
        )
        .await?;
        if removed == 0 {
            debug!("Status badge not present");
        }
        Ok(self.schema(task))
    }

    /// Badges of the task, oldest first.
    pub async fn get_status_badges<C>(
        &self,
        db: &C,
        obj: &AnnotationTask,
    ) -> ApiResult<Vec<StatusBadge>>
    where
        C: ConnectionTrait,
    {
        let task = self.get_model(db, &obj.uuid).await?;
        let badges = annotation_status_badge::Entity::find()
            .filter(annotation_status_badge::Column::AnnotationTaskId.eq(task.id))
            .order_by_asc(annotation_status_badge::Column::CreatedOn)
            .order_by_asc(annotation_status_badge::Column::Id)
            .all(db)
            .await?;
        badges
            .into_iter()
            .map(|badge| {
                StatusBadge::try_from(badge).map_err(|err| ApiError::Database(DbErr::Type(err)))
            })
            .collect()
    }
}
