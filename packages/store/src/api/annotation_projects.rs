use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter, Set, TransactionTrait,
};
use uuid::Uuid;

use super::annotation_tasks::AnnotationTaskApi;
use super::common::associations::clear_tags;
use super::common::utils::get_object;
use super::common::{BaseApi, HasTags, Resource};
use crate::entity::{annotation_project, annotation_project_tag, annotation_task};
use crate::error::ApiResult;
use crate::models::{
    AnnotationProject, AnnotationTask, Clip, CreateAnnotationProject, UpdateAnnotationProject,
};

impl HasTags for annotation_project::Entity {
    type TagLink = annotation_project_tag::Entity;
    type TagData = ();

    fn tag_link_parent_column() -> annotation_project_tag::Column {
        annotation_project_tag::Column::AnnotationProjectId
    }

    fn tag_link_tag_column() -> annotation_project_tag::Column {
        annotation_project_tag::Column::TagId
    }

    fn new_tag_link(parent_id: i32, tag_id: i32, _data: ()) -> annotation_project_tag::ActiveModel {
        annotation_project_tag::ActiveModel {
            annotation_project_id: Set(parent_id),
            tag_id: Set(tag_id),
            created_on: Set(Utc::now()),
        }
    }
}

pub struct AnnotationProjects;

#[async_trait]
impl Resource for AnnotationProjects {
    type Entity = annotation_project::Entity;
    type Model = annotation_project::Model;
    type ActiveModel = annotation_project::ActiveModel;
    type PrimaryKey = Uuid;
    type Schema = AnnotationProject;
    type Create = CreateAnnotationProject;
    type Update = UpdateAnnotationProject;
    type Key = String;

    fn primary_key(obj: &AnnotationProject) -> Uuid {
        obj.uuid
    }

    fn primary_key_condition(pk: &Uuid) -> Condition {
        Condition::all().add(annotation_project::Column::Uuid.eq(*pk))
    }

    fn create_key(data: &CreateAnnotationProject) -> String {
        data.name.clone()
    }

    fn model_key(model: &annotation_project::Model) -> String {
        model.name.clone()
    }

    fn key_condition(keys: &[String]) -> Condition {
        Condition::all()
            .add(annotation_project::Column::Name.is_in(keys.iter().map(String::as_str)))
    }

    fn key_columns() -> Vec<annotation_project::Column> {
        vec![annotation_project::Column::Name]
    }

    /// Tasks and their clip annotations go with the project.
    async fn delete_dependents<C>(db: &C, model: &annotation_project::Model) -> ApiResult<()>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        clear_tags::<annotation_project::Entity, C>(db, model.id).await?;

        let tasks = annotation_task::Entity::find()
            .filter(annotation_task::Column::AnnotationProjectId.eq(model.id))
            .all(db)
            .await?;
        let api = AnnotationTaskApi::new();
        for task in tasks {
            api.delete(db, &AnnotationTask::from(task)).await?;
        }
        Ok(())
    }
}

pub type AnnotationProjectApi = BaseApi<AnnotationProjects>;

impl AnnotationProjectApi {
    pub async fn get_by_name<C>(&self, db: &C, name: &str) -> ApiResult<AnnotationProject>
    where
        C: ConnectionTrait,
    {
        let model = get_object::<annotation_project::Entity, C>(
            db,
            Condition::all().add(annotation_project::Column::Name.eq(name)),
        )
        .await?;
        Ok(self.schema(model))
    }

    /// Add `clip` to the project as a new annotation task.
    pub async fn add_task<C>(
        &self,
        db: &C,
        obj: &AnnotationProject,
        clip: &Clip,
    ) -> ApiResult<AnnotationTask>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        AnnotationTaskApi::new().create_task(db, obj, clip).await
    }
}
