use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Unique on `(annotation_project_id, clip_id)`.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "annotation_task")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub uuid: Uuid,
    pub annotation_project_id: i32,
    #[sea_orm(belongs_to, from = "annotation_project_id", to = "id")]
    pub annotation_project: HasOne<super::annotation_project::Entity>,
    pub clip_id: i32,
    #[sea_orm(belongs_to, from = "clip_id", to = "id")]
    pub clip: HasOne<super::clip::Entity>,
    #[sea_orm(unique)]
    pub clip_annotation_id: i32,
    #[sea_orm(belongs_to, from = "clip_annotation_id", to = "id")]
    pub clip_annotation: HasOne<super::clip_annotation::Entity>,
    pub created_on: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
