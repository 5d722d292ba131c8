use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "annotation_project_tag")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub annotation_project_id: i32,
    #[sea_orm(primary_key)]
    pub tag_id: i32,

    #[sea_orm(belongs_to, from = "annotation_project_id", to = "id")]
    pub annotation_project: HasOne<super::annotation_project::Entity>,
    #[sea_orm(belongs_to, from = "tag_id", to = "id")]
    pub tag: HasOne<super::tag::Entity>,
    pub created_on: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
