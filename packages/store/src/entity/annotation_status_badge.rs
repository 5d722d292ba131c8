use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "annotation_status_badge")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub annotation_task_id: i32,
    #[sea_orm(belongs_to, from = "annotation_task_id", to = "id")]
    pub annotation_task: HasOne<super::annotation_task::Entity>,
    pub user_id: Option<i32>,
    /// One of "assigned", "completed", "verified", "rejected".
    pub state: String,
    pub created_on: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
