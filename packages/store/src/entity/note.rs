use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "note")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub uuid: Uuid,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    pub is_issue: bool,
    pub created_by_id: Option<i32>,
    pub created_on: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
