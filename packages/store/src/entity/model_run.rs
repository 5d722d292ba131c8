use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Unique on `(name, version)`.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "model_run")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub uuid: Uuid,
    pub name: String,
    pub version: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub created_on: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
