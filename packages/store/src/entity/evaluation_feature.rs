use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "evaluation_feature")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub evaluation_id: i32,
    #[sea_orm(primary_key)]
    pub feature_name_id: i32,

    #[sea_orm(belongs_to, from = "evaluation_id", to = "id")]
    pub evaluation: HasOne<super::evaluation::Entity>,
    #[sea_orm(belongs_to, from = "feature_name_id", to = "id")]
    pub feature_name: HasOne<super::feature_name::Entity>,
    pub value: f64,
    pub created_on: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
