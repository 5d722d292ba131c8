use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "clip_annotation")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub uuid: Uuid,
    pub clip_id: i32,
    #[sea_orm(belongs_to, from = "clip_id", to = "id")]
    pub clip: HasOne<super::clip::Entity>,
    pub created_on: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
