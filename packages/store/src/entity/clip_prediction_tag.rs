use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "clip_prediction_tag")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub clip_prediction_id: i32,
    #[sea_orm(primary_key)]
    pub tag_id: i32,

    #[sea_orm(belongs_to, from = "clip_prediction_id", to = "id")]
    pub clip_prediction: HasOne<super::clip_prediction::Entity>,
    #[sea_orm(belongs_to, from = "tag_id", to = "id")]
    pub tag: HasOne<super::tag::Entity>,
    pub score: f64,
    pub created_on: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
