use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "clip_evaluation")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub uuid: Uuid,
    pub evaluation_id: i32,
    #[sea_orm(belongs_to, from = "evaluation_id", to = "id")]
    pub evaluation: HasOne<super::evaluation::Entity>,
    pub clip_annotation_id: i32,
    #[sea_orm(belongs_to, from = "clip_annotation_id", to = "id")]
    pub clip_annotation: HasOne<super::clip_annotation::Entity>,
    pub clip_prediction_id: i32,
    #[sea_orm(belongs_to, from = "clip_prediction_id", to = "id")]
    pub clip_prediction: HasOne<super::clip_prediction::Entity>,
    pub score: f64,
    pub created_on: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
