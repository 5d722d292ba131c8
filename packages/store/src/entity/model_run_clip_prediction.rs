use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "model_run_clip_prediction")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub model_run_id: i32,
    #[sea_orm(primary_key)]
    pub clip_prediction_id: i32,

    #[sea_orm(belongs_to, from = "model_run_id", to = "id")]
    pub model_run: HasOne<super::model_run::Entity>,
    #[sea_orm(belongs_to, from = "clip_prediction_id", to = "id")]
    pub clip_prediction: HasOne<super::clip_prediction::Entity>,
    pub created_on: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
