use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sound_event_prediction")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub uuid: Uuid,
    pub clip_prediction_id: i32,
    #[sea_orm(belongs_to, from = "clip_prediction_id", to = "id")]
    pub clip_prediction: HasOne<super::clip_prediction::Entity>,
    pub sound_event_id: i32,
    #[sea_orm(belongs_to, from = "sound_event_id", to = "id")]
    pub sound_event: HasOne<super::sound_event::Entity>,
    pub score: f64,
    pub created_on: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
