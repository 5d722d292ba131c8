use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sound_event_evaluation")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub uuid: Uuid,
    pub clip_evaluation_id: i32,
    #[sea_orm(belongs_to, from = "clip_evaluation_id", to = "id")]
    pub clip_evaluation: HasOne<super::clip_evaluation::Entity>,
    /// Matched sound event prediction, if any.
    pub source_id: Option<i32>,
    /// Matched sound event annotation, if any.
    pub target_id: Option<i32>,
    pub affinity: f64,
    pub score: f64,
    pub created_on: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
