use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Unique on `(recording_id, start_time, end_time)`.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "clip")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub uuid: Uuid,
    pub recording_id: i32,
    #[sea_orm(belongs_to, from = "recording_id", to = "id")]
    pub recording: HasOne<super::recording::Entity>,
    pub start_time: f64,
    pub end_time: f64,
    pub created_on: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
