use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sound_event")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub uuid: Uuid,
    pub recording_id: i32,
    #[sea_orm(belongs_to, from = "recording_id", to = "id")]
    pub recording: HasOne<super::recording::Entity>,
    /// e.g. "TimeInterval", "BoundingBox".
    pub geometry_type: String,
    /// GeoJSON-like coordinates.
    pub geometry: Json,
    pub created_on: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
