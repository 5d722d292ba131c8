use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "dataset_recording")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub dataset_id: i32,
    #[sea_orm(primary_key)]
    pub recording_id: i32,

    #[sea_orm(belongs_to, from = "dataset_id", to = "id")]
    pub dataset: HasOne<super::dataset::Entity>,
    #[sea_orm(belongs_to, from = "recording_id", to = "id")]
    pub recording: HasOne<super::recording::Entity>,
    /// Recording path relative to the dataset audio directory.
    pub path: String,
    pub created_on: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
