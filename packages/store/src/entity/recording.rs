use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "recording")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub uuid: Uuid,
    /// Path relative to the audio directory.
    #[sea_orm(unique)]
    pub path: String,
    pub hash: Option<String>,
    /// In seconds.
    pub duration: f64,
    pub channels: i32,
    /// In Hz.
    pub samplerate: i32,
    pub time_expansion: f64,
    pub date: Option<Date>,
    pub time: Option<Time>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub rights: Option<String>,
    pub created_on: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
