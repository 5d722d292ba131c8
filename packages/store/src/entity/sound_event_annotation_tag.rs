use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sound_event_annotation_tag")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub sound_event_annotation_id: i32,
    #[sea_orm(primary_key)]
    pub tag_id: i32,

    #[sea_orm(belongs_to, from = "sound_event_annotation_id", to = "id")]
    pub sound_event_annotation: HasOne<super::sound_event_annotation::Entity>,
    #[sea_orm(belongs_to, from = "tag_id", to = "id")]
    pub tag: HasOne<super::tag::Entity>,
    pub created_by_id: Option<i32>,
    pub created_on: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
