use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ColumnTrait, Condition, ConnectionTrait, Set, TransactionTrait};
use uuid::Uuid;

use super::common::associations::{clear_notes, clear_tags};
use super::common::{BaseApi, HasNotes, HasTags, NoUpdate, Resource};
use crate::entity::{
    sound_event_annotation, sound_event_annotation_note, sound_event_annotation_tag,
};
use crate::error::ApiResult;
use crate::models::{CreateSoundEventAnnotation, SoundEventAnnotation};

impl HasTags for sound_event_annotation::Entity {
    type TagLink = sound_event_annotation_tag::Entity;
    type TagData = Option<i32>;

    fn tag_link_parent_column() -> sound_event_annotation_tag::Column {
        sound_event_annotation_tag::Column::SoundEventAnnotationId
    }

    fn tag_link_tag_column() -> sound_event_annotation_tag::Column {
        sound_event_annotation_tag::Column::TagId
    }

    fn new_tag_link(
        parent_id: i32,
        tag_id: i32,
        created_by_id: Option<i32>,
    ) -> sound_event_annotation_tag::ActiveModel {
        sound_event_annotation_tag::ActiveModel {
            sound_event_annotation_id: Set(parent_id),
            tag_id: Set(tag_id),
            created_by_id: Set(created_by_id),
            created_on: Set(Utc::now()),
        }
    }
}

impl HasNotes for sound_event_annotation::Entity {
    type NoteLink = sound_event_annotation_note::Entity;

    fn note_link_parent_column() -> sound_event_annotation_note::Column {
        sound_event_annotation_note::Column::SoundEventAnnotationId
    }

    fn note_link_note_column() -> sound_event_annotation_note::Column {
        sound_event_annotation_note::Column::NoteId
    }

    fn new_note_link(parent_id: i32, note_id: i32) -> sound_event_annotation_note::ActiveModel {
        sound_event_annotation_note::ActiveModel {
            sound_event_annotation_id: Set(parent_id),
            note_id: Set(note_id),
            created_on: Set(Utc::now()),
        }
    }
}

pub struct SoundEventAnnotations;

#[async_trait]
impl Resource for SoundEventAnnotations {
    type Entity = sound_event_annotation::Entity;
    type Model = sound_event_annotation::Model;
    type ActiveModel = sound_event_annotation::ActiveModel;
    type PrimaryKey = Uuid;
    type Schema = SoundEventAnnotation;
    type Create = CreateSoundEventAnnotation;
    type Update = NoUpdate;
    type Key = Uuid;

    fn primary_key(obj: &SoundEventAnnotation) -> Uuid {
        obj.uuid
    }

    fn primary_key_condition(pk: &Uuid) -> Condition {
        Condition::all().add(sound_event_annotation::Column::Uuid.eq(*pk))
    }

    fn create_key(data: &CreateSoundEventAnnotation) -> Uuid {
        data.uuid
    }

    fn model_key(model: &sound_event_annotation::Model) -> Uuid {
        model.uuid
    }

    fn key_condition(keys: &[Uuid]) -> Condition {
        Condition::all().add(sound_event_annotation::Column::Uuid.is_in(keys.iter().copied()))
    }

    fn key_columns() -> Vec<sound_event_annotation::Column> {
        vec![sound_event_annotation::Column::Uuid]
    }

    async fn delete_dependents<C>(db: &C, model: &sound_event_annotation::Model) -> ApiResult<()>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        clear_tags::<sound_event_annotation::Entity, C>(db, model.id).await?;
        clear_notes::<sound_event_annotation::Entity, C>(db, model.id).await?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct SoundEventAnnotationFilter {
    pub clip_annotation_id: Option<i32>,
    pub sound_event_id: Option<i32>,
    pub created_by_id: Option<i32>,
}

impl SoundEventAnnotationFilter {
    pub fn into_conditions(self) -> Vec<Condition> {
        let mut conditions = Vec::new();
        if let Some(id) = self.clip_annotation_id {
            conditions
                .push(Condition::all().add(sound_event_annotation::Column::ClipAnnotationId.eq(id)));
        }
        if let Some(id) = self.sound_event_id {
            conditions.push(Condition::all().add(sound_event_annotation::Column::SoundEventId.eq(id)));
        }
        if let Some(id) = self.created_by_id {
            conditions.push(Condition::all().add(sound_event_annotation::Column::CreatedById.eq(id)));
        }
        conditions
    }
}

pub type SoundEventAnnotationApi = BaseApi<SoundEventAnnotations>;
