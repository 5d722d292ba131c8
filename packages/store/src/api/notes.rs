use async_trait::async_trait;
use sea_orm::{ColumnTrait, Condition, ConnectionTrait, TransactionTrait};
use uuid::Uuid;

use super::common::utils::delete_where;
use super::common::{BaseApi, Resource};
use crate::entity::{
    clip_annotation_note, note, recording_note, sound_event_annotation_note,
};
use crate::error::ApiResult;
use crate::models::{CreateNote, Note, UpdateNote};

pub struct Notes;

#[async_trait]
impl Resource for Notes {
    type Entity = note::Entity;
    type Model = note::Model;
    type ActiveModel = note::ActiveModel;
    type PrimaryKey = Uuid;
    type Schema = Note;
    type Create = CreateNote;
    type Update = UpdateNote;
    type Key = Uuid;

    fn primary_key(obj: &Note) -> Uuid {
        obj.uuid
    }

    fn primary_key_condition(pk: &Uuid) -> Condition {
        Condition::all().add(note::Column::Uuid.eq(*pk))
    }

    fn create_key(data: &CreateNote) -> Uuid {
        data.uuid
    }

    fn model_key(model: &note::Model) -> Uuid {
        model.uuid
    }

    fn key_condition(keys: &[Uuid]) -> Condition {
        Condition::all().add(note::Column::Uuid.is_in(keys.iter().copied()))
    }

    fn key_columns() -> Vec<note::Column> {
        vec![note::Column::Uuid]
    }

    async fn delete_dependents<C>(db: &C, model: &note::Model) -> ApiResult<()>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let id = model.id;
        delete_where::<recording_note::Entity, C>(
            db,
            Condition::all().add(recording_note::Column::NoteId.eq(id)),
        )
        .await?;
        delete_where::<clip_annotation_note::Entity, C>(
            db,
            Condition::all().add(clip_annotation_note::Column::NoteId.eq(id)),
        )
        .await?;
        delete_where::<sound_event_annotation_note::Entity, C>(
            db,
            Condition::all().add(sound_event_annotation_note::Column::NoteId.eq(id)),
        )
        .await?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct NoteFilter {
    pub is_issue: Option<bool>,
    pub created_by_id: Option<i32>,
}

impl NoteFilter {
    pub fn into_conditions(self) -> Vec<Condition> {
        let mut conditions = Vec::new();
        if let Some(is_issue) = self.is_issue {
            conditions.push(Condition::all().add(note::Column::IsIssue.eq(is_issue)));
        }
        if let Some(created_by_id) = self.created_by_id {
            conditions.push(Condition::all().add(note::Column::CreatedById.eq(created_by_id)));
        }
        conditions
    }
}

pub type NoteApi = BaseApi<Notes>;
