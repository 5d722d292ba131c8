use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Query as SeaQuery;
use sea_orm::{ColumnTrait, Condition, ConnectionTrait, Set, TransactionTrait};
use uuid::Uuid;

use super::common::associations::{clear_notes, clear_tags};
use super::common::base::delete_resources;
use super::common::utils::delete_where;
use super::common::{BaseApi, HasNotes, HasTags, NoUpdate, Resource};
use super::sound_event_annotations::SoundEventAnnotations;
use crate::entity::{
    clip_annotation, clip_annotation_note, clip_annotation_tag, sound_event_annotation,
    sound_event_annotation_note, sound_event_annotation_tag,
};
use crate::error::ApiResult;
use crate::models::{ClipAnnotation, CreateClipAnnotation};

impl HasTags for clip_annotation::Entity {
    type TagLink = clip_annotation_tag::Entity;
    /// Id of the user who added the tag.
    type TagData = Option<i32>;

    fn tag_link_parent_column() -> clip_annotation_tag::Column {
        clip_annotation_tag::Column::ClipAnnotationId
    }

    fn tag_link_tag_column() -> clip_annotation_tag::Column {
        clip_annotation_tag::Column::TagId
    }

    fn new_tag_link(
        parent_id: i32,
        tag_id: i32,
        created_by_id: Option<i32>,
    ) -> clip_annotation_tag::ActiveModel {
        clip_annotation_tag::ActiveModel {
            clip_annotation_id: Set(parent_id),
            tag_id: Set(tag_id),
            created_by_id: Set(created_by_id),
            created_on: Set(Utc::now()),
        }
    }
}

impl HasNotes for clip_annotation::Entity {
    type NoteLink = clip_annotation_note::Entity;

    fn note_link_parent_column() -> clip_annotation_note::Column {
        clip_annotation_note::Column::ClipAnnotationId
    }

    fn note_link_note_column() -> clip_annotation_note::Column {
        clip_annotation_note::Column::NoteId
    }

    fn new_note_link(parent_id: i32, note_id: i32) -> clip_annotation_note::ActiveModel {
        clip_annotation_note::ActiveModel {
            clip_annotation_id: Set(parent_id),
            note_id: Set(note_id),
            created_on: Set(Utc::now()),
        }
    }
}

pub struct ClipAnnotations;

#[async_trait]
impl Resource for ClipAnnotations {
    type Entity = clip_annotation::Entity;
    type Model = clip_annotation::Model;
    type ActiveModel = clip_annotation::ActiveModel;
    type PrimaryKey = Uuid;
    type Schema = ClipAnnotation;
    type Create = CreateClipAnnotation;
    type Update = NoUpdate;
    type Key = Uuid;

    fn primary_key(obj: &ClipAnnotation) -> Uuid {
        obj.uuid
    }

    fn primary_key_condition(pk: &Uuid) -> Condition {
        Condition::all().add(clip_annotation::Column::Uuid.eq(*pk))
    }

    fn create_key(data: &CreateClipAnnotation) -> Uuid {
        data.uuid
    }

    fn model_key(model: &clip_annotation::Model) -> Uuid {
        model.uuid
    }

    fn key_condition(keys: &[Uuid]) -> Condition {
        Condition::all().add(clip_annotation::Column::Uuid.is_in(keys.iter().copied()))
    }

    fn key_columns() -> Vec<clip_annotation::Column> {
        vec![clip_annotation::Column::Uuid]
    }

    /// Tags, notes and sound event annotations go with the clip annotation.
    async fn delete_dependents<C>(db: &C, model: &clip_annotation::Model) -> ApiResult<()>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        clear_tags::<clip_annotation::Entity, C>(db, model.id).await?;
        clear_notes::<clip_annotation::Entity, C>(db, model.id).await?;

        let owned = || {
            SeaQuery::select()
                .column(sound_event_annotation::Column::Id)
                .from(sound_event_annotation::Entity)
                .and_where(sound_event_annotation::Column::ClipAnnotationId.eq(model.id))
                .to_owned()
        };
        delete_where::<sound_event_annotation_tag::Entity, C>(
            db,
            Condition::all()
                .add(sound_event_annotation_tag::Column::SoundEventAnnotationId.in_subquery(owned())),
        )
        .await?;
        delete_where::<sound_event_annotation_note::Entity, C>(
            db,
            Condition::all().add(
                sound_event_annotation_note::Column::SoundEventAnnotationId.in_subquery(owned()),
            ),
        )
        .await?;
        delete_resources::<SoundEventAnnotations, C>(
            db,
            Condition::all().add(sound_event_annotation::Column::ClipAnnotationId.eq(model.id)),
        )
        .await?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClipAnnotationFilter {
    pub clip_id: Option<i32>,
    /// Only annotations carrying this tag.
    pub tag_id: Option<i32>,
}

impl ClipAnnotationFilter {
    pub fn into_conditions(self) -> Vec<Condition> {
        let mut conditions = Vec::new();
        if let Some(clip_id) = self.clip_id {
            conditions.push(Condition::all().add(clip_annotation::Column::ClipId.eq(clip_id)));
        }
        if let Some(tag_id) = self.tag_id {
            conditions.push(
                Condition::all().add(
                    clip_annotation::Column::Id.in_subquery(
                        SeaQuery::select()
                            .column(clip_annotation_tag::Column::ClipAnnotationId)
                            .from(clip_annotation_tag::Entity)
                            .and_where(clip_annotation_tag::Column::TagId.eq(tag_id))
                            .to_owned(),
                    ),
                ),
            );
        }
        conditions
    }
}

pub type ClipAnnotationApi = BaseApi<ClipAnnotations>;
