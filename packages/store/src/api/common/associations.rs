//! Tag, note and feature attachment shared by every entity.
//!
//! Each parent entity declares its association table through [`HasTags`],
//! [`HasNotes`] or [`HasFeatures`]. Adding an association that already
//! exists and removing one that does not are both no-ops.

use std::collections::HashMap;

use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, QuerySelect, TransactionTrait,
};
use tracing::{debug, instrument};

use super::base::{BaseApi, HasId, Resource};
use super::utils::{create_object, delete_where, entity_name, get_object};
use crate::entity::{feature_name, note, tag};
use crate::error::ApiResult;
use crate::models::{Feature, Note, Tag};

type LinkModel<L> = <L as EntityTrait>::Model;
type LinkActive<L> = <L as EntityTrait>::ActiveModel;
type LinkColumn<L> = <L as EntityTrait>::Column;

pub trait HasTags: HasId {
    type TagLink: EntityTrait;
    /// Metadata stored on the link row (`()`, a creator id, a score).
    type TagData: Send;

    fn tag_link_parent_column() -> LinkColumn<Self::TagLink>;
    fn tag_link_tag_column() -> LinkColumn<Self::TagLink>;
    fn new_tag_link(parent_id: i32, tag_id: i32, data: Self::TagData) -> LinkActive<Self::TagLink>;
}

pub trait HasNotes: HasId {
    type NoteLink: EntityTrait;

    fn note_link_parent_column() -> LinkColumn<Self::NoteLink>;
    fn note_link_note_column() -> LinkColumn<Self::NoteLink>;
    fn new_note_link(parent_id: i32, note_id: i32) -> LinkActive<Self::NoteLink>;
}

pub trait HasFeatures: HasId {
    type FeatureLink: EntityTrait;

    fn feature_link_parent_column() -> LinkColumn<Self::FeatureLink>;
    fn feature_link_name_column() -> LinkColumn<Self::FeatureLink>;
    fn feature_link_value_column() -> LinkColumn<Self::FeatureLink>;
    fn new_feature_link(
        parent_id: i32,
        feature_name_id: i32,
        value: f64,
    ) -> LinkActive<Self::FeatureLink>;
}

fn link_condition<L: EntityTrait>(
    parent_column: LinkColumn<L>,
    parent_id: i32,
    child_column: LinkColumn<L>,
    child_id: i32,
) -> Condition {
    Condition::all()
        .add(parent_column.eq(parent_id))
        .add(child_column.eq(child_id))
}

async fn link_exists<L, C>(db: &C, condition: Condition) -> ApiResult<bool>
where
    L: EntityTrait,
    C: ConnectionTrait,
{
    Ok(L::find().filter(condition).one(db).await?.is_some())
}

async fn refresh<E, C>(db: &C, parent_id: i32) -> ApiResult<E::Model>
where
    E: HasId,
    C: ConnectionTrait,
{
    get_object::<E, C>(db, E::id_condition(parent_id)).await
}

/// Child ids linked to `parent_id`.
async fn linked_ids<L, C>(
    db: &C,
    parent_column: LinkColumn<L>,
    parent_id: i32,
    child_column: LinkColumn<L>,
) -> ApiResult<Vec<i32>>
where
    L: EntityTrait,
    C: ConnectionTrait,
{
    let ids: Vec<i32> = L::find()
        .filter(parent_column.eq(parent_id))
        .select_only()
        .column(child_column)
        .into_tuple()
        .all(db)
        .await?;
    Ok(ids)
}

#[instrument(skip(db, condition, data), fields(entity = entity_name::<E>()))]
pub async fn add_tag_to_object<E, C>(
    db: &C,
    condition: Condition,
    tag_id: i32,
    data: E::TagData,
) -> ApiResult<E::Model>
where
    E: HasTags,
    LinkModel<E::TagLink>: IntoActiveModel<LinkActive<E::TagLink>>,
    LinkActive<E::TagLink>: Send,
    C: ConnectionTrait + TransactionTrait,
{
    let parent = get_object::<E, C>(db, condition).await?;
    let parent_id = E::row_id(&parent);

    let existing = link_condition::<E::TagLink>(
        E::tag_link_parent_column(),
        parent_id,
        E::tag_link_tag_column(),
        tag_id,
    );
    if link_exists::<E::TagLink, C>(db, existing).await? {
        debug!(parent_id, tag_id, "Tag already attached");
        return Ok(parent);
    }

    get_object::<tag::Entity, C>(db, tag::Entity::id_condition(tag_id)).await?;
    create_object(db, E::new_tag_link(parent_id, tag_id, data)).await?;
    refresh::<E, C>(db, parent_id).await
}

#[instrument(skip(db, condition), fields(entity = entity_name::<E>()))]
pub async fn remove_tag_from_object<E, C>(
    db: &C,
    condition: Condition,
    tag_id: i32,
) -> ApiResult<E::Model>
where
    E: HasTags,
    C: ConnectionTrait,
{
    let parent = get_object::<E, C>(db, condition).await?;
    let parent_id = E::row_id(&parent);

    let link = link_condition::<E::TagLink>(
        E::tag_link_parent_column(),
        parent_id,
        E::tag_link_tag_column(),
        tag_id,
    );
    if delete_where::<E::TagLink, C>(db, link).await? == 0 {
        debug!(parent_id, tag_id, "Tag not attached");
        return Ok(parent);
    }
    refresh::<E, C>(db, parent_id).await
}

pub async fn get_tags<E, C>(db: &C, parent: &E::Model) -> ApiResult<Vec<tag::Model>>
where
    E: HasTags,
    C: ConnectionTrait,
{
    let ids = linked_ids::<E::TagLink, C>(
        db,
        E::tag_link_parent_column(),
        E::row_id(parent),
        E::tag_link_tag_column(),
    )
    .await?;
    let tags = tag::Entity::find()
        .filter(tag::Column::Id.is_in(ids))
        .order_by_asc(tag::Column::Key)
        .order_by_asc(tag::Column::Value)
        .all(db)
        .await?;
    Ok(tags)
}

/// Tags of `parent` with the number stored in `score_column` of each link,
/// ordered by key then value.
pub async fn get_scored_tags<E, C>(
    db: &C,
    parent: &E::Model,
    score_column: LinkColumn<E::TagLink>,
) -> ApiResult<Vec<(tag::Model, f64)>>
where
    E: HasTags,
    C: ConnectionTrait,
{
    let scores: Vec<(i32, f64)> = <E::TagLink as EntityTrait>::find()
        .filter(E::tag_link_parent_column().eq(E::row_id(parent)))
        .select_only()
        .column(E::tag_link_tag_column())
        .column(score_column)
        .into_tuple()
        .all(db)
        .await?;
    let mut scores: HashMap<i32, f64> = scores.into_iter().collect();

    let tags = tag::Entity::find()
        .filter(tag::Column::Id.is_in(scores.keys().copied().collect::<Vec<_>>()))
        .order_by_asc(tag::Column::Key)
        .order_by_asc(tag::Column::Value)
        .all(db)
        .await?;

    Ok(tags
        .into_iter()
        .filter_map(|tag| scores.remove(&tag.id).map(|score| (tag, score)))
        .collect())
}

/// Drop every tag link of `parent_id`. The tags themselves stay.
pub async fn clear_tags<E, C>(db: &C, parent_id: i32) -> ApiResult<u64>
where
    E: HasTags,
    C: ConnectionTrait,
{
    delete_where::<E::TagLink, C>(
        db,
        Condition::all().add(E::tag_link_parent_column().eq(parent_id)),
    )
    .await
}

#[instrument(skip(db, condition), fields(entity = entity_name::<E>()))]
pub async fn add_note_to_object<E, C>(
    db: &C,
    condition: Condition,
    note_id: i32,
) -> ApiResult<E::Model>
where
    E: HasNotes,
    LinkModel<E::NoteLink>: IntoActiveModel<LinkActive<E::NoteLink>>,
    LinkActive<E::NoteLink>: Send,
    C: ConnectionTrait + TransactionTrait,
{
    let parent = get_object::<E, C>(db, condition).await?;
    let parent_id = E::row_id(&parent);

    let existing = link_condition::<E::NoteLink>(
        E::note_link_parent_column(),
        parent_id,
        E::note_link_note_column(),
        note_id,
    );
    if link_exists::<E::NoteLink, C>(db, existing).await? {
        debug!(parent_id, note_id, "Note already attached");
        return Ok(parent);
    }

    get_object::<note::Entity, C>(db, note::Entity::id_condition(note_id)).await?;
    create_object(db, E::new_note_link(parent_id, note_id)).await?;
    refresh::<E, C>(db, parent_id).await
}

#[instrument(skip(db, condition), fields(entity = entity_name::<E>()))]
pub async fn remove_note_from_object<E, C>(
    db: &C,
    condition: Condition,
    note_id: i32,
) -> ApiResult<E::Model>
where
    E: HasNotes,
    C: ConnectionTrait,
{
    let parent = get_object::<E, C>(db, condition).await?;
    let parent_id = E::row_id(&parent);

    let link = link_condition::<E::NoteLink>(
        E::note_link_parent_column(),
        parent_id,
        E::note_link_note_column(),
        note_id,
    );
    if delete_where::<E::NoteLink, C>(db, link).await? == 0 {
        debug!(parent_id, note_id, "Note not attached");
        return Ok(parent);
    }
    refresh::<E, C>(db, parent_id).await
}

/// Notes of `parent`, oldest first.
pub async fn get_notes<E, C>(db: &C, parent: &E::Model) -> ApiResult<Vec<note::Model>>
where
    E: HasNotes,
    C: ConnectionTrait,
{
    let ids = linked_ids::<E::NoteLink, C>(
        db,
        E::note_link_parent_column(),
        E::row_id(parent),
        E::note_link_note_column(),
    )
    .await?;
    let notes = note::Entity::find()
        .filter(note::Column::Id.is_in(ids))
        .order_by_asc(note::Column::CreatedOn)
        .order_by_asc(note::Column::Id)
        .all(db)
        .await?;
    Ok(notes)
}

pub async fn clear_notes<E, C>(db: &C, parent_id: i32) -> ApiResult<u64>
where
    E: HasNotes,
    C: ConnectionTrait,
{
    delete_where::<E::NoteLink, C>(
        db,
        Condition::all().add(E::note_link_parent_column().eq(parent_id)),
    )
    .await
}

#[instrument(skip(db, condition), fields(entity = entity_name::<E>()))]
pub async fn add_feature_to_object<E, C>(
    db: &C,
    condition: Condition,
    feature_name_id: i32,
    value: f64,
) -> ApiResult<E::Model>
where
    E: HasFeatures,
    LinkModel<E::FeatureLink>: IntoActiveModel<LinkActive<E::FeatureLink>>,
    LinkActive<E::FeatureLink>: Send,
    C: ConnectionTrait + TransactionTrait,
{
    let parent = get_object::<E, C>(db, condition).await?;
    let parent_id = E::row_id(&parent);

    let existing = link_condition::<E::FeatureLink>(
        E::feature_link_parent_column(),
        parent_id,
        E::feature_link_name_column(),
        feature_name_id,
    );
    if link_exists::<E::FeatureLink, C>(db, existing).await? {
        debug!(parent_id, feature_name_id, "Feature already set");
        return Ok(parent);
    }

    get_object::<feature_name::Entity, C>(db, feature_name::Entity::id_condition(feature_name_id))
        .await?;
    create_object(db, E::new_feature_link(parent_id, feature_name_id, value)).await?;
    refresh::<E, C>(db, parent_id).await
}

/// Set the value of a feature in place, adding it when absent.
#[instrument(skip(db, condition), fields(entity = entity_name::<E>()))]
pub async fn update_feature_on_object<E, C>(
    db: &C,
    condition: Condition,
    feature_name_id: i32,
    value: f64,
) -> ApiResult<E::Model>
where
    E: HasFeatures,
    LinkModel<E::FeatureLink>: IntoActiveModel<LinkActive<E::FeatureLink>>,
    LinkActive<E::FeatureLink>: Send,
    C: ConnectionTrait + TransactionTrait,
{
    let parent = get_object::<E, C>(db, condition).await?;
    let parent_id = E::row_id(&parent);

    let link = link_condition::<E::FeatureLink>(
        E::feature_link_parent_column(),
        parent_id,
        E::feature_link_name_column(),
        feature_name_id,
    );
    let updated = <E::FeatureLink as EntityTrait>::update_many()
        .col_expr(E::feature_link_value_column(), Expr::value(value))
        .filter(link)
        .exec(db)
        .await?;

    if updated.rows_affected == 0 {
        return add_feature_to_object::<E, C>(
            db,
            E::id_condition(parent_id),
            feature_name_id,
            value,
        )
        .await;
    }
    refresh::<E, C>(db, parent_id).await
}

#[instrument(skip(db, condition), fields(entity = entity_name::<E>()))]
pub async fn remove_feature_from_object<E, C>(
    db: &C,
    condition: Condition,
    feature_name_id: i32,
) -> ApiResult<E::Model>
where
    E: HasFeatures,
    C: ConnectionTrait,
{
    let parent = get_object::<E, C>(db, condition).await?;
    let parent_id = E::row_id(&parent);

    let link = link_condition::<E::FeatureLink>(
        E::feature_link_parent_column(),
        parent_id,
        E::feature_link_name_column(),
        feature_name_id,
    );
    if delete_where::<E::FeatureLink, C>(db, link).await? == 0 {
        debug!(parent_id, feature_name_id, "Feature not set");
        return Ok(parent);
    }
    refresh::<E, C>(db, parent_id).await
}

/// Features of `parent` as `(name, value)` pairs, sorted by name.
pub async fn get_features<E, C>(
    db: &C,
    parent: &E::Model,
) -> ApiResult<Vec<(feature_name::Model, f64)>>
where
    E: HasFeatures,
    C: ConnectionTrait,
{
    let values: Vec<(i32, f64)> = <E::FeatureLink as EntityTrait>::find()
        .filter(E::feature_link_parent_column().eq(E::row_id(parent)))
        .select_only()
        .column(E::feature_link_name_column())
        .column(E::feature_link_value_column())
        .into_tuple()
        .all(db)
        .await?;
    let mut values: HashMap<i32, f64> = values.into_iter().collect();

    let names = feature_name::Entity::find()
        .filter(feature_name::Column::Id.is_in(values.keys().copied().collect::<Vec<_>>()))
        .order_by_asc(feature_name::Column::Name)
        .all(db)
        .await?;

    Ok(names
        .into_iter()
        .filter_map(|name| values.remove(&name.id).map(|value| (name, value)))
        .collect())
}

pub async fn clear_features<E, C>(db: &C, parent_id: i32) -> ApiResult<u64>
where
    E: HasFeatures,
    C: ConnectionTrait,
{
    delete_where::<E::FeatureLink, C>(
        db,
        Condition::all().add(E::feature_link_parent_column().eq(parent_id)),
    )
    .await
}

impl<R> BaseApi<R>
where
    R: Resource,
    R::Entity: HasTags,
    LinkModel<<R::Entity as HasTags>::TagLink>:
        IntoActiveModel<LinkActive<<R::Entity as HasTags>::TagLink>>,
    LinkActive<<R::Entity as HasTags>::TagLink>: Send,
{
    pub async fn add_tag<C>(
        &self,
        db: &C,
        obj: &R::Schema,
        tag_id: i32,
        data: <R::Entity as HasTags>::TagData,
    ) -> ApiResult<R::Schema>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let condition = R::primary_key_condition(&R::primary_key(obj));
        let model = add_tag_to_object::<R::Entity, C>(db, condition, tag_id, data).await?;
        Ok(self.schema(model))
    }

    pub async fn remove_tag<C>(&self, db: &C, obj: &R::Schema, tag_id: i32) -> ApiResult<R::Schema>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let condition = R::primary_key_condition(&R::primary_key(obj));
        let model = remove_tag_from_object::<R::Entity, C>(db, condition, tag_id).await?;
        Ok(self.schema(model))
    }

    /// Tags attached to `obj`, ordered by key then value.
    pub async fn get_tags<C>(&self, db: &C, obj: &R::Schema) -> ApiResult<Vec<Tag>>
    where
        C: ConnectionTrait,
    {
        let model = self.get_model(db, &R::primary_key(obj)).await?;
        let tags = get_tags::<R::Entity, C>(db, &model).await?;
        Ok(tags.into_iter().map(Tag::from).collect())
    }
}

impl<R> BaseApi<R>
where
    R: Resource,
    R::Entity: HasNotes,
    LinkModel<<R::Entity as HasNotes>::NoteLink>:
        IntoActiveModel<LinkActive<<R::Entity as HasNotes>::NoteLink>>,
    LinkActive<<R::Entity as HasNotes>::NoteLink>: Send,
{
    pub async fn add_note<C>(&self, db: &C, obj: &R::Schema, note_id: i32) -> ApiResult<R::Schema>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let condition = R::primary_key_condition(&R::primary_key(obj));
        let model = add_note_to_object::<R::Entity, C>(db, condition, note_id).await?;
        Ok(self.schema(model))
    }

    pub async fn remove_note<C>(&self, db: &C, obj: &R::Schema, note_id: i32) -> ApiResult<R::Schema>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let condition = R::primary_key_condition(&R::primary_key(obj));
        let model = remove_note_from_object::<R::Entity, C>(db, condition, note_id).await?;
        Ok(self.schema(model))
    }

    pub async fn get_notes<C>(&self, db: &C, obj: &R::Schema) -> ApiResult<Vec<Note>>
    where
        C: ConnectionTrait,
    {
        let model = self.get_model(db, &R::primary_key(obj)).await?;
        let notes = get_notes::<R::Entity, C>(db, &model).await?;
        Ok(notes.into_iter().map(Note::from).collect())
    }
}

impl<R> BaseApi<R>
where
    R: Resource,
    R::Entity: HasFeatures,
    LinkModel<<R::Entity as HasFeatures>::FeatureLink>:
        IntoActiveModel<LinkActive<<R::Entity as HasFeatures>::FeatureLink>>,
    LinkActive<<R::Entity as HasFeatures>::FeatureLink>: Send,
{
    pub async fn add_feature<C>(
        &self,
        db: &C,
        obj: &R::Schema,
        feature_name_id: i32,
        value: f64,
    ) -> ApiResult<R::Schema>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let condition = R::primary_key_condition(&R::primary_key(obj));
        let model =
            add_feature_to_object::<R::Entity, C>(db, condition, feature_name_id, value).await?;
        Ok(self.schema(model))
    }

    pub async fn update_feature<C>(
        &self,
        db: &C,
        obj: &R::Schema,
        feature_name_id: i32,
        value: f64,
    ) -> ApiResult<R::Schema>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let condition = R::primary_key_condition(&R::primary_key(obj));
        let model =
            update_feature_on_object::<R::Entity, C>(db, condition, feature_name_id, value).await?;
        Ok(self.schema(model))
    }

    pub async fn remove_feature<C>(
        &self,
        db: &C,
        obj: &R::Schema,
        feature_name_id: i32,
    ) -> ApiResult<R::Schema>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let condition = R::primary_key_condition(&R::primary_key(obj));
        let model =
            remove_feature_from_object::<R::Entity, C>(db, condition, feature_name_id).await?;
        Ok(self.schema(model))
    }

    pub async fn get_features<C>(&self, db: &C, obj: &R::Schema) -> ApiResult<Vec<Feature>>
    where
        C: ConnectionTrait,
    {
        let model = self.get_model(db, &R::primary_key(obj)).await?;
        let features = get_features::<R::Entity, C>(db, &model).await?;
        Ok(features.into_iter().map(Feature::from).collect())
    }
}
