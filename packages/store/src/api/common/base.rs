use std::fmt::Debug;
use std::hash::Hash;
use std::marker::PhantomData;
use std::num::NonZeroUsize;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait,
    IntoActiveModel, QueryFilter, TransactionSession, TransactionTrait,
};
use serde::Deserialize;
use tracing::instrument;

use super::bulk;
use super::cache::{self, SchemaCache};
use super::utils::{
    SortBy, UpdateSchema, create_object, delete_object, delete_where, entity_name, get_object,
    get_objects, update_object,
};
use crate::config::CacheConfig;
use crate::error::ApiResult;

/// Entities with an integer surrogate key named `id`.
pub trait HasId: EntityTrait {
    fn id_column() -> Self::Column;
    fn row_id(model: &Self::Model) -> i32;

    fn id_condition(id: i32) -> Condition {
        Condition::all().add(Self::id_column().eq(id))
    }
}

macro_rules! impl_has_id {
    ($($module:ident),* $(,)?) => {
        $(
            impl HasId for crate::entity::$module::Entity {
                fn id_column() -> Self::Column {
                    crate::entity::$module::Column::Id
                }

                fn row_id(model: &Self::Model) -> i32 {
                    model.id
                }
            }
        )*
    };
}

impl_has_id!(
    annotation_project,
    annotation_status_badge,
    annotation_task,
    clip,
    clip_annotation,
    clip_evaluation,
    clip_prediction,
    dataset,
    evaluation,
    feature_name,
    model_run,
    note,
    recording,
    sound_event,
    sound_event_annotation,
    sound_event_evaluation,
    sound_event_prediction,
    tag,
    user,
);

/// Update payload for entities with no mutable columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct NoUpdate;

impl<A: ActiveModelTrait> UpdateSchema<A> for NoUpdate {
    fn apply(self, _active: &mut A) {}
}

/// Binds an entity to its public schema, payload types and natural key.
#[async_trait]
pub trait Resource: Send + Sync + 'static {
    type Entity: HasId<Model = Self::Model, ActiveModel = Self::ActiveModel>;
    type Model: IntoActiveModel<Self::ActiveModel> + Clone + Send + Sync;
    type ActiveModel: ActiveModelTrait<Entity = Self::Entity> + ActiveModelBehavior + Send;

    /// External identity exposed to callers.
    type PrimaryKey: Eq + Hash + Clone + Debug + Send + Sync + 'static;
    type Schema: From<Self::Model> + Clone + Send + Sync + 'static;
    type Create: IntoActiveModel<Self::ActiveModel> + Send;
    type Update: UpdateSchema<Self::ActiveModel> + Send;
    /// Natural key used by deduplicated bulk creation.
    type Key: Eq + Hash + Clone + Send + Sync;

    fn primary_key(obj: &Self::Schema) -> Self::PrimaryKey;
    fn primary_key_condition(pk: &Self::PrimaryKey) -> Condition;

    fn create_key(data: &Self::Create) -> Self::Key;
    fn model_key(model: &Self::Model) -> Self::Key;
    fn key_condition(keys: &[Self::Key]) -> Condition;
    /// Columns of the unique index behind the natural key.
    fn key_columns() -> Vec<<Self::Entity as EntityTrait>::Column>;

    fn default_sort() -> SortBy<<Self::Entity as EntityTrait>::Column> {
        SortBy::from("-created_on")
    }

    /// Remove rows owned by `model` before it is deleted.
    async fn delete_dependents<C>(_db: &C, _model: &Self::Model) -> ApiResult<()>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        Ok(())
    }

    /// Remove rows `model` referenced and owned, after it is deleted.
    async fn delete_owned<C>(_db: &C, _model: &Self::Model) -> ApiResult<()>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        Ok(())
    }
}

/// Delete every row of `R` matching `condition` without running its
/// cascade hooks, evicting the rows from every schema cache of `R`.
pub(crate) async fn delete_resources<R, C>(db: &C, condition: Condition) -> ApiResult<u64>
where
    R: Resource,
    C: ConnectionTrait,
{
    let doomed: Vec<R::PrimaryKey> = R::Entity::find()
        .filter(condition.clone())
        .all(db)
        .await?
        .into_iter()
        .map(|model| R::primary_key(&R::Schema::from(model)))
        .collect();
    if doomed.is_empty() {
        return Ok(0);
    }
    cache::evict::<R>(&doomed);
    delete_where::<R::Entity, C>(db, condition).await
}

/// Generic CRUD facade over a [`Resource`].
///
/// The optional cache maps primary keys to schemas. Schemas hold row data
/// only. Create and update store the fresh schema. Update and delete evict
/// the key from every cache of the same resource, and cascades evict the
/// rows they remove, so no facade serves a row another one changed.
pub struct BaseApi<R: Resource> {
    cache: Option<SchemaCache<R>>,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> Default for BaseApi<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Resource> BaseApi<R> {
    pub fn new() -> Self {
        Self {
            cache: None,
            _resource: PhantomData,
        }
    }

    pub fn with_cache(capacity: usize) -> Self {
        Self {
            cache: NonZeroUsize::new(capacity).map(cache::register::<R>),
            _resource: PhantomData,
        }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self::with_cache(config.capacity)
    }

    pub fn is_cached(&self, pk: &R::PrimaryKey) -> bool {
        self.cache
            .as_ref()
            .and_then(|cache| cache.lock().ok())
            .is_some_and(|cache| cache.contains(pk))
    }

    fn cached(&self, pk: &R::PrimaryKey) -> Option<R::Schema> {
        let mut cache = self.cache.as_ref()?.lock().ok()?;
        cache.get(pk).cloned()
    }

    pub(crate) fn remember(&self, schema: &R::Schema) {
        if let Some(cache) = &self.cache
            && let Ok(mut cache) = cache.lock()
        {
            cache.put(R::primary_key(schema), schema.clone());
        }
    }

    fn forget(&self, pk: &R::PrimaryKey) {
        cache::evict::<R>(std::slice::from_ref(pk));
    }

    pub(crate) fn schema(&self, model: R::Model) -> R::Schema {
        let schema = R::Schema::from(model);
        self.remember(&schema);
        schema
    }

    /// Fetch the stored row behind a primary key.
    pub async fn get_model<C>(&self, db: &C, pk: &R::PrimaryKey) -> ApiResult<R::Model>
    where
        C: ConnectionTrait,
    {
        get_object::<R::Entity, C>(db, R::primary_key_condition(pk)).await
    }

    #[instrument(skip(self, db), fields(entity = entity_name::<R::Entity>()))]
    pub async fn get<C>(&self, db: &C, pk: &R::PrimaryKey) -> ApiResult<R::Schema>
    where
        C: ConnectionTrait,
    {
        if let Some(schema) = self.cached(pk) {
            return Ok(schema);
        }
        let model = self.get_model(db, pk).await?;
        Ok(self.schema(model))
    }

    /// Look up by surrogate id.
    pub async fn get_by_id<C>(&self, db: &C, id: i32) -> ApiResult<R::Schema>
    where
        C: ConnectionTrait,
    {
        let model = get_object::<R::Entity, C>(db, R::Entity::id_condition(id)).await?;
        Ok(self.schema(model))
    }

    /// A page of schemas plus the total count. Newest first unless `sort_by`
    /// says otherwise.
    pub async fn get_many<C>(
        &self,
        db: &C,
        limit: Option<i64>,
        offset: Option<u64>,
        filters: Vec<Condition>,
        sort_by: Option<SortBy<<R::Entity as EntityTrait>::Column>>,
    ) -> ApiResult<(Vec<R::Schema>, u64)>
    where
        C: ConnectionTrait,
    {
        let sort_by = sort_by.unwrap_or_else(R::default_sort);
        let (models, total) =
            get_objects::<R::Entity, C>(db, limit, offset, filters, Some(sort_by)).await?;
        Ok((models.into_iter().map(R::Schema::from).collect(), total))
    }

    pub async fn create<C>(&self, db: &C, data: R::Create) -> ApiResult<R::Schema>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        self.create_from_data(db, data, |_| {}).await
    }

    /// Create from `data` with `overrides` applied last.
    #[instrument(skip_all, fields(entity = entity_name::<R::Entity>()))]
    pub async fn create_from_data<C>(
        &self,
        db: &C,
        data: R::Create,
        overrides: impl FnOnce(&mut R::ActiveModel),
    ) -> ApiResult<R::Schema>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let mut active = data.into_active_model();
        overrides(&mut active);
        let model = create_object(db, active).await?;
        Ok(self.schema(model))
    }

    pub async fn create_many<C>(&self, db: &C, data: Vec<R::Create>) -> ApiResult<Vec<R::Schema>>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let models = bulk::create_objects::<R, C>(db, data).await?;
        Ok(models.into_iter().map(|model| self.schema(model)).collect())
    }

    pub async fn create_many_without_duplicates<C>(
        &self,
        db: &C,
        data: Vec<R::Create>,
        return_all: bool,
    ) -> ApiResult<Vec<R::Schema>>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let models = bulk::create_objects_without_duplicates::<R, C>(db, data, return_all).await?;
        Ok(models.into_iter().map(|model| self.schema(model)).collect())
    }

    pub async fn update<C>(&self, db: &C, obj: &R::Schema, data: R::Update) -> ApiResult<R::Schema>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        self.update_with(db, obj, data, |_| {}).await
    }

    /// Partial update of `obj` with `overrides` applied after `data`.
    #[instrument(skip_all, fields(entity = entity_name::<R::Entity>()))]
    pub async fn update_with<C>(
        &self,
        db: &C,
        obj: &R::Schema,
        data: R::Update,
        overrides: impl FnOnce(&mut R::ActiveModel),
    ) -> ApiResult<R::Schema>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let pk = R::primary_key(obj);
        self.forget(&pk);
        let model =
            update_object::<R::Entity, C, R::Update>(db, R::primary_key_condition(&pk), data, overrides)
                .await?;
        Ok(self.schema(model))
    }

    /// Delete `obj` together with the rows it owns.
    #[instrument(skip_all, fields(entity = entity_name::<R::Entity>()))]
    pub async fn delete<C>(&self, db: &C, obj: &R::Schema) -> ApiResult<R::Schema>
    where
        C: ConnectionTrait + TransactionTrait,
    {
        let pk = R::primary_key(obj);
        self.forget(&pk);

        let txn = db.begin().await?;
        let model = get_object::<R::Entity, _>(&txn, R::primary_key_condition(&pk)).await?;
        R::delete_dependents(&txn, &model).await?;
        let deleted = delete_object::<R::Entity, _>(&txn, R::primary_key_condition(&pk)).await?;
        R::delete_owned(&txn, &deleted).await?;
        txn.commit().await?;
        self.forget(&pk);

        Ok(R::Schema::from(deleted))
    }
}
