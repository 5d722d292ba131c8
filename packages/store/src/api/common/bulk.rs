use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ConnectionTrait, DbErr, EntityTrait, IntoActiveModel, QueryFilter, TransactionSession,
    TransactionTrait,
};
use tracing::{debug, info, instrument};

use super::base::Resource;
use super::utils::{entity_name, finish_write};
use crate::error::{ApiError, ApiResult};

/// Keys per lookup query and rows per insert statement. Keeps key
/// conditions shallow and inserts under the bind parameter limit.
const BATCH_SIZE: usize = 200;

/// Keep the first candidate for every key, preserving order.
pub(crate) fn dedup_by_key<T, K, F>(candidates: Vec<T>, key_fn: F) -> Vec<(K, T)>
where
    K: Eq + Hash + Clone,
    F: Fn(&T) -> K,
{
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter_map(|candidate| {
            let key = key_fn(&candidate);
            seen.insert(key.clone()).then_some((key, candidate))
        })
        .collect()
}

/// Arrange `rows` in the order of `keys`, dropping keys with no row.
pub(crate) fn order_by_keys<M, K, F>(rows: Vec<M>, keys: &[K], key_fn: F) -> Vec<M>
where
    K: Eq + Hash,
    F: Fn(&M) -> K,
{
    let mut by_key: HashMap<K, M> = rows.into_iter().map(|row| (key_fn(&row), row)).collect();
    keys.iter().filter_map(|key| by_key.remove(key)).collect()
}

/// Stored rows whose natural key is in `keys`, in no particular order.
async fn find_existing<R, C>(db: &C, keys: &[R::Key]) -> ApiResult<Vec<R::Model>>
where
    R: Resource,
    C: ConnectionTrait,
{
    let mut rows = Vec::new();
    for batch in keys.chunks(BATCH_SIZE) {
        let found = R::Entity::find()
            .filter(R::key_condition(batch))
            .all(db)
            .await?;
        rows.extend(found);
    }
    Ok(rows)
}

async fn find_by_keys<R, C>(db: &C, keys: &[R::Key]) -> ApiResult<Vec<R::Model>>
where
    R: Resource,
    C: ConnectionTrait,
{
    let rows = find_existing::<R, C>(db, keys).await?;
    Ok(order_by_keys(rows, keys, R::model_key))
}

/// Insert `models` in statements of at most `BATCH_SIZE` rows. With
/// `on_conflict`, batches where every row conflicts are not an error.
async fn insert_batches<R, C>(
    db: &C,
    models: Vec<R::ActiveModel>,
    on_conflict: Option<&OnConflict>,
) -> Result<(), DbErr>
where
    R: Resource,
    C: ConnectionTrait,
{
    let mut models = models.into_iter().peekable();
    while models.peek().is_some() {
        let batch: Vec<R::ActiveModel> = models.by_ref().take(BATCH_SIZE).collect();
        let result = match on_conflict {
            Some(on_conflict) => {
                R::Entity::insert_many(batch)
                    .on_conflict(on_conflict.clone())
                    .exec_without_returning(db)
                    .await
            }
            None => R::Entity::insert_many(batch).exec_without_returning(db).await,
        };
        match result {
            Ok(_) => {}
            Err(DbErr::RecordNotInserted) if on_conflict.is_some() => {}
            Err(err) => return Err(err),
        }
    }
    Ok(())
}

/// Insert every candidate and return the persisted rows.
///
/// Fails with `DuplicateObject` if any candidate collides with an existing
/// row or with another candidate; nothing is inserted in that case.
#[instrument(skip_all, fields(entity = entity_name::<R::Entity>(), count = data.len()))]
pub async fn create_objects<R, C>(db: &C, data: Vec<R::Create>) -> ApiResult<Vec<R::Model>>
where
    R: Resource,
    C: ConnectionTrait + TransactionTrait,
{
    if data.is_empty() {
        return Ok(Vec::new());
    }
    let keys: Vec<R::Key> = data.iter().map(R::create_key).collect();
    let models = data.into_iter().map(IntoActiveModel::into_active_model).collect();

    let txn = db.begin().await?;
    let result = insert_batches::<R, _>(&txn, models, None).await;
    finish_write(txn, entity_name::<R::Entity>(), result).await?;

    find_by_keys::<R, C>(db, &keys).await
}

/// Insert the candidates whose natural key is not stored yet.
///
/// Candidates sharing a key keep the first occurrence. Returns the newly
/// created rows, or every row for the candidate keys when `return_all` is
/// set, in candidate order.
///
/// The insert carries `ON CONFLICT DO NOTHING` on the natural key columns,
/// so a concurrent writer inserting the same key between the existence
/// check and the insert does not fail the call.
#[instrument(skip_all, fields(entity = entity_name::<R::Entity>(), return_all = return_all))]
pub async fn create_objects_without_duplicates<R, C>(
    db: &C,
    data: Vec<R::Create>,
    return_all: bool,
) -> ApiResult<Vec<R::Model>>
where
    R: Resource,
    C: ConnectionTrait + TransactionTrait,
{
    let name = entity_name::<R::Entity>();
    let candidates = dedup_by_key(data, R::create_key);
    if candidates.is_empty() {
        return Ok(Vec::new());
    }
    let keys: Vec<R::Key> = candidates.iter().map(|(key, _)| key.clone()).collect();

    let existing: HashSet<R::Key> = find_existing::<R, C>(db, &keys)
        .await?
        .iter()
        .map(R::model_key)
        .collect();

    let missing: Vec<(R::Key, R::Create)> = candidates
        .into_iter()
        .filter(|(key, _)| !existing.contains(key))
        .collect();

    if missing.is_empty() && !return_all {
        debug!(entity = name, "All candidates already exist");
        return Ok(Vec::new());
    }

    let missing_keys: Vec<R::Key> = missing.iter().map(|(key, _)| key.clone()).collect();
    if !missing.is_empty() {
        let models = missing
            .into_iter()
            .map(|(_, data)| data.into_active_model())
            .collect();
        let on_conflict = OnConflict::columns(R::key_columns())
            .do_nothing()
            .to_owned();

        let txn = db.begin().await?;
        let result = insert_batches::<R, _>(&txn, models, Some(&on_conflict)).await;
        match result {
            Ok(()) => txn.commit().await?,
            Err(err) => {
                txn.rollback().await?;
                return Err(ApiError::from_write(name, err));
            }
        }
        info!(entity = name, count = missing_keys.len(), "Inserted missing objects");
    }

    let lookup = if return_all { &keys } else { &missing_keys };
    find_by_keys::<R, C>(db, lookup).await
}
