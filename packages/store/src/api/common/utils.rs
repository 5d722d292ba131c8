use std::str::FromStr;

use sea_orm::prelude::Expr;
use sea_orm::sea_query::{ExprTrait, Func, LikeExpr};
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DbErr,
    EntityName, EntityTrait, IntoActiveModel, Order, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, TransactionSession, TransactionTrait,
};
use tracing::{instrument, warn};

use crate::error::{ApiError, ApiResult};
use crate::models::shared::escape_like;

/// Table name of `E`, used to label errors and log lines.
pub fn entity_name<E: EntityTrait>() -> &'static str {
    E::default().table_name()
}

/// Partial update payload.
///
/// Implementations only touch the columns the caller supplied; everything
/// else on the active model stays `Unchanged`.
pub trait UpdateSchema<A: ActiveModelTrait> {
    fn apply(self, active: &mut A);
}

/// Ordering for list queries.
#[derive(Debug, Clone)]
pub enum SortBy<C> {
    /// A typed column and direction.
    Column(C, Order),
    /// A column name, descending when prefixed with `-` (e.g. `"-created_on"`).
    Field(String),
}

impl<C: ColumnTrait> SortBy<C> {
    pub fn asc(column: C) -> Self {
        SortBy::Column(column, Order::Asc)
    }

    pub fn desc(column: C) -> Self {
        SortBy::Column(column, Order::Desc)
    }

    pub fn resolve(self) -> ApiResult<(C, Order)> {
        match self {
            SortBy::Column(column, order) => Ok((column, order)),
            SortBy::Field(field) => {
                let (name, order) = match field.strip_prefix('-') {
                    Some(name) => (name, Order::Desc),
                    None => (field.as_str(), Order::Asc),
                };
                let column = <C as FromStr>::from_str(name)
                    .map_err(|_| ApiError::InvalidSort(field.clone()))?;
                Ok((column, order))
            }
        }
    }
}

impl<C> From<&str> for SortBy<C> {
    fn from(field: &str) -> Self {
        SortBy::Field(field.to_string())
    }
}

/// Case-insensitive substring match on `column`. `None` for a blank term.
pub fn search_condition<C: ColumnTrait>(column: C, search: &str) -> Option<Condition> {
    let term = escape_like(search.trim());
    if term.is_empty() {
        return None;
    }
    Some(
        Condition::all().add(
            Expr::expr(Func::lower(Expr::col(column)))
                .like(LikeExpr::new(format!("%{}%", term.to_lowercase())).escape('\\')),
        ),
    )
}

/// Commit `txn` if `result` succeeded, otherwise roll it back and classify
/// the error against `entity`.
pub(crate) async fn finish_write<T, S>(
    txn: S,
    entity: &'static str,
    result: Result<T, DbErr>,
) -> ApiResult<T>
where
    S: TransactionSession,
{
    match result {
        Ok(value) => {
            txn.commit().await?;
            Ok(value)
        }
        Err(err) => {
            txn.rollback().await?;
            let err = ApiError::from_write(entity, err);
            if err.is_duplicate() {
                warn!(entity, "Write rolled back on unique constraint violation");
            }
            Err(err)
        }
    }
}

/// Fetch the single row of `E` matching `condition`.
pub async fn get_object<E, C>(db: &C, condition: Condition) -> ApiResult<E::Model>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    E::find()
        .filter(condition)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::not_found(entity_name::<E>()))
}

/// Insert `data` and return the persisted row.
///
/// The insert runs in its own savepoint, so a uniqueness violation leaves
/// the caller's connection or transaction usable.
#[instrument(skip_all, fields(entity = entity_name::<A::Entity>()))]
pub async fn create_object<A, C>(db: &C, data: A) -> ApiResult<<A::Entity as EntityTrait>::Model>
where
    A: ActiveModelTrait + ActiveModelBehavior + Send,
    <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
    C: ConnectionTrait + TransactionTrait,
{
    let txn = db.begin().await?;
    let result = data.insert(&txn).await;
    finish_write(txn, entity_name::<A::Entity>(), result).await
}

/// Apply the fields set on `data`, then `overrides`, to the row matching
/// `condition`.
#[instrument(skip_all, fields(entity = entity_name::<E>()))]
pub async fn update_object<E, C, U>(
    db: &C,
    condition: Condition,
    data: U,
    overrides: impl FnOnce(&mut E::ActiveModel),
) -> ApiResult<E::Model>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<E::ActiveModel>,
    E::ActiveModel: Send,
    C: ConnectionTrait + TransactionTrait,
    U: UpdateSchema<E::ActiveModel>,
{
    let existing = get_object::<E, C>(db, condition).await?;
    let mut active = existing.clone().into_active_model();
    data.apply(&mut active);
    overrides(&mut active);

    if !active.is_changed() {
        return Ok(existing);
    }

    let txn = db.begin().await?;
    let result = active.update(&txn).await;
    finish_write(txn, entity_name::<E>(), result).await
}

/// Delete the row matching `condition` and return its last state.
#[instrument(skip_all, fields(entity = entity_name::<E>()))]
pub async fn delete_object<E, C>(db: &C, condition: Condition) -> ApiResult<E::Model>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<E::ActiveModel>,
    E::ActiveModel: Send,
    C: ConnectionTrait + TransactionTrait,
{
    let existing = get_object::<E, C>(db, condition).await?;
    let active = existing.clone().into_active_model();

    let txn = db.begin().await?;
    let result = active.delete(&txn).await;
    let deleted = finish_write(txn, entity_name::<E>(), result).await?;
    if deleted.rows_affected == 0 {
        return Err(ApiError::not_found(entity_name::<E>()));
    }
    Ok(existing)
}

/// Delete every row of `E` matching `condition`, returning how many went.
pub async fn delete_where<E, C>(db: &C, condition: Condition) -> ApiResult<u64>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    let result = E::delete_many().filter(condition).exec(db).await?;
    Ok(result.rows_affected)
}

/// A page of rows plus the total count ignoring pagination.
///
/// `limit` of `None` or a negative value means no limit. Filters are ANDed.
#[instrument(skip_all, fields(entity = entity_name::<E>(), limit = ?limit, offset = ?offset))]
pub async fn get_objects<E, C>(
    db: &C,
    limit: Option<i64>,
    offset: Option<u64>,
    filters: Vec<Condition>,
    sort_by: Option<SortBy<E::Column>>,
) -> ApiResult<(Vec<E::Model>, u64)>
where
    E: EntityTrait,
    E::Model: Send + Sync,
    C: ConnectionTrait,
{
    let mut select = E::find();
    for filter in filters {
        select = select.filter(filter);
    }

    let total = select.clone().count(db).await?;

    if let Some(sort_by) = sort_by {
        let (column, order) = sort_by.resolve()?;
        select = select.order_by(column, order);
    }
    if let Some(limit) = limit.filter(|limit| *limit >= 0) {
        select = select.limit(Some(limit as u64));
    }
    if let Some(offset) = offset {
        select = select.offset(Some(offset));
    }

    let rows = select.all(db).await?;
    Ok((rows, total))
}
