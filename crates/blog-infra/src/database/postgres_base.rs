use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, DbErr, EntityTrait, Iterable, PrimaryKeyToColumn,
    PrimaryKeyTrait, QueryFilter,
};

use blog_core::domain::Resource;
use blog_core::error::RepoError;
use blog_core::ports::BaseRepository;

/// Generic PostgreSQL repository implementation.
///
/// Holds a shared handle so several repositories can run on one connection.
pub struct PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    db: Arc<DbConn>,
    _entity: PhantomData<E>,
}

impl<E> PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub fn new(db: Arc<DbConn>) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }

    pub(crate) fn conn(&self) -> &DbConn {
        &self.db
    }
}

/// Connection-level failures are kept apart so handlers can log them distinctly.
pub(crate) fn map_db_err(err: DbErr) -> RepoError {
    match err {
        DbErr::Conn(e) => RepoError::Connection(e.to_string()),
        DbErr::ConnectionAcquire(e) => RepoError::Connection(e.to_string()),
        other => RepoError::Query(other.to_string()),
    }
}

fn primary_key_column<E: EntityTrait>() -> Result<E::Column, RepoError> {
    E::PrimaryKey::iter()
        .next()
        .map(PrimaryKeyToColumn::into_column)
        .ok_or_else(|| RepoError::Query("entity has no primary key".to_string()))
}

#[async_trait]
impl<E, T, N> BaseRepository<T, N, i32> for PostgresBaseRepository<E>
where
    E: EntityTrait,
    E::Model: Sync + Send,
    E::ActiveModel: ActiveModelTrait<Entity = E> + Send + Sync,
    E::PrimaryKey: PrimaryKeyTrait<ValueType = i32>,
    T: Resource + From<E::Model> + Send + Sync + 'static,
    N: Into<E::ActiveModel> + Send + 'static,
{
    async fn create(&self, draft: N) -> Result<i32, RepoError> {
        let model: E::ActiveModel = draft.into();
        let result = E::insert(model)
            .exec(self.conn())
            .await
            .map_err(map_db_err)?;

        tracing::debug!(resource = T::NAME, id = result.last_insert_id, "Row inserted");
        Ok(result.last_insert_id)
    }

    async fn list(&self) -> Result<Vec<T>, RepoError> {
        let rows = E::find().all(self.conn()).await.map_err(map_db_err)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<T>, RepoError> {
        let result = E::find_by_id(id)
            .one(self.conn())
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn update(&self, id: i32, draft: N) -> Result<(), RepoError> {
        let model: E::ActiveModel = draft.into();
        let result = E::update_many()
            .set(model)
            .filter(primary_key_column::<E>()?.eq(id))
            .exec(self.conn())
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound(T::NAME));
        }

        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let result = E::delete_by_id(id)
            .exec(self.conn())
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound(T::NAME));
        }

        Ok(())
    }
}
