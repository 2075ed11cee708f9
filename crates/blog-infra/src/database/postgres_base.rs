use std::marker::PhantomData;

use async_trait::async_trait;
use sea_orm::{DbConn, DbErr, EntityTrait, PrimaryKeyTrait, RuntimeErr};

use blog_core::error::RepoError;
use blog_core::ports::BaseRepository;

/// Generic PostgreSQL repository implementation.
pub struct PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub(crate) db: DbConn,
    _entity: PhantomData<E>,
}

impl<E> PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub fn new(db: DbConn) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<E, T, ID> BaseRepository<T, ID> for PostgresBaseRepository<E>
where
    E: EntityTrait,
    E::Model: Sync + Send,
    E::PrimaryKey: PrimaryKeyTrait<ValueType = ID>,
    ID: Send + Sync + Into<sea_orm::Value> + Clone + Copy + 'static,
    T: From<E::Model> + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError> {
        let result = E::find_by_id(id).one(&self.db).await.map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn delete(&self, id: ID) -> Result<(), RepoError> {
        let result = E::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}

/// Classify a SeaORM error into the repository taxonomy.
///
/// Connection trouble and row-mapping failures get their own variants so the
/// HTTP layer can answer 503 and 500 respectively.
pub(crate) fn map_db_err(err: DbErr) -> RepoError {
    match &err {
        DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => RepoError::Connection(err.to_string()),
        DbErr::Type(_) | DbErr::TryIntoErr { .. } | DbErr::Json(_) => {
            RepoError::Decode(err.to_string())
        }
        DbErr::Query(RuntimeErr::SqlxError(sqlx_err)) if is_decode_error(sqlx_err) => {
            RepoError::Decode(err.to_string())
        }
        DbErr::Exec(_) | DbErr::Query(_) => {
            let message = err.to_string();
            if message.contains("duplicate") || message.contains("unique") {
                RepoError::Constraint(message)
            } else {
                RepoError::Query(message)
            }
        }
        DbErr::RecordNotFound(_) => RepoError::NotFound,
        _ => RepoError::Query(err.to_string()),
    }
}

fn is_decode_error(err: &sea_orm::sqlx::Error) -> bool {
    use sea_orm::sqlx::Error;

    matches!(
        err,
        Error::ColumnDecode { .. }
            | Error::ColumnNotFound(_)
            | Error::ColumnIndexOutOfBounds { .. }
            | Error::Decode(_)
            | Error::TypeNotFound { .. }
    )
}
