use sea_orm::{
    prelude::DateTimeWithTimeZone, sea_query::Expr, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, SqlErr,
};
use tracing::{error, warn};

use models::person;
use models::PersonId;

use crate::person::domain::{Person, PersonInput};
use crate::person::errors::StoreError;
use crate::person::repository::PersonStore;

/// SeaORM-backed store over the `person` table.
pub struct SeaOrmPersonStore {
    pub db: DatabaseConnection,
}

impl SeaOrmPersonStore {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    /// Bring the schema (table plus unique email index) up to date before
    /// handing out the store. An error here must abort startup.
    pub async fn prepare(db: DatabaseConnection) -> Result<Self, StoreError> {
        models::db::migrate(&db).await.map_err(|e| {
            error!(error = %e, "failed to establish person schema");
            StoreError::Backend(e.to_string())
        })?;
        Ok(Self { db })
    }
}

fn classify(e: DbErr) -> StoreError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            warn!(%detail, "unique constraint violation");
            StoreError::DuplicateKey
        }
        _ => match e {
            DbErr::RecordNotFound(_) => StoreError::NotFound,
            other => StoreError::Backend(other.to_string()),
        },
    }
}

#[async_trait::async_trait]
impl PersonStore for SeaOrmPersonStore {
    async fn insert(&self, p: &Person) -> Result<(), StoreError> {
        person::Entity::insert(person::new_active_model(p.id, &p.email))
            .exec_without_returning(&self.db)
            .await
            .map_err(classify)?;
        Ok(())
    }

    async fn find_by_id(&self, id: PersonId) -> Result<Person, StoreError> {
        person::Entity::find_by_id(id.into_uuid())
            .one(&self.db)
            .await
            .map_err(classify)?
            .map(Person::from)
            .ok_or(StoreError::NotFound)
    }

    async fn find_by_email(&self, email: &str) -> Result<Person, StoreError> {
        person::Entity::find()
            .filter(person::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(classify)?
            .map(Person::from)
            .ok_or(StoreError::NotFound)
    }

    async fn replace_by_id(&self, id: PersonId, fields: &PersonInput) -> Result<(), StoreError> {
        let now: DateTimeWithTimeZone = chrono::Utc::now().into();
        let res = person::Entity::update_many()
            .col_expr(person::Column::Email, Expr::value(fields.email.clone()))
            .col_expr(person::Column::UpdatedAt, Expr::value(now))
            .filter(person::Column::Id.eq(id.into_uuid()))
            .exec(&self.db)
            .await
            .map_err(classify)?;
        if res.rows_affected == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: PersonId) -> Result<(), StoreError> {
        let res = person::Entity::delete_by_id(id.into_uuid())
            .exec(&self.db)
            .await
            .map_err(classify)?;
        if res.rows_affected == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
