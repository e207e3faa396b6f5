use async_trait::async_trait;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, SqlErr, TransactionTrait,
};

use crate::{
    entity,
    error::{CategoryError, CategoryResult},
    models::Category,
    repository::CategoryRepository,
};

/// DDL for the `categories` table.
pub const SCHEMA: &[&str] = &["CREATE TABLE IF NOT EXISTS categories (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE
    )"];

/// Create the `categories` table if it does not exist yet.
pub async fn init_schema<C: ConnectionTrait>(db: &C) -> Result<(), DbErr> {
    for statement in SCHEMA {
        db.execute_unprepared(statement).await?;
    }
    tracing::debug!("categories schema ready");
    Ok(())
}

pub struct SqliteCategoryRepository {
    db: DatabaseConnection,
}

impl SqliteCategoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

async fn find_by_exact_name<C: ConnectionTrait>(
    db: &C,
    name: &str,
) -> Result<Option<entity::Model>, DbErr> {
    entity::Entity::find()
        .filter(entity::Column::Name.eq(name))
        .one(db)
        .await
}

fn insert_error(err: DbErr, name: String) -> CategoryError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => CategoryError::DuplicateName(name),
        _ => CategoryError::Database(err),
    }
}

#[async_trait]
impl CategoryRepository for SqliteCategoryRepository {
    async fn create(&self, name: String) -> CategoryResult<Category> {
        let txn = self.db.begin().await?;

        if find_by_exact_name(&txn, &name).await?.is_some() {
            return Err(CategoryError::DuplicateName(name));
        }

        let model = entity::ActiveModel {
            name: Set(name.clone()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| insert_error(e, name))?;

        txn.commit().await?;

        tracing::info!(category_id = model.id, "Created category");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i32) -> CategoryResult<Option<Category>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self) -> CategoryResult<Vec<Category>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn get_or_create(&self, name: String) -> CategoryResult<Category> {
        let txn = self.db.begin().await?;

        if let Some(existing) = find_by_exact_name(&txn, &name).await? {
            return Ok(existing.into());
        }

        let model = entity::ActiveModel {
            name: Set(name.clone()),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| insert_error(e, name))?;

        txn.commit().await?;

        tracing::info!(category_id = model.id, "Created category via get-or-create");
        Ok(model.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::TestDatabase;

    async fn repo() -> (TestDatabase, SqliteCategoryRepository) {
        let db = TestDatabase::with_schema(SCHEMA).await;
        let repo = SqliteCategoryRepository::new(db.connection());
        (db, repo)
    }

    #[tokio::test]
    async fn test_create_and_list_in_insertion_order() {
        let (_db, repo) = repo().await;

        let drinks = repo.create("Drinks".to_string()).await.unwrap();
        let snacks = repo.create("Snacks".to_string()).await.unwrap();

        let all = repo.list().await.unwrap();
        assert_eq!(all, vec![drinks, snacks]);
    }

    #[tokio::test]
    async fn test_create_duplicate_exact_name() {
        let (db, repo) = repo().await;

        repo.create("Drinks".to_string()).await.unwrap();
        let result = repo.create("Drinks".to_string()).await;

        assert!(matches!(result, Err(CategoryError::DuplicateName(_))));
        assert_eq!(db.count("categories").await, 1);
    }

    #[tokio::test]
    async fn test_names_are_case_sensitive() {
        let (_db, repo) = repo().await;

        repo.create("Drinks".to_string()).await.unwrap();
        assert!(repo.create("drinks".to_string()).await.is_ok());
    }

    #[tokio::test]
    async fn test_get_or_create_is_idempotent() {
        let (db, repo) = repo().await;

        let first = repo.get_or_create("Mock Category".to_string()).await.unwrap();
        let second = repo.get_or_create("Mock Category".to_string()).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(db.count("categories").await, 1);
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let (_db, repo) = repo().await;

        let created = repo.create("Drinks".to_string()).await.unwrap();

        assert_eq!(repo.get_by_id(created.id).await.unwrap(), Some(created.clone()));
        assert_eq!(repo.get_by_id(created.id + 1).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_init_schema_twice() {
        let db = TestDatabase::new().await;
        init_schema(&db.connection).await.unwrap();
        init_schema(&db.connection).await.unwrap();
    }

    #[tokio::test]
    async fn test_unique_constraint_maps_to_duplicate_name() {
        let (db, repo) = repo().await;
        repo.create("Drinks".to_string()).await.unwrap();

        let err = db
            .connection
            .execute_unprepared("INSERT INTO categories (name) VALUES ('Drinks')")
            .await
            .unwrap_err();

        assert!(matches!(
            insert_error(err, "Drinks".to_string()),
            CategoryError::DuplicateName(name) if name == "Drinks"
        ));
        assert_eq!(db.count("categories").await, 1);
    }
}
