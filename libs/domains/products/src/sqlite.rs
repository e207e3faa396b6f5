use async_trait::async_trait;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, SqlErr, TransactionTrait,
};

use crate::{
    entity,
    error::{ProductError, ProductResult},
    models::{NewProduct, Product, ProductChanges, ProductFilter, name_key},
    repository::ProductRepository,
};

/// DDL for the `products` table. Requires the `categories` table.
pub const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS products (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        name_key TEXT NOT NULL UNIQUE,
        price REAL NOT NULL,
        is_18_plus BOOLEAN NOT NULL DEFAULT 0,
        category_id INTEGER NOT NULL REFERENCES categories(id)
    )",
    "CREATE INDEX IF NOT EXISTS idx_products_category_id ON products(category_id)",
];

/// Create the `products` table and its index if they do not exist yet.
pub async fn init_schema<C: ConnectionTrait>(db: &C) -> Result<(), DbErr> {
    for statement in SCHEMA {
        db.execute_unprepared(statement).await?;
    }
    tracing::debug!("products schema ready");
    Ok(())
}

pub struct SqliteProductRepository {
    db: DatabaseConnection,
}

impl SqliteProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

async fn ensure_category<C: ConnectionTrait>(db: &C, category_id: i32) -> ProductResult<()> {
    domain_categories::entity::Entity::find_by_id(category_id)
        .one(db)
        .await?
        .map(|_| ())
        .ok_or(ProductError::CategoryNotFound(category_id))
}

/// Whether another product already uses this name, ignoring case.
async fn name_taken<C: ConnectionTrait>(
    db: &C,
    key: &str,
    exclude_id: Option<i32>,
) -> Result<bool, DbErr> {
    let mut query = entity::Entity::find().filter(entity::Column::NameKey.eq(key));
    if let Some(id) = exclude_id {
        query = query.filter(entity::Column::Id.ne(id));
    }
    Ok(query.one(db).await?.is_some())
}

fn write_error(err: DbErr, name: &str, category_id: i32) -> ProductError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => ProductError::DuplicateName(name.to_string()),
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
            ProductError::CategoryNotFound(category_id)
        }
        _ => ProductError::Database(err),
    }
}

#[async_trait]
impl ProductRepository for SqliteProductRepository {
    async fn create(&self, input: NewProduct) -> ProductResult<Product> {
        let txn = self.db.begin().await?;

        ensure_category(&txn, input.category_id).await?;

        let key = name_key(&input.name);
        if name_taken(&txn, &key, None).await? {
            return Err(ProductError::DuplicateName(input.name));
        }

        let model = entity::ActiveModel {
            name: Set(input.name.clone()),
            name_key: Set(key),
            price: Set(input.price),
            is_18_plus: Set(input.is_18_plus),
            category_id: Set(input.category_id),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| write_error(e, &input.name, input.category_id))?;

        txn.commit().await?;

        tracing::info!(product_id = model.id, "Created product");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self, filter: ProductFilter) -> ProductResult<Vec<Product>> {
        let mut query = entity::Entity::find();

        if let Some(name) = filter.name {
            query = query.filter(entity::Column::NameKey.eq(name_key(&name)));
        }

        let models = query
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: i32, changes: ProductChanges) -> ProductResult<Product> {
        let txn = self.db.begin().await?;

        let existing = entity::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(ProductError::NotFound(id))?;

        let name = changes.name.clone().unwrap_or_else(|| existing.name.clone());
        let category_id = changes.category_id.unwrap_or(existing.category_id);
        let mut active: entity::ActiveModel = existing.clone().into();

        if let Some(new_name) = changes.name {
            let key = name_key(&new_name);
            if name_taken(&txn, &key, Some(id)).await? {
                return Err(ProductError::DuplicateName(new_name));
            }
            active.name = Set(new_name);
            active.name_key = Set(key);
        }
        if let Some(category_id) = changes.category_id {
            ensure_category(&txn, category_id).await?;
            active.category_id = Set(category_id);
        }
        if let Some(price) = changes.price {
            active.price = Set(price);
        }
        if let Some(is_18_plus) = changes.is_18_plus {
            active.is_18_plus = Set(is_18_plus);
        }

        if !active.is_changed() {
            txn.commit().await?;
            return Ok(existing.into());
        }

        let model = active
            .update(&txn)
            .await
            .map_err(|e| write_error(e, &name, category_id))?;

        txn.commit().await?;

        tracing::info!(product_id = model.id, "Updated product");
        Ok(model.into())
    }

    async fn delete(&self, id: i32) -> ProductResult<bool> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(product_id = id, "Deleted product");
        }
        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_categories::{CategoryRepository, SqliteCategoryRepository};
    use test_utils::TestDatabase;

    struct Fixture {
        db: TestDatabase,
        repo: SqliteProductRepository,
        category_id: i32,
    }

    async fn fixture() -> Fixture {
        let db =
            TestDatabase::with_schema(&[domain_categories::sqlite::SCHEMA, SCHEMA].concat()).await;
        let category = SqliteCategoryRepository::new(db.connection())
            .get_or_create("Mock Category".to_string())
            .await
            .unwrap();
        let repo = SqliteProductRepository::new(db.connection());
        Fixture {
            db,
            repo,
            category_id: category.id,
        }
    }

    fn new_product(name: &str, category_id: i32) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            price: 100.0,
            is_18_plus: false,
            category_id,
        }
    }

    #[tokio::test]
    async fn test_create_keeps_name_as_given() {
        let f = fixture().await;

        let product = f
            .repo
            .create(new_product("Mock Product", f.category_id))
            .await
            .unwrap();

        assert_eq!(product.name, "Mock Product");
        assert_eq!(product.category, f.category_id);
        assert!(!product.is_18_plus);
    }

    #[tokio::test]
    async fn test_create_duplicate_ignores_case() {
        let f = fixture().await;

        f.repo
            .create(new_product("Mock Product", f.category_id))
            .await
            .unwrap();
        let result = f
            .repo
            .create(new_product("MOCK product", f.category_id))
            .await;

        assert!(matches!(result, Err(ProductError::DuplicateName(_))));
        assert_eq!(f.db.count("products").await, 1);
    }

    #[tokio::test]
    async fn test_create_unknown_category() {
        let f = fixture().await;

        let result = f.repo.create(new_product("Orphan", 999)).await;

        assert!(matches!(result, Err(ProductError::CategoryNotFound(999))));
        assert_eq!(f.db.count("products").await, 0);
    }

    #[tokio::test]
    async fn test_list_filter_is_exact_and_case_insensitive() {
        let f = fixture().await;
        f.repo
            .create(new_product("Mock Product", f.category_id))
            .await
            .unwrap();
        f.repo
            .create(new_product("Mock Product 2", f.category_id))
            .await
            .unwrap();

        let matched = f
            .repo
            .list(ProductFilter {
                name: Some("MOCK PRODUCT".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].name, "Mock Product");

        let all = f.repo.list(ProductFilter::default()).await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all[0].id < all[1].id);
    }

    #[tokio::test]
    async fn test_update_only_changes_supplied_fields() {
        let f = fixture().await;
        let created = f
            .repo
            .create(new_product("Mock Product", f.category_id))
            .await
            .unwrap();

        let updated = f
            .repo
            .update(
                created.id,
                ProductChanges {
                    is_18_plus: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(updated.is_18_plus);
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.price, created.price);
    }

    #[tokio::test]
    async fn test_update_allows_recasing_own_name() {
        let f = fixture().await;
        let created = f
            .repo
            .create(new_product("Mock Product", f.category_id))
            .await
            .unwrap();

        let updated = f
            .repo
            .update(
                created.id,
                ProductChanges {
                    name: Some("MOCK PRODUCT".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "MOCK PRODUCT");
    }

    #[tokio::test]
    async fn test_update_rejects_name_of_other_product() {
        let f = fixture().await;
        f.repo
            .create(new_product("First", f.category_id))
            .await
            .unwrap();
        let second = f
            .repo
            .create(new_product("Second", f.category_id))
            .await
            .unwrap();

        let result = f
            .repo
            .update(
                second.id,
                ProductChanges {
                    name: Some("first".to_string()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(ProductError::DuplicateName(_))));
    }

    #[tokio::test]
    async fn test_update_missing_product() {
        let f = fixture().await;

        let result = f.repo.update(42, ProductChanges::default()).await;

        assert!(matches!(result, Err(ProductError::NotFound(42))));
    }

    #[tokio::test]
    async fn test_delete_reports_whether_row_existed() {
        let f = fixture().await;
        let created = f
            .repo
            .create(new_product("Mock Product", f.category_id))
            .await
            .unwrap();

        assert!(f.repo.delete(created.id).await.unwrap());
        assert!(!f.repo.delete(created.id).await.unwrap());
        assert!(!f.repo.delete(0).await.unwrap());
        assert_eq!(f.db.count("products").await, 0);
    }

    #[tokio::test]
    async fn test_name_key_constraint_maps_to_duplicate_name() {
        let f = fixture().await;
        f.repo
            .create(new_product("Mock Product", f.category_id))
            .await
            .unwrap();

        let err = f
            .db
            .connection
            .execute_unprepared(&format!(
                "INSERT INTO products (name, name_key, price, is_18_plus, category_id) \
                 VALUES ('MOCK PRODUCT', 'mock product', 1.0, 0, {})",
                f.category_id
            ))
            .await
            .unwrap_err();

        assert!(matches!(
            write_error(err, "MOCK PRODUCT", f.category_id),
            ProductError::DuplicateName(name) if name == "MOCK PRODUCT"
        ));
        assert_eq!(f.db.count("products").await, 1);
    }

    #[tokio::test]
    async fn test_foreign_key_maps_to_category_not_found() {
        let f = fixture().await;

        let err = f
            .db
            .connection
            .execute_unprepared(
                "INSERT INTO products (name, name_key, price, is_18_plus, category_id) \
                 VALUES ('Orphan', 'orphan', 1.0, 0, 999)",
            )
            .await
            .unwrap_err();

        assert!(matches!(
            write_error(err, "Orphan", 999),
            ProductError::CategoryNotFound(999)
        ));
        assert_eq!(f.db.count("products").await, 0);
    }

    #[test]
    fn test_other_errors_stay_database_errors() {
        let err = DbErr::Custom("disk I/O error".to_string());
        assert!(matches!(write_error(err, "x", 1), ProductError::Database(_)));
    }
}
