use anyhow::{Context, Result};
use async_trait::async_trait;
use navigator::CatalogRepository;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow},
    Pool, Row, Sqlite,
};
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};
use tracing::debug;

use shared::domain::{
    Category, CategoryId, Price, Product, ProductId, Subcategory, SubcategoryId,
};

#[derive(Clone)]
pub struct Storage {
    pool: Pool<Sqlite>,
}

#[derive(Debug, Clone)]
pub struct NewProduct<'a> {
    pub subcategory_id: SubcategoryId,
    pub name: &'a str,
    pub description: &'a str,
    pub price: Price,
    pub photo: &'a str,
}

impl Storage {
    pub async fn new(database_url: &str) -> Result<Self> {
        ensure_sqlite_parent_dir_exists(database_url)?;

        let connect_options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connect_options)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    pub async fn health_check(&self) -> Result<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("sqlite ping failed")?;
        Ok(())
    }

    pub async fn create_category(&self, name: &str) -> Result<CategoryId> {
        let rec = sqlx::query("INSERT INTO categories (name) VALUES (?) RETURNING id")
            .bind(name)
            .fetch_one(&self.pool)
            .await
            .with_context(|| format!("failed to create category '{name}'"))?;
        Ok(CategoryId(rec.get::<i64, _>(0)))
    }

    pub async fn create_subcategory(
        &self,
        category_id: CategoryId,
        name: &str,
    ) -> Result<SubcategoryId> {
        let rec = sqlx::query(
            "INSERT INTO subcategories (name, category_id) VALUES (?, ?) RETURNING id",
        )
        .bind(name)
        .bind(category_id.0)
        .fetch_one(&self.pool)
        .await
        .with_context(|| format!("failed to create subcategory '{name}' in category {category_id}"))?;
        Ok(SubcategoryId(rec.get::<i64, _>(0)))
    }

    pub async fn create_product(&self, product: NewProduct<'_>) -> Result<ProductId> {
        let rec = sqlx::query(
            "INSERT INTO products (name, description, price_minor, photo, subcategory_id)
             VALUES (?, ?, ?, ?, ?)
             RETURNING id",
        )
        .bind(product.name)
        .bind(product.description)
        .bind(product.price.minor())
        .bind(product.photo)
        .bind(product.subcategory_id.0)
        .fetch_one(&self.pool)
        .await
        .with_context(|| {
            format!(
                "failed to create product '{}' in subcategory {}",
                product.name, product.subcategory_id
            )
        })?;
        Ok(ProductId(rec.get::<i64, _>(0)))
    }
}

fn product_from_row(row: &SqliteRow) -> Product {
    Product {
        id: ProductId(row.get::<i64, _>("id")),
        name: row.get::<String, _>("name"),
        description: row.get::<String, _>("description"),
        price: Price::from_minor(row.get::<i64, _>("price_minor")),
        photo: row.get::<String, _>("photo"),
        subcategory_id: SubcategoryId(row.get::<i64, _>("subcategory_id")),
    }
}

#[async_trait]
impl CatalogRepository for Storage {
    async fn list_categories(&self, limit: u32, offset: i64) -> Result<Vec<Category>> {
        let rows = sqlx::query("SELECT id, name FROM categories ORDER BY id LIMIT ? OFFSET ?")
            .bind(i64::from(limit))
            .bind(offset.max(0))
            .fetch_all(&self.pool)
            .await
            .context("failed to list categories")?;
        Ok(rows
            .into_iter()
            .map(|r| Category {
                id: CategoryId(r.get::<i64, _>(0)),
                name: r.get::<String, _>(1),
            })
            .collect())
    }

    async fn list_subcategories(
        &self,
        category_id: CategoryId,
        limit: u32,
        offset: i64,
    ) -> Result<Vec<Subcategory>> {
        let rows = sqlx::query(
            "SELECT id, name, category_id
             FROM subcategories
             WHERE category_id = ?
             ORDER BY id
             LIMIT ? OFFSET ?",
        )
        .bind(category_id.0)
        .bind(i64::from(limit))
        .bind(offset.max(0))
        .fetch_all(&self.pool)
        .await
        .with_context(|| format!("failed to list subcategories of category {category_id}"))?;
        Ok(rows
            .into_iter()
            .map(|r| Subcategory {
                id: SubcategoryId(r.get::<i64, _>(0)),
                name: r.get::<String, _>(1),
                category_id: CategoryId(r.get::<i64, _>(2)),
            })
            .collect())
    }

    async fn product_at(
        &self,
        subcategory_id: SubcategoryId,
        index0: i64,
    ) -> Result<Option<Product>> {
        // sqlite clamps a negative OFFSET to zero, which would alias index 0
        if index0 < 0 {
            debug!(%subcategory_id, index0, "negative product offset");
            return Ok(None);
        }
        let row = sqlx::query(
            "SELECT id, name, description, price_minor, photo, subcategory_id
             FROM products
             WHERE subcategory_id = ?
             ORDER BY id
             LIMIT 1 OFFSET ?",
        )
        .bind(subcategory_id.0)
        .bind(index0)
        .fetch_optional(&self.pool)
        .await
        .with_context(|| {
            format!("failed to load product {index0} of subcategory {subcategory_id}")
        })?;
        Ok(row.as_ref().map(product_from_row))
    }

    async fn count_products(&self, subcategory_id: SubcategoryId) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE subcategory_id = ?")
            .bind(subcategory_id.0)
            .fetch_one(&self.pool)
            .await
            .with_context(|| format!("failed to count products of subcategory {subcategory_id}"))?;
        Ok(count)
    }
}

/// Turns a bare file path or `sqlite:` path into a `sqlite://` URL.
/// Memory and full URLs are returned as given.
pub fn normalize_database_url(raw_database_url: &str) -> String {
    let raw_database_url = raw_database_url.trim();

    if raw_database_url.starts_with("sqlite::memory:")
        || raw_database_url.starts_with("sqlite://")
        || raw_database_url.contains("://")
    {
        return raw_database_url.to_string();
    }

    let path = raw_database_url
        .strip_prefix("sqlite:")
        .unwrap_or(raw_database_url)
        .replace('\\', "/");
    format!("sqlite://{path}")
}

fn ensure_sqlite_parent_dir_exists(database_url: &str) -> Result<()> {
    let Some(path) = sqlite_path(database_url) else {
        return Ok(());
    };

    let Some(parent) = path.parent() else {
        return Ok(());
    };

    fs::create_dir_all(parent).with_context(|| {
        format!(
            "failed to create parent directory '{}' for database url '{database_url}'",
            parent.display()
        )
    })?;

    Ok(())
}

fn sqlite_path(database_url: &str) -> Option<PathBuf> {
    if database_url == "sqlite::memory:" || !database_url.starts_with("sqlite:") {
        return None;
    }

    let path = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:")
        .split('?')
        .next()
        .unwrap_or_default();

    if path.is_empty() {
        return None;
    }

    Some(Path::new(path).to_path_buf())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
