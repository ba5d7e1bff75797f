use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex,
};

use anyhow::{bail, Result};
use async_trait::async_trait;
use shared::domain::{
    Category, CategoryId, Price, Product, ProductId, Subcategory, SubcategoryId,
};

use crate::repository::CatalogRepository;

/// Catalog held in memory, ordered by id like the SQL store.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    categories: Vec<Category>,
    subcategories: Vec<Subcategory>,
    products: Vec<Product>,
    unavailable: AtomicBool,
    product_offsets: Mutex<Vec<i64>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, id: i64, name: &str) -> Self {
        self.categories.push(Category {
            id: CategoryId(id),
            name: name.to_string(),
        });
        self.categories.sort_by_key(|c| c.id);
        self
    }

    pub fn with_subcategory(mut self, id: i64, category_id: i64, name: &str) -> Self {
        self.subcategories.push(Subcategory {
            id: SubcategoryId(id),
            name: name.to_string(),
            category_id: CategoryId(category_id),
        });
        self.subcategories.sort_by_key(|s| s.id);
        self
    }

    pub fn with_product(
        mut self,
        id: i64,
        subcategory_id: i64,
        name: &str,
        price_minor: i64,
        photo: &str,
    ) -> Self {
        self.products.push(Product {
            id: ProductId(id),
            name: name.to_string(),
            description: format!("{name} description"),
            price: Price::from_minor(price_minor),
            photo: photo.to_string(),
            subcategory_id: SubcategoryId(subcategory_id),
        });
        self.products.sort_by_key(|p| p.id);
        self
    }

    /// Makes every read fail until switched back.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Offsets passed to `product_at`, oldest first.
    pub fn product_offsets(&self) -> Vec<i64> {
        self.product_offsets
            .lock()
            .map(|offsets| offsets.clone())
            .unwrap_or_default()
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            bail!("memory catalog marked unavailable");
        }
        Ok(())
    }
}

fn window<T: Clone>(rows: impl Iterator<Item = T>, limit: u32, offset: i64) -> Vec<T> {
    let Ok(offset) = usize::try_from(offset) else {
        return Vec::new();
    };
    rows.skip(offset).take(limit as usize).collect()
}

#[async_trait]
impl CatalogRepository for MemoryCatalog {
    async fn list_categories(&self, limit: u32, offset: i64) -> Result<Vec<Category>> {
        self.check_available()?;
        Ok(window(self.categories.iter().cloned(), limit, offset))
    }

    async fn list_subcategories(
        &self,
        category_id: CategoryId,
        limit: u32,
        offset: i64,
    ) -> Result<Vec<Subcategory>> {
        self.check_available()?;
        let rows = self
            .subcategories
            .iter()
            .filter(|s| s.category_id == category_id)
            .cloned();
        Ok(window(rows, limit, offset))
    }

    async fn product_at(
        &self,
        subcategory_id: SubcategoryId,
        index0: i64,
    ) -> Result<Option<Product>> {
        self.check_available()?;
        if let Ok(mut offsets) = self.product_offsets.lock() {
            offsets.push(index0);
        }
        let rows = self
            .products
            .iter()
            .filter(|p| p.subcategory_id == subcategory_id)
            .cloned();
        Ok(window(rows, 1, index0).into_iter().next())
    }

    async fn count_products(&self, subcategory_id: SubcategoryId) -> Result<i64> {
        self.check_available()?;
        let count = self
            .products
            .iter()
            .filter(|p| p.subcategory_id == subcategory_id)
            .count();
        Ok(count as i64)
    }
}
