use anyhow::Result;
use async_trait::async_trait;
use shared::domain::{Category, CategoryId, Product, Subcategory, SubcategoryId};

/// Read access to the catalog hierarchy.
///
/// Every listing must use the same deterministic order for identical
/// arguments, and `product_at(s, i)` must agree with the order used to
/// count, so that `product_at` resolves for every `i` in `0..count`.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn list_categories(&self, limit: u32, offset: i64) -> Result<Vec<Category>>;
    async fn list_subcategories(
        &self,
        category_id: CategoryId,
        limit: u32,
        offset: i64,
    ) -> Result<Vec<Subcategory>>;
    /// Zero-based position within the subcategory.
    async fn product_at(&self, subcategory_id: SubcategoryId, index0: i64)
        -> Result<Option<Product>>;
    async fn count_products(&self, subcategory_id: SubcategoryId) -> Result<i64>;
}
