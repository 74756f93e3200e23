use crate::models::{CachedPrice, ProductId, ProductRecord};

/// Repository interface for the product catalog read-path.
///
/// Only the material data pricing needs is exposed here; the rest of the
/// product record belongs to the catalog owner.
pub trait CatalogRepository {
    /// Error type for storage failures
    type Error: std::error::Error;

    /// List every product in catalog order.
    fn list_products(&self) -> impl Future<Output = Result<Vec<ProductRecord>, Self::Error>> + Send;

    /// Get a single product.
    ///
    /// # Returns
    ///
    /// Ok(None) if the product does not exist.
    fn get_product(
        &self,
        product_id: &ProductId,
    ) -> impl Future<Output = Result<Option<ProductRecord>, Self::Error>> + Send;

    /// Remember a freshly computed breakdown alongside the product.
    ///
    /// # Returns
    ///
    /// Ok(false) if the product does not exist.
    fn store_price(
        &self,
        product_id: &ProductId,
        price: CachedPrice,
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send;
}
