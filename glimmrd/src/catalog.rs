//! An in-memory product catalog.

use glimmr_core::{
    models::{CachedPrice, Map, ProductId, ProductRecord},
    ports::CatalogRepository,
};
use std::{convert::Infallible, path::Path};
use thiserror::Error;
use tokio::sync::RwLock;

/// The ways a catalog seed can be unusable
#[derive(Debug, Error)]
pub enum SeedError {
    /// The seed file could not be read
    #[error("failed to read catalog {}", path.display())]
    Read {
        /// The file in question
        path: std::path::PathBuf,
        /// The underlying failure
        #[source]
        source: std::io::Error,
    },
    /// The seed is not an array of product records
    #[error("invalid catalog: {0}")]
    Decode(#[from] serde_json::Error),
    /// Two records share an identifier
    #[error("duplicate product {0}")]
    Duplicate(ProductId),
}

/// Product records held in memory, in seed order.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    products: RwLock<Map<ProductId, ProductRecord>>,
}

impl MemoryCatalog {
    /// Build a catalog from records, rejecting duplicate identifiers.
    pub fn new(records: impl IntoIterator<Item = ProductRecord>) -> Result<Self, SeedError> {
        let mut products = Map::default();
        for record in records {
            if products.contains_key(&record.id) {
                return Err(SeedError::Duplicate(record.id));
            }
            products.insert(record.id.clone(), record);
        }
        Ok(Self {
            products: RwLock::new(products),
        })
    }

    /// Parse a JSON array of product records.
    pub fn from_json(json: &str) -> Result<Self, SeedError> {
        let records: Vec<ProductRecord> = serde_json::from_str(json)?;
        Self::new(records)
    }

    /// Read a JSON seed file.
    pub fn load(path: &Path) -> Result<Self, SeedError> {
        let json = std::fs::read_to_string(path).map_err(|source| SeedError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}

impl CatalogRepository for MemoryCatalog {
    type Error = Infallible;

    async fn list_products(&self) -> Result<Vec<ProductRecord>, Self::Error> {
        Ok(self.products.read().await.values().cloned().collect())
    }

    async fn get_product(&self, product_id: &ProductId) -> Result<Option<ProductRecord>, Self::Error> {
        Ok(self.products.read().await.get(product_id).cloned())
    }

    async fn store_price(&self, product_id: &ProductId, price: CachedPrice) -> Result<bool, Self::Error> {
        Ok(match self.products.write().await.get_mut(product_id) {
            Some(record) => {
                record.cached_price = Some(price);
                true
            }
            None => false,
        })
    }
}
