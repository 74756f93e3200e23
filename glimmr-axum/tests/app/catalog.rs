use glimmr_core::{
    models::{CachedPrice, ProductId, ProductRecord},
    ports::CatalogRepository,
};
use std::{convert::Infallible, sync::Mutex};

/// A catalog kept in a vector, in listing order.
#[derive(Default)]
pub struct TestCatalog(Mutex<Vec<ProductRecord>>);

impl TestCatalog {
    pub fn new(records: impl IntoIterator<Item = ProductRecord>) -> Self {
        Self(Mutex::new(records.into_iter().collect()))
    }

    /// Peek at a record without going through the port.
    pub fn record(&self, product_id: &str) -> Option<ProductRecord> {
        self.0
            .lock()
            .unwrap()
            .iter()
            .find(|record| record.id.as_str() == product_id)
            .cloned()
    }
}

impl CatalogRepository for TestCatalog {
    type Error = Infallible;

    async fn list_products(&self) -> Result<Vec<ProductRecord>, Self::Error> {
        Ok(self.0.lock().unwrap().clone())
    }

    async fn get_product(&self, product_id: &ProductId) -> Result<Option<ProductRecord>, Self::Error> {
        Ok(self.record(product_id.as_str()))
    }

    async fn store_price(&self, product_id: &ProductId, price: CachedPrice) -> Result<bool, Self::Error> {
        let mut records = self.0.lock().unwrap();
        match records.iter_mut().find(|record| &record.id == product_id) {
            Some(record) => {
                record.cached_price = Some(price);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
