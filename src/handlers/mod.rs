pub mod common;
pub mod health;
pub mod products;
pub mod sales;
pub mod stores;

use std::sync::Arc;

use crate::db::DbPool;
use crate::services::{products::ProductService, sales::SaleService, stores::StoreService};

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates the read-side query logic used by HTTP
/// handlers.
#[derive(Clone)]
pub struct AppServices {
    pub stores: Arc<StoreService>,
    pub products: Arc<ProductService>,
    pub sales: Arc<SaleService>,
}

impl AppServices {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self {
            stores: Arc::new(StoreService::new(db_pool.clone())),
            products: Arc::new(ProductService::new(db_pool.clone())),
            sales: Arc::new(SaleService::new(db_pool)),
        }
    }
}
