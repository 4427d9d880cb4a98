use std::sync::Arc;

use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect};
use serde::Serialize;
use tracing::{error, info, instrument};
use utoipa::ToSchema;

use crate::{common::PageRequest, errors::ServiceError, models::product};

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductRow {
    pub product_name: String,
    pub price: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductListResponse {
    pub products: Vec<ProductRow>,
    pub total_count: u64,
    pub limit: u64,
    pub offset: u64,
    pub current_page: u64,
    pub total_pages: u64,
}

#[derive(Debug, Clone)]
pub struct ProductService {
    db: Arc<DatabaseConnection>,
}

impl ProductService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Lists products with pagination, ordered by primary key for stable pages.
    #[instrument(skip(self))]
    pub async fn list_products(
        &self,
        page: PageRequest,
    ) -> Result<ProductListResponse, ServiceError> {
        let db = &*self.db;

        let products = product::Entity::find()
            .order_by_asc(product::Column::Id)
            .limit(page.limit)
            .offset(page.offset)
            .all(db)
            .await
            .map_err(|e| {
                error!(error = %e, "failed to fetch products page");
                ServiceError::DatabaseError(e)
            })?;

        let total_count = product::Entity::find().count(db).await.map_err(|e| {
            error!(error = %e, "failed to count products");
            ServiceError::DatabaseError(e)
        })?;

        let meta = page.meta(total_count);

        info!(total_count, returned = products.len(), "products listed");

        Ok(ProductListResponse {
            products: products
                .into_iter()
                .map(|product| ProductRow {
                    product_name: product.product,
                    price: product.price,
                })
                .collect(),
            total_count,
            limit: page.limit,
            offset: page.offset,
            current_page: meta.current_page,
            total_pages: meta.total_pages,
        })
    }
}
