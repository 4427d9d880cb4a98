use std::sync::Arc;

use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect};
use serde::Serialize;
use tracing::{error, info, instrument};
use utoipa::ToSchema;

use crate::{common::PageRequest, errors::ServiceError, models::store};

#[derive(Debug, Serialize, ToSchema)]
pub struct StoreRow {
    pub store_name: String,
    pub address: String,
    pub working_time: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StoreListResponse {
    pub stores: Vec<StoreRow>,
    pub total_count: u64,
    pub limit: u64,
    pub offset: u64,
    pub current_page: u64,
    pub total_pages: u64,
}

#[derive(Debug, Clone)]
pub struct StoreService {
    db: Arc<DatabaseConnection>,
}

impl StoreService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Lists stores with pagination, ordered by primary key for stable pages.
    #[instrument(skip(self))]
    pub async fn list_stores(&self, page: PageRequest) -> Result<StoreListResponse, ServiceError> {
        let db = &*self.db;

        let stores = store::Entity::find()
            .order_by_asc(store::Column::Id)
            .limit(page.limit)
            .offset(page.offset)
            .all(db)
            .await
            .map_err(|e| {
                error!(error = %e, "failed to fetch stores page");
                ServiceError::DatabaseError(e)
            })?;

        let total_count = store::Entity::find().count(db).await.map_err(|e| {
            error!(error = %e, "failed to count stores");
            ServiceError::DatabaseError(e)
        })?;

        let meta = page.meta(total_count);

        info!(total_count, returned = stores.len(), "stores listed");

        Ok(StoreListResponse {
            stores: stores
                .into_iter()
                .map(|store| StoreRow {
                    store_name: store.name,
                    address: store.address,
                    working_time: store.working_time,
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
