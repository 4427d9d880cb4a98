use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use crate::{
    common::PageRequest,
    errors::ApiError,
    handlers::common::{map_service_error, validate_input},
    services::products::ProductListResponse,
    AppState,
};

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductListQuery {
    /// Page size (default: 5)
    #[serde(default = "default_limit")]
    #[validate(range(min = 1))]
    pub limit: u64,
    /// Rows to skip (default: 0)
    #[serde(default)]
    pub offset: u64,
}

fn default_limit() -> u64 {
    5
}

/// List products
#[utoipa::path(
    get,
    path = "/products/all",
    summary = "Get all products",
    description = "Retrieve information about all existing products",
    params(ProductListQuery),
    responses(
        (status = 200, description = "Products retrieved successfully", body = ProductListResponse),
        (status = 400, description = "Invalid request parameters", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse),
    ),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<ProductListQuery>,
) -> Result<Json<ProductListResponse>, ApiError> {
    validate_input(&params)?;
    let page = PageRequest::new(params.limit, params.offset).map_err(map_service_error)?;
    let products = state
        .services
        .products
        .list_products(page)
        .await
        .map_err(map_service_error)?;
    Ok(Json(products))
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/all", get(list_products))
}
