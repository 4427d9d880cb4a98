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
    services::stores::StoreListResponse,
    AppState,
};

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StoreListQuery {
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

/// List stores
#[utoipa::path(
    get,
    path = "/stores/all",
    summary = "Get all stores",
    description = "Retrieve information about all existing stores",
    params(StoreListQuery),
    responses(
        (status = 200, description = "Stores retrieved successfully", body = StoreListResponse),
        (status = 400, description = "Invalid request parameters", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse),
    ),
    tag = "Stores"
)]
pub async fn list_stores(
    State(state): State<AppState>,
    Query(params): Query<StoreListQuery>,
) -> Result<Json<StoreListResponse>, ApiError> {
    validate_input(&params)?;
    let page = PageRequest::new(params.limit, params.offset).map_err(map_service_error)?;
    let stores = state
        .services
        .stores
        .list_stores(page)
        .await
        .map_err(map_service_error)?;
    Ok(Json(stores))
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/all", get(list_stores))
}
