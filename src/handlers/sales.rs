use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDateTime;
use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use crate::{
    common::PageRequest,
    errors::ApiError,
    handlers::common::{map_service_error, validate_input},
    services::sales::{SaleListResponse, SalesFilter},
    AppState,
};

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SaleListQuery {
    /// Earliest sale timestamp to include (ISO 8601)
    pub start_date: Option<NaiveDateTime>,
    /// Latest sale timestamp to include (ISO 8601)
    pub end_date: Option<NaiveDateTime>,
    /// Exact store name to match
    pub store_filter: Option<String>,
    /// Exact product name to match
    pub product_filter: Option<String>,
    /// Page size (default: 10)
    #[serde(default = "default_limit")]
    #[validate(range(min = 1))]
    pub limit: u64,
    /// Rows to skip (default: 0)
    #[serde(default)]
    pub offset: u64,
}

fn default_limit() -> u64 {
    10
}

/// List sales with filtering and aggregate statistics
#[utoipa::path(
    get,
    path = "/sales/all",
    summary = "Get all sales",
    description = "Retrieve information about all existing sales using filtering \
                   by date range, store name or product name",
    params(SaleListQuery),
    responses(
        (status = 200, description = "Sales retrieved successfully", body = SaleListResponse),
        (status = 400, description = "Invalid request parameters", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse),
    ),
    tag = "Sales"
)]
pub async fn list_sales(
    State(state): State<AppState>,
    Query(params): Query<SaleListQuery>,
) -> Result<Json<SaleListResponse>, ApiError> {
    validate_input(&params)?;
    let page = PageRequest::new(params.limit, params.offset).map_err(map_service_error)?;
    let filter = SalesFilter {
        start_date: params.start_date,
        end_date: params.end_date,
        store_name: params.store_filter,
        product_name: params.product_filter,
    };
    let sales = state
        .services
        .sales
        .list_sales(filter, page)
        .await
        .map_err(map_service_error)?;
    Ok(Json(sales))
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/all", get(list_sales))
}
