use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::errors::ErrorResponse;
use crate::services::products::{ProductListResponse, ProductRow};
use crate::services::sales::{SaleListResponse, SaleRow, SalesStatistics};
use crate::services::stores::{StoreListResponse, StoreRow};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Retail Reports API",
        version = "1.0.0",
        description = "Read-only, paginated, filterable views over stores, products, and sales. \
                       The sales listing supports date-range, store, and product filters and \
                       reports aggregate statistics over the full filtered population."
    ),
    paths(
        crate::handlers::stores::list_stores,
        crate::handlers::products::list_products,
        crate::handlers::sales::list_sales,
    ),
    components(schemas(
        StoreListResponse,
        StoreRow,
        ProductListResponse,
        ProductRow,
        SaleListResponse,
        SaleRow,
        SalesStatistics,
        ErrorResponse,
    )),
    tags(
        (name = "Stores", description = "Store listings"),
        (name = "Products", description = "Product listings"),
        (name = "Sales", description = "Filterable sales listings with aggregates"),
    )
)]
pub struct ApiDoc;

/// Swagger UI mounted at `/docs`, with the schema at `/api-docs/openapi.json`.
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}
