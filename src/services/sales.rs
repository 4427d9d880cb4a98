use std::sync::Arc;

use chrono::NaiveDateTime;
use sea_orm::{
    sea_query::{Expr, Func, SimpleExpr},
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, FromQueryResult, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Select,
};
use serde::Serialize;
use tracing::{error, info, instrument};
use utoipa::ToSchema;

use crate::{
    common::PageRequest,
    errors::ServiceError,
    models::{product, sale, store},
};

/// Optional, conjunctive filters narrowing the sales population.
///
/// An absent field means "no constraint". An inverted date range is rejected
/// at the service boundary before any query runs; the filter itself never
/// validates values.
#[derive(Debug, Clone, Default)]
pub struct SalesFilter {
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
    pub store_name: Option<String>,
    pub product_name: Option<String>,
}

impl SalesFilter {
    /// Builds the predicate shared by all three sales queries.
    ///
    /// Conditions are accumulated in a fixed order (date start, date end,
    /// store, product), so the bound parameter list is deterministic for any
    /// subset of active filters. Zero active filters yield a neutral
    /// always-true condition.
    pub fn condition(&self) -> Condition {
        let mut cond = Condition::all();
        if let Some(start) = self.start_date {
            cond = cond.add(sale::Column::Date.gte(start));
        }
        if let Some(end) = self.end_date {
            cond = cond.add(sale::Column::Date.lte(end));
        }
        if let Some(name) = &self.store_name {
            cond = cond.add(store::Column::Name.eq(name.clone()));
        }
        if let Some(name) = &self.product_name {
            cond = cond.add(product::Column::Product.eq(name.clone()));
        }
        cond
    }

    fn ensure_date_range(&self) -> Result<(), ServiceError> {
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                return Err(ServiceError::InvalidInput(format!(
                    "end_date {} is earlier than start_date {}",
                    end, start
                )));
            }
        }
        Ok(())
    }
}

/// One row of the sales listing: a projection of sales joined against
/// stores and products.
#[derive(Debug, Clone, PartialEq, FromQueryResult, Serialize, ToSchema)]
pub struct SaleRow {
    pub date: NaiveDateTime,
    pub quantity: i32,
    pub store_name: String,
    pub product_name: String,
}

/// Raw aggregate row; SQL `SUM` over zero rows yields NULL.
#[derive(Debug, Default, FromQueryResult)]
struct SalesTotals {
    total_quantity_sold: Option<i64>,
    total_sales_amount: Option<f64>,
}

/// Summary statistics over the full filtered population, independent of
/// the page slice.
#[derive(Debug, Serialize, ToSchema)]
pub struct SalesStatistics {
    pub total_quantity_sold: i64,
    pub total_sales_amount: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SaleListResponse {
    pub sales: Vec<SaleRow>,
    pub total_count: u64,
    pub limit: u64,
    pub offset: u64,
    pub current_page: u64,
    pub total_pages: u64,
    pub statistics: SalesStatistics,
}

#[derive(Debug, Clone)]
pub struct SaleService {
    db: Arc<DatabaseConnection>,
}

impl SaleService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// The joined source every sales query starts from.
    fn joined() -> Select<sale::Entity> {
        sale::Entity::find()
            .join(JoinType::InnerJoin, sale::Relation::Store.def())
            .join(JoinType::InnerJoin, sale::Relation::Product.def())
    }

    /// Page query: projected columns, shared predicate, stable order by
    /// primary key, limit/offset bound after the filter parameters.
    fn data_query(condition: Condition, page: &PageRequest) -> Select<sale::Entity> {
        Self::joined()
            .select_only()
            .column(sale::Column::Date)
            .column(sale::Column::Quantity)
            .column_as(store::Column::Name, "store_name")
            .column_as(product::Column::Product, "product_name")
            .filter(condition)
            .order_by_asc(sale::Column::Id)
            .limit(page.limit)
            .offset(page.offset)
    }

    /// Aggregate query: `SUM(quantity)` and `SUM(quantity * price)` over the
    /// same joined, filtered population, never truncated to a page.
    fn totals_query(condition: Condition) -> Select<sale::Entity> {
        let amount = Expr::col((sale::Entity, sale::Column::Quantity))
            .mul(Expr::col((product::Entity, product::Column::Price)));
        Self::joined()
            .select_only()
            .column_as(sale::Column::Quantity.sum(), "total_quantity_sold")
            .column_as(SimpleExpr::from(Func::sum(amount)), "total_sales_amount")
            .filter(condition)
    }

    /// Lists sales with filtering, pagination, and aggregate statistics.
    ///
    /// Three queries run against the identical filtered population: the page
    /// of rows, the total count, and the aggregate sums. The predicate is
    /// built once and cloned into each query, so the three can never drift
    /// out of sync.
    #[instrument(skip(self))]
    pub async fn list_sales(
        &self,
        filter: SalesFilter,
        page: PageRequest,
    ) -> Result<SaleListResponse, ServiceError> {
        filter.ensure_date_range()?;

        let db = &*self.db;
        let condition = filter.condition();

        let sales = Self::data_query(condition.clone(), &page)
            .into_model::<SaleRow>()
            .all(db)
            .await
            .map_err(|e| {
                error!(error = %e, "failed to fetch sales page");
                ServiceError::DatabaseError(e)
            })?;

        let total_count = Self::joined()
            .filter(condition.clone())
            .count(db)
            .await
            .map_err(|e| {
                error!(error = %e, "failed to count sales");
                ServiceError::DatabaseError(e)
            })?;

        let totals = Self::totals_query(condition)
            .into_model::<SalesTotals>()
            .one(db)
            .await
            .map_err(|e| {
                error!(error = %e, "failed to aggregate sales");
                ServiceError::DatabaseError(e)
            })?
            .unwrap_or_default();

        let meta = page.meta(total_count);

        info!(
            total_count,
            returned = sales.len(),
            current_page = meta.current_page,
            "sales listed"
        );

        Ok(SaleListResponse {
            sales,
            total_count,
            limit: page.limit,
            offset: page.offset,
            current_page: meta.current_page,
            total_pages: meta.total_pages,
            statistics: SalesStatistics {
                total_quantity_sold: totals.total_quantity_sold.unwrap_or(0),
                total_sales_amount: totals.total_sales_amount.unwrap_or(0.0),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sea_orm::{DbBackend, QueryTrait, Value};

    fn date(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn data_values(filter: &SalesFilter) -> Vec<Value> {
        let page = PageRequest::new(10, 0).unwrap();
        SaleService::data_query(filter.condition(), &page)
            .build(DbBackend::Sqlite)
            .values
            .map(|v| v.0)
            .unwrap_or_default()
    }

    #[test]
    fn no_filters_bind_only_limit_and_offset() {
        let values = data_values(&SalesFilter::default());
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn parameter_count_tracks_active_filters() {
        let cases = [
            (
                SalesFilter {
                    start_date: Some(date(1)),
                    ..Default::default()
                },
                1,
            ),
            (
                SalesFilter {
                    start_date: Some(date(1)),
                    end_date: Some(date(5)),
                    ..Default::default()
                },
                2,
            ),
            (
                SalesFilter {
                    store_name: Some("A".into()),
                    product_name: Some("Coffee".into()),
                    ..Default::default()
                },
                2,
            ),
            (
                SalesFilter {
                    start_date: Some(date(1)),
                    end_date: Some(date(5)),
                    store_name: Some("A".into()),
                    product_name: Some("Coffee".into()),
                },
                4,
            ),
        ];
        for (filter, active) in cases {
            // filter bindings plus trailing limit/offset
            assert_eq!(data_values(&filter).len(), active + 2);
        }
    }

    #[test]
    fn filter_parameters_precede_limit_and_offset_in_definition_order() {
        let filter = SalesFilter {
            start_date: Some(date(1)),
            end_date: Some(date(5)),
            store_name: Some("A".into()),
            product_name: Some("Coffee".into()),
        };
        let values = data_values(&filter);
        assert_eq!(values.len(), 6);
        assert_eq!(values[2], Value::from("A"));
        assert_eq!(values[3], Value::from("Coffee"));
        assert_eq!(values[4], Value::from(10u64));
        assert_eq!(values[5], Value::from(0u64));
    }

    #[test]
    fn identical_filters_build_identical_statements() {
        let filter = SalesFilter {
            start_date: Some(date(2)),
            store_name: Some("B".into()),
            ..Default::default()
        };
        let page = PageRequest::new(10, 20).unwrap();
        let a = SaleService::data_query(filter.condition(), &page).build(DbBackend::Sqlite);
        let b = SaleService::data_query(filter.condition(), &page).build(DbBackend::Sqlite);
        assert_eq!(a.sql, b.sql);
        assert_eq!(a.values, b.values);
    }

    #[test]
    fn totals_query_shares_the_filter_bindings_without_pagination() {
        let filter = SalesFilter {
            end_date: Some(date(9)),
            product_name: Some("Tea".into()),
            ..Default::default()
        };
        let data = data_values(&filter);
        let totals = SaleService::totals_query(filter.condition())
            .build(DbBackend::Sqlite)
            .values
            .map(|v| v.0)
            .unwrap_or_default();
        assert_eq!(totals.as_slice(), &data[..data.len() - 2]);
    }

    #[test]
    fn totals_query_sums_quantity_and_amount() {
        let sql = SaleService::totals_query(SalesFilter::default().condition())
            .build(DbBackend::Sqlite)
            .sql;
        assert!(sql.contains("SUM(\"sales\".\"quantity\")"));
        assert!(sql.contains("total_sales_amount"));
    }

    #[test]
    fn data_query_orders_by_primary_key() {
        let page = PageRequest::new(10, 0).unwrap();
        let sql = SaleService::data_query(SalesFilter::default().condition(), &page)
            .build(DbBackend::Sqlite)
            .sql;
        assert!(sql.contains("ORDER BY \"sales\".\"id\" ASC"));
    }

    #[test]
    fn inverted_date_range_is_rejected() {
        let filter = SalesFilter {
            start_date: Some(date(9)),
            end_date: Some(date(1)),
            ..Default::default()
        };
        let err = filter.ensure_date_range().unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));
    }
}
