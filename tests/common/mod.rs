use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use sea_orm::{ConnectOptions, ConnectionTrait, Database};
use serde_json::Value;
use tower::ServiceExt;

use retail_reports_api::{config::AppConfig, AppServices, AppState};

const SCHEMA: &[&str] = &[
    "CREATE TABLE stores (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        address TEXT NOT NULL,
        working_time TEXT NOT NULL
    )",
    "CREATE TABLE products (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        product TEXT NOT NULL,
        price REAL NOT NULL
    )",
    "CREATE TABLE sales (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        date TIMESTAMP NOT NULL,
        quantity INTEGER NOT NULL,
        store_id INTEGER NOT NULL REFERENCES stores(id),
        product_id INTEGER NOT NULL REFERENCES products(id)
    )",
];

/// Harness spinning up application state backed by an in-memory SQLite
/// database. A single pooled connection keeps the in-memory database alive
/// for the lifetime of the test.
pub struct TestApp {
    router: Router,
    pub state: AppState,
}

impl TestApp {
    /// Construct a new test application with fresh database state.
    pub async fn new() -> Self {
        let mut opts = ConnectOptions::new("sqlite::memory:".to_owned());
        opts.max_connections(1).min_connections(1);

        let db = Database::connect(opts)
            .await
            .expect("failed to open in-memory sqlite");
        for ddl in SCHEMA {
            db.execute_unprepared(ddl)
                .await
                .expect("failed to create schema");
        }

        let db = Arc::new(db);
        let services = AppServices::new(db.clone());
        let state = AppState {
            db: db.clone(),
            config: AppConfig::default(),
            services,
        };
        let router = retail_reports_api::api_routes().with_state(state.clone());

        Self { router, state }
    }

    /// Seeds two stores, two products, and five sales:
    /// store "A" has three sales (quantities 2, 1, 4), store "B" has two
    /// (quantities 3, 5). "Coffee" costs 4.5, "Tea" costs 3.0.
    pub async fn seed_sales_fixture(&self) {
        let inserts = [
            "INSERT INTO stores (id, name, address, working_time) VALUES
                (1, 'A', '1 Main St', '9-18'),
                (2, 'B', '2 Side St', '10-20')",
            "INSERT INTO products (id, product, price) VALUES
                (1, 'Coffee', 4.5),
                (2, 'Tea', 3.0)",
            "INSERT INTO sales (id, date, quantity, store_id, product_id) VALUES
                (1, '2024-03-01 09:00:00', 2, 1, 1),
                (2, '2024-03-02 10:30:00', 1, 1, 2),
                (3, '2024-03-03 11:00:00', 4, 1, 1),
                (4, '2024-03-04 12:00:00', 3, 2, 1),
                (5, '2024-03-05 13:15:00', 5, 2, 2)",
        ];
        for stmt in inserts {
            self.state
                .db
                .execute_unprepared(stmt)
                .await
                .expect("failed to seed fixture");
        }
    }

    /// Issues a GET request against the router and decodes the JSON body.
    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .body(Body::empty())
                    .expect("failed to build request"),
            )
            .await
            .expect("request failed");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("failed to read body");
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }
}
