//! Revenue and billing

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;

use crate::models::{FinanceOverview, Invoice, MonthlyRevenue};
use crate::response::Listing;
use crate::store::seed;
use crate::ApiState;

pub fn router() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/overview", get(overview))
        .route("/invoices", get(list_invoices))
        .route("/trend", get(trend))
}

#[derive(Debug, Serialize)]
pub struct RevenueTrend {
    pub months: Vec<MonthlyRevenue>,
}

/// Revenue totals
#[utoipa::path(
    get,
    path = "/admin/api/finance/overview",
    responses((status = 200, description = "Finance overview")),
    tag = "finance"
)]
pub async fn overview(State(state): State<Arc<ApiState>>) -> Json<FinanceOverview> {
    Json(state.registry.finance.clone())
}

/// Invoices for the current period, one per customer
#[utoipa::path(
    get,
    path = "/admin/api/finance/invoices",
    responses((status = 200, description = "`{invoices, total}`")),
    tag = "finance"
)]
pub async fn list_invoices(State(state): State<Arc<ApiState>>) -> Listing<Invoice> {
    let customers = state.registry.customers.list();
    Listing::new("invoices", seed::invoices(&customers))
}

/// Monthly revenue
#[utoipa::path(
    get,
    path = "/admin/api/finance/trend",
    responses((status = 200, description = "`{months}`")),
    tag = "finance"
)]
pub async fn trend() -> Json<RevenueTrend> {
    Json(RevenueTrend {
        months: seed::revenue_trend(),
    })
}
