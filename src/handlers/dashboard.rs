// src/handlers/dashboard.rs

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::dashboard::{
        DailyRevenueEntry, DashboardFilter, DashboardStats, OrderStatusEntry, TopCustomerEntry,
        TopProductEntry,
    },
};

// Os cinco endpoints derivam do mesmo cálculo consolidado; os específicos
// só projetam um campo do pacote, como o frontend do dashboard espera.

// GET /api/admin/dashboard/stats
#[utoipa::path(
    get,
    path = "/api/admin/dashboard/stats",
    tag = "Dashboard",
    params(DashboardFilter),
    responses(
        (status = 200, description = "Estatísticas consolidadas do período", body = DashboardStats),
        (status = 400, description = "Filtro inválido")
    )
)]
pub async fn get_stats(
    State(app_state): State<AppState>,
    Query(filter): Query<DashboardFilter>,
) -> Result<impl IntoResponse, AppError> {
    filter.validate()?;

    let stats = app_state.dashboard_service.get_dashboard_stats(&filter).await?;

    Ok((StatusCode::OK, Json(stats)))
}

// GET /api/admin/dashboard/revenue-chart
#[utoipa::path(
    get,
    path = "/api/admin/dashboard/revenue-chart",
    tag = "Dashboard",
    params(DashboardFilter),
    responses(
        (status = 200, description = "Receita diária do período (só pedidos entregues)", body = Vec<DailyRevenueEntry>),
        (status = 400, description = "Filtro inválido")
    )
)]
pub async fn get_revenue_chart(
    State(app_state): State<AppState>,
    Query(filter): Query<DashboardFilter>,
) -> Result<impl IntoResponse, AppError> {
    filter.validate()?;

    let stats = app_state.dashboard_service.get_dashboard_stats(&filter).await?;

    Ok((StatusCode::OK, Json(stats.daily_revenues)))
}

// GET /api/admin/dashboard/order-status-stats
#[utoipa::path(
    get,
    path = "/api/admin/dashboard/order-status-stats",
    tag = "Dashboard",
    params(DashboardFilter),
    responses(
        (status = 200, description = "Distribuição de pedidos por status", body = Vec<OrderStatusEntry>),
        (status = 400, description = "Filtro inválido")
    )
)]
pub async fn get_order_status_stats(
    State(app_state): State<AppState>,
    Query(filter): Query<DashboardFilter>,
) -> Result<impl IntoResponse, AppError> {
    filter.validate()?;

    let stats = app_state.dashboard_service.get_dashboard_stats(&filter).await?;

    Ok((StatusCode::OK, Json(stats.order_status_stats)))
}

// GET /api/admin/dashboard/top-products
#[utoipa::path(
    get,
    path = "/api/admin/dashboard/top-products",
    tag = "Dashboard",
    params(DashboardFilter),
    responses(
        (status = 200, description = "Ranking de produtos por quantidade vendida", body = Vec<TopProductEntry>),
        (status = 400, description = "Filtro inválido")
    )
)]
pub async fn get_top_products(
    State(app_state): State<AppState>,
    Query(filter): Query<DashboardFilter>,
) -> Result<impl IntoResponse, AppError> {
    filter.validate()?;

    let stats = app_state.dashboard_service.get_dashboard_stats(&filter).await?;

    Ok((StatusCode::OK, Json(stats.top_products)))
}

// GET /api/admin/dashboard/top-customers
#[utoipa::path(
    get,
    path = "/api/admin/dashboard/top-customers",
    tag = "Dashboard",
    params(DashboardFilter),
    responses(
        (status = 200, description = "Ranking de clientes por valor gasto", body = Vec<TopCustomerEntry>),
        (status = 400, description = "Filtro inválido")
    )
)]
pub async fn get_top_customers(
    State(app_state): State<AppState>,
    Query(filter): Query<DashboardFilter>,
) -> Result<impl IntoResponse, AppError> {
    filter.validate()?;

    let stats = app_state.dashboard_service.get_dashboard_stats(&filter).await?;

    Ok((StatusCode::OK, Json(stats.top_customers)))
}
