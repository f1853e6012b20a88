// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Dashboard ---
        handlers::dashboard::get_stats,
        handlers::dashboard::get_revenue_chart,
        handlers::dashboard::get_order_status_stats,
        handlers::dashboard::get_top_products,
        handlers::dashboard::get_top_customers,
    ),
    components(
        schemas(
            // --- Dashboard ---
            models::dashboard::DashboardFilterType,
            models::dashboard::DashboardStats,
            models::dashboard::DailyRevenueEntry,
            models::dashboard::OrderStatusEntry,
            models::dashboard::TopProductEntry,
            models::dashboard::TopCustomerEntry,

            // --- Pedidos ---
            models::orders::OrderStatus,
            models::orders::PaymentStatus,
            models::orders::Order,
            models::orders::OrderItem,
        )
    ),
    tags(
        (name = "Dashboard", description = "Indicadores e Gráficos de Vendas")
    )
)]
pub struct ApiDoc;
