// src/models/dashboard.rs

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::models::orders::OrderStatus;

// --- Filtro de Período ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum DashboardFilterType {
    Today,
    SevenDays,
    ThisMonth,
    LastMonth,
    Custom,
}

/// Parâmetros de consulta do dashboard. `start_date` e `end_date` só são
/// considerados quando `filter_type = custom`; filtro ausente vale "hoje".
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct DashboardFilter {
    pub filter_type: Option<DashboardFilterType>,
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
    /// Tamanho dos rankings (padrão 5)
    #[validate(range(min = 0, max = 50))]
    pub top: Option<i64>,
}

/// Janela resolvida, com ambas as bordas inclusivas. O resolvedor sempre
/// produz `start <= end`; um range custom invertido é repassado como veio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

// --- Resultado Consolidado ---

/// O pacote completo de indicadores de uma consulta. Todos os campos são
/// derivados do mesmo snapshot de pedidos, nunca de buscas parciais.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[schema(example = "1500.00")]
    pub total_revenue: Decimal,
    pub total_orders: i64,
    pub total_customers: i64,
    pub total_products: i64,
    pub daily_revenues: Vec<DailyRevenueEntry>,
    pub order_status_stats: Vec<OrderStatusEntry>,
    pub top_products: Vec<TopProductEntry>,
    pub top_customers: Vec<TopCustomerEntry>,
}

// 1. Gráfico de Receita Diária (só pedidos entregues; dias sem venda não aparecem)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyRevenueEntry {
    pub date: NaiveDate,
    #[schema(example = "320.00")]
    pub revenue: Decimal,
    pub order_count: i64,
}

// 2. Distribuição por Status (todos os pedidos da janela)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusEntry {
    pub status: OrderStatus,
    pub count: i64,
    /// Fração de `count` sobre o total da janela, em pontos percentuais
    #[schema(example = "66.6666")]
    pub percentage: Decimal,
}

// 3. Ranking de Produtos (por quantidade vendida)
#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopProductEntry {
    pub product_id: Uuid,
    #[schema(example = "Chá Verde Premium")]
    pub product_name: String,
    pub total_sold: i64,
    #[schema(example = "890.00")]
    pub total_revenue: Decimal,
}

// 4. Ranking de Clientes (por valor gasto)
#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopCustomerEntry {
    pub customer_id: Uuid,
    pub customer_name: String,
    pub email: String,
    pub total_orders: i64,
    #[schema(example = "2450.00")]
    pub total_spent: Decimal,
}
