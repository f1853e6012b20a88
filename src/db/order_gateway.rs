// src/db/order_gateway.rs

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        dashboard::{DateRange, TopCustomerEntry, TopProductEntry},
        orders::{Order, OrderItem, OrderStatus, PaymentStatus},
    },
};

/// Contrato de acesso a dados do dashboard. A agregação em si é puramente
/// em memória; tudo que toca o banco passa por aqui, o que permite trocar a
/// implementação Postgres por uma em memória nos testes.
#[async_trait]
pub trait OrderDataGateway: Send + Sync {
    /// Todos os pedidos criados dentro da janela (bordas inclusivas),
    /// com cliente e itens já anexados. Ordem de retorno não especificada.
    async fn fetch_orders_in_range(&self, range: &DateRange) -> Result<Vec<Order>, AppError>;

    /// Contagem de produtos ativos do catálogo inteiro (ignora a janela).
    async fn fetch_active_product_count(&self) -> Result<i64, AppError>;

    /// Top N produtos por quantidade vendida, só pedidos entregues na janela.
    async fn fetch_top_products(
        &self,
        range: &DateRange,
        n: i64,
    ) -> Result<Vec<TopProductEntry>, AppError>;

    /// Top N clientes por valor gasto, só pedidos entregues na janela.
    async fn fetch_top_customers(
        &self,
        range: &DateRange,
        n: i64,
    ) -> Result<Vec<TopCustomerEntry>, AppError>;
}

// --- Rows internas (shape plano vindo do SQL) ---

#[derive(Debug, FromRow)]
struct OrderRow {
    id: Uuid,
    customer_id: Uuid,
    total_amount: Decimal,
    order_status: OrderStatus,
    payment_status: PaymentStatus,
    created_at: NaiveDateTime,
}

#[derive(Debug, FromRow)]
struct OrderItemRow {
    order_id: Uuid,
    product_id: Uuid,
    quantity: i32,
    unit_price: Decimal,
}

/// Implementação Postgres do gateway. Os rankings são executados como
/// GROUP BY no próprio banco em vez de materializar itens em memória;
/// empates são desempatados por id ascendente para o resultado ser
/// determinístico.
#[derive(Clone)]
pub struct PgOrderGateway {
    pool: PgPool,
}

impl PgOrderGateway {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderDataGateway for PgOrderGateway {
    async fn fetch_orders_in_range(&self, range: &DateRange) -> Result<Vec<Order>, AppError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            "SELECT id, customer_id, total_amount, order_status, payment_status, created_at
             FROM orders
             WHERE created_at >= $1 AND created_at <= $2",
        )
        .bind(range.start)
        .bind(range.end)
        .fetch_all(&self.pool)
        .await?;

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        // Segunda consulta para os itens, costurados em memória por order_id
        let order_ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let item_rows = sqlx::query_as::<_, OrderItemRow>(
            "SELECT order_id, product_id, quantity, unit_price
             FROM order_items
             WHERE order_id = ANY($1)",
        )
        .bind(&order_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut items_by_order: HashMap<Uuid, Vec<OrderItem>> = HashMap::new();
        for item in item_rows {
            items_by_order
                .entry(item.order_id)
                .or_default()
                .push(OrderItem {
                    product_id: item.product_id,
                    quantity: item.quantity,
                    unit_price: item.unit_price,
                });
        }

        let orders = rows
            .into_iter()
            .map(|r| Order {
                items: items_by_order.remove(&r.id).unwrap_or_default(),
                id: r.id,
                customer_id: r.customer_id,
                total_amount: r.total_amount,
                order_status: r.order_status,
                payment_status: r.payment_status,
                created_at: r.created_at,
            })
            .collect();

        Ok(orders)
    }

    async fn fetch_active_product_count(&self) -> Result<i64, AppError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE is_active = true")
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    async fn fetch_top_products(
        &self,
        range: &DateRange,
        n: i64,
    ) -> Result<Vec<TopProductEntry>, AppError> {
        let entries = sqlx::query_as::<_, TopProductEntry>(
            "SELECT oi.product_id,
                    p.name AS product_name,
                    SUM(oi.quantity)::BIGINT AS total_sold,
                    SUM(oi.quantity * oi.unit_price) AS total_revenue
             FROM order_items oi
             JOIN orders o ON o.id = oi.order_id
             JOIN products p ON p.id = oi.product_id
             WHERE o.created_at >= $1 AND o.created_at <= $2
               AND o.order_status = 'DELIVERED'
             GROUP BY oi.product_id, p.name
             ORDER BY total_sold DESC, oi.product_id ASC
             LIMIT $3",
        )
        .bind(range.start)
        .bind(range.end)
        .bind(n)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    async fn fetch_top_customers(
        &self,
        range: &DateRange,
        n: i64,
    ) -> Result<Vec<TopCustomerEntry>, AppError> {
        let entries = sqlx::query_as::<_, TopCustomerEntry>(
            "SELECT o.customer_id,
                    c.name AS customer_name,
                    c.email,
                    COUNT(*)::BIGINT AS total_orders,
                    SUM(o.total_amount) AS total_spent
             FROM orders o
             JOIN customers c ON c.id = o.customer_id
             WHERE o.created_at >= $1 AND o.created_at <= $2
               AND o.order_status = 'DELIVERED'
             GROUP BY o.customer_id, c.name, c.email
             ORDER BY total_spent DESC, o.customer_id ASC
             LIMIT $3",
        )
        .bind(range.start)
        .bind(range.end)
        .bind(n)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }
}
