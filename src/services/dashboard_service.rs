// src/services/dashboard_service.rs

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    db::OrderDataGateway,
    models::{
        dashboard::{
            DailyRevenueEntry, DashboardFilter, DashboardFilterType, DashboardStats, DateRange,
            OrderStatusEntry,
        },
        orders::{Order, OrderStatus},
    },
};

/// Tamanho padrão dos rankings de produtos e clientes.
const DEFAULT_TOP_N: i64 = 5;

#[derive(Clone)]
pub struct DashboardService {
    gateway: Arc<dyn OrderDataGateway>,
}

impl DashboardService {
    pub fn new(gateway: Arc<dyn OrderDataGateway>) -> Self {
        Self { gateway }
    }

    /// Monta o pacote completo de indicadores para o período filtrado.
    /// As quatro leituras do gateway são independentes e rodam em paralelo;
    /// qualquer falha aborta a consulta inteira, sem resultado parcial.
    pub async fn get_dashboard_stats(
        &self,
        filter: &DashboardFilter,
    ) -> Result<DashboardStats, AppError> {
        let range = resolve_date_range(filter, Local::now().naive_local());
        let top_n = filter.top.unwrap_or(DEFAULT_TOP_N);

        tracing::debug!(
            start = %range.start,
            end = %range.end,
            top_n,
            "Consultando estatísticas do dashboard"
        );

        let (orders, total_products, top_products, top_customers) = tokio::try_join!(
            self.gateway.fetch_orders_in_range(&range),
            self.gateway.fetch_active_product_count(),
            self.gateway.fetch_top_products(&range, top_n),
            self.gateway.fetch_top_customers(&range, top_n),
        )?;

        Ok(DashboardStats {
            total_revenue: sum_delivered_revenue(&orders),
            total_orders: orders.len() as i64,
            total_customers: count_distinct_customers(&orders),
            total_products,
            daily_revenues: build_daily_revenues(&orders),
            order_status_stats: build_status_stats(&orders),
            top_products,
            top_customers,
        })
    }
}

// --- Resolução de Período ---

/// Traduz o filtro da consulta numa janela concreta `[start, end]`, ambas as
/// bordas inclusivas, relativa ao relógio de parede local. `now` é injetado
/// para a função ser determinística nos testes. Nunca falha: filtro ausente
/// equivale a "hoje".
pub fn resolve_date_range(filter: &DashboardFilter, now: NaiveDateTime) -> DateRange {
    let today = now.date();
    let today_start = today.and_time(NaiveTime::MIN);

    match filter.filter_type.unwrap_or(DashboardFilterType::Today) {
        DashboardFilterType::Today => DateRange {
            start: today_start,
            end: day_end(today),
        },
        DashboardFilterType::SevenDays => DateRange {
            // 7 dias corridos contando o de hoje
            start: (today - Duration::days(6)).and_time(NaiveTime::MIN),
            end: day_end(today),
        },
        DashboardFilterType::ThisMonth => {
            let month_start = first_of_month(today);
            DateRange {
                start: month_start.and_time(NaiveTime::MIN),
                end: tick_before(first_of_next_month(today).and_time(NaiveTime::MIN)),
            }
        }
        DashboardFilterType::LastMonth => DateRange {
            start: first_of_prev_month(today).and_time(NaiveTime::MIN),
            end: tick_before(first_of_month(today).and_time(NaiveTime::MIN)),
        },
        // Bordas custom são aceitas como vieram, sem normalização
        DashboardFilterType::Custom => DateRange {
            start: filter.start_date.unwrap_or(today_start),
            end: filter.end_date.unwrap_or_else(|| day_end(today)),
        },
    }
}

// Borda superior inclusiva: meia-noite do dia seguinte menos um "tick".
// Um tick aqui é 1µs, a resolução de TIMESTAMP no Postgres.
fn day_end(date: NaiveDate) -> NaiveDateTime {
    tick_before((date + Duration::days(1)).and_time(NaiveTime::MIN))
}

fn tick_before(instant: NaiveDateTime) -> NaiveDateTime {
    instant - Duration::microseconds(1)
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn first_of_next_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(date)
}

fn first_of_prev_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 1 {
        (date.year() - 1, 12)
    } else {
        (date.year(), date.month() - 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(date)
}

// --- Agregação (pura, sobre o snapshot já buscado) ---

// Receita realizada: só pedidos DELIVERED contam
fn sum_delivered_revenue(orders: &[Order]) -> Decimal {
    orders
        .iter()
        .filter(|o| o.order_status == OrderStatus::Delivered)
        .map(|o| o.total_amount)
        .sum()
}

// Clientes distintos da janela, qualquer status (assimetria herdada do
// comportamento original: receita é só de entregues, clientes não)
fn count_distinct_customers(orders: &[Order]) -> i64 {
    let customers: HashSet<_> = orders.iter().map(|o| o.customer_id).collect();
    customers.len() as i64
}

// Série diária de receita (entregues), ordenada por data ascendente.
// Dias sem pedido entregue são omitidos, não zerados.
fn build_daily_revenues(orders: &[Order]) -> Vec<DailyRevenueEntry> {
    let mut by_day: BTreeMap<NaiveDate, (Decimal, i64)> = BTreeMap::new();
    for order in orders {
        if order.order_status != OrderStatus::Delivered {
            continue;
        }
        let day = by_day
            .entry(order.created_at.date())
            .or_insert((Decimal::ZERO, 0));
        day.0 += order.total_amount;
        day.1 += 1;
    }

    by_day
        .into_iter()
        .map(|(date, (revenue, order_count))| DailyRevenueEntry {
            date,
            revenue,
            order_count,
        })
        .collect()
}

// Distribuição por status sobre todos os pedidos da janela, na ordem da
// primeira ocorrência de cada status no conjunto
fn build_status_stats(orders: &[Order]) -> Vec<OrderStatusEntry> {
    let total = orders.len() as i64;

    let mut counts: Vec<(OrderStatus, i64)> = Vec::new();
    for order in orders {
        match counts.iter_mut().find(|(s, _)| *s == order.order_status) {
            Some(entry) => entry.1 += 1,
            None => counts.push((order.order_status, 1)),
        }
    }

    counts
        .into_iter()
        .map(|(status, count)| OrderStatusEntry {
            status,
            count,
            // Guarda contra divisão por zero: janela vazia produz 0, não NaN
            percentage: if total > 0 {
                Decimal::from(count) / Decimal::from(total) * Decimal::ONE_HUNDRED
            } else {
                Decimal::ZERO
            },
        })
        .collect()
}
