//! Read-only views computed from mirror snapshots. Nothing here talks to a collection.
use crate::model::{Category, MenuItem, Order, OrderStatus};
use chrono::{DateTime, Datelike, TimeZone};
use serde::Serialize;

/// Orders the kitchen still has to deal with, in snapshot order.
pub fn active_queue(orders: &[Order]) -> Vec<&Order> {
    orders.iter().filter(|o| o.status.is_active()).collect()
}

/// Admin order-history filter. Empty search and `None` status match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryFilter {
    pub search: String,
    pub status: Option<OrderStatus>,
}

impl HistoryFilter {
    /// Case-insensitive search over token, student name and roll number.
    pub fn matches(&self, order: &Order) -> bool {
        if self.status.is_some_and(|s| s != order.status) {
            return false;
        }
        let needle = self.search.trim().to_lowercase();
        needle.is_empty()
            || [&order.token_number, &order.student_name, &order.roll_no]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
    }
}

pub fn history<'a>(orders: &'a [Order], filter: &HistoryFilter) -> Vec<&'a Order> {
    orders.iter().filter(|o| filter.matches(o)).collect()
}

/// One weekday's takings. Serialized as it is sent to the sales analyst.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueBucket {
    /// Short weekday name, `Mon` to `Sun`.
    pub name: String,
    pub revenue: f64,
    pub orders: u32,
}

/// Non-cancelled orders grouped by the weekday of their timestamp in `tz`.
///
/// Buckets come out in the order their weekday was first seen. Orders with a timestamp
/// outside chrono's range are skipped.
pub fn revenue_rollup<Tz: TimeZone>(orders: &[Order], tz: &Tz) -> Vec<RevenueBucket> {
    let mut buckets: Vec<RevenueBucket> = Vec::new();
    for order in orders.iter().filter(|o| o.status != OrderStatus::Cancelled) {
        let Some(at) = DateTime::from_timestamp_millis(order.timestamp) else {
            continue;
        };
        let day = at.with_timezone(tz).weekday().to_string();
        match buckets.iter_mut().find(|b| b.name == day) {
            Some(bucket) => {
                bucket.revenue += order.total_amount;
                bucket.orders += 1;
            }
            None => buckets.push(RevenueBucket {
                name: day,
                revenue: order.total_amount,
                orders: 1,
            }),
        }
    }
    buckets
}

/// Takings across all non-cancelled orders.
pub fn total_revenue(orders: &[Order]) -> f64 {
    orders
        .iter()
        .filter(|o| o.status != OrderStatus::Cancelled)
        .map(|o| o.total_amount)
        .sum()
}

/// Student menu filter. `category: None` is the "All" tab.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuFilter {
    pub category: Option<Category>,
    pub search: String,
    pub veg_only: bool,
}

impl MenuFilter {
    pub fn matches(&self, item: &MenuItem) -> bool {
        if self.category.is_some_and(|c| c != item.category) {
            return false;
        }
        if self.veg_only && !item.is_vegetarian() {
            return false;
        }
        let needle = self.search.trim().to_lowercase();
        needle.is_empty()
            || item.name.to_lowercase().contains(&needle)
            || item.description.to_lowercase().contains(&needle)
    }
}

pub fn filter_menu<'a>(menu: &'a [MenuItem], filter: &MenuFilter) -> Vec<&'a MenuItem> {
    menu.iter().filter(|i| filter.matches(i)).collect()
}

/// The three cards at the top of the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub revenue: f64,
    pub active_orders: usize,
    pub menu_items: usize,
}

pub fn dashboard_stats(orders: &[Order], menu: &[MenuItem]) -> DashboardStats {
    DashboardStats {
        revenue: total_revenue(orders),
        active_orders: active_queue(orders).len(),
        menu_items: menu.len(),
    }
}
