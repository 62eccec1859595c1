use bigdecimal::{BigDecimal, ToPrimitive};
use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};

use crate::domain::order::OrderStatus;

// ============================================================================
// Metrics Module - Prometheus metrics for store activity
// ============================================================================
//
// Provides metrics for:
// - Cart operations by kind
// - Orders placed and their value
// - Order status updates by target status
// - Current number of cart lines
//
// `render()` produces the Prometheus text exposition format.
// ============================================================================

pub struct StoreMetrics {
    registry: Registry,

    pub cart_operations: IntCounterVec,
    pub cart_lines: IntGauge,

    pub orders_placed: IntCounter,
    pub order_value: Histogram,
    pub order_status_updates: IntCounterVec,
}

impl StoreMetrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let cart_operations = IntCounterVec::new(
            Opts::new("cart_operations_total", "Total cart operations applied"),
            &["operation"],
        )?;
        registry.register(Box::new(cart_operations.clone()))?;

        let cart_lines = IntGauge::new("cart_lines", "Distinct items currently in the cart")?;
        registry.register(Box::new(cart_lines.clone()))?;

        let orders_placed = IntCounter::new("orders_placed_total", "Total orders placed")?;
        registry.register(Box::new(orders_placed.clone()))?;

        let order_value = Histogram::with_opts(
            HistogramOpts::new("order_value", "Order totals in currency units")
                .buckets(vec![100.0, 250.0, 500.0, 1000.0, 2000.0, 5000.0]),
        )?;
        registry.register(Box::new(order_value.clone()))?;

        let order_status_updates = IntCounterVec::new(
            Opts::new("order_status_updates_total", "Order status updates by new status"),
            &["status"],
        )?;
        registry.register(Box::new(order_status_updates.clone()))?;

        Ok(Self {
            registry,
            cart_operations,
            cart_lines,
            orders_placed,
            order_value,
            order_status_updates,
        })
    }

    pub fn record_cart_operation(&self, operation: &str, lines: usize) {
        self.cart_operations.with_label_values(&[operation]).inc();
        self.cart_lines.set(lines as i64);
    }

    pub fn record_order_placed(&self, total: &BigDecimal) {
        self.orders_placed.inc();
        self.order_value.observe(total.to_f64().unwrap_or(0.0));
        self.cart_lines.set(0);
    }

    pub fn record_status_update(&self, status: OrderStatus) {
        self.order_status_updates.with_label_values(&[status.as_str()]).inc();
    }

    /// Text exposition of every registered metric
    pub fn render(&self) -> anyhow::Result<String> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
