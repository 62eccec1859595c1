use std::env;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use restaurant_orders::config::ENV_MENU_PATH;
use restaurant_orders::domain::menu::{Category, MenuFilter};
use restaurant_orders::metrics::StoreMetrics;
use restaurant_orders::store::{parse_script, EventEnvelope, StoreError};
use restaurant_orders::{Catalog, OrderStore, StoreConfig, TrackingSimulator, TrackingTimeline};

const DEFAULT_MENU: &str = include_str!("../data/menu.json");
const DEFAULT_SESSION: &str = include_str!("../data/demo_session.json");

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Default to INFO level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,restaurant_orders=debug")),
        )
        .init();

    tracing::info!("🍛 Starting restaurant order session");

    // === 1. Configuration ===
    let config = StoreConfig::demo().with_overrides(|key| env::var(key).ok());
    tracing::info!(
        eta_min = config.eta_min_minutes,
        eta_max = config.eta_max_minutes,
        tracking_interval_ms = config.tracking_interval.as_millis() as u64,
        "Configuration loaded"
    );

    // === 2. Menu catalog ===
    let catalog = match env::var(ENV_MENU_PATH) {
        Ok(path) => {
            tracing::info!(path = %path, "Loading menu from file");
            Catalog::from_json(&std::fs::read_to_string(&path)?)?
        }
        Err(_) => Catalog::from_json(DEFAULT_MENU)?,
    };
    tracing::info!(items = catalog.len(), "📋 Menu loaded");

    for category in Category::ALL {
        let all = catalog.filter(&MenuFilter::default().category(category));
        let veg = catalog.filter(&MenuFilter::default().category(category).veg_only());
        tracing::info!(category = %category, items = all.len(), veg = veg.len(), "Menu section");
    }
    let popular: Vec<_> = catalog.popular().map(|item| item.name.as_str()).collect();
    tracing::info!(popular = ?popular, "Popular dishes");

    // === 3. Store with metrics and an event log ===
    let metrics = Arc::new(StoreMetrics::new()?);
    let mut store = OrderStore::new(config.clone()).with_metrics(metrics.clone());
    store.subscribe(|envelope: &EventEnvelope| {
        tracing::debug!(
            seq = envelope.sequence_number,
            event = ?envelope.event,
            "Store event"
        );
    });

    // === 4. Replay the session script ===
    let script = match env::args().nth(1) {
        Some(path) => std::fs::read_to_string(path)?,
        None => DEFAULT_SESSION.to_string(),
    };
    let commands = parse_script(&script)?;
    tracing::info!(commands = commands.len(), "▶️ Replaying session");

    let mut placed = None;
    for command in &commands {
        match command.execute(&mut store, &catalog) {
            Ok(outcome) => {
                if let Some(order_and_bill) = outcome.into_placed() {
                    placed = Some(order_and_bill);
                }
            }
            Err(err @ StoreError::Checkout(_)) => {
                tracing::warn!(error = %err, "Checkout refused, session continues");
            }
            Err(err) => return Err(err.into()),
        }
        tracing::debug!(
            lines = store.cart_lines().len(),
            units = store.item_count(),
            total = %config.format_price(store.cart_total()),
            cart_open = store.is_cart_open(),
            "Cart state"
        );
    }

    let Some((order, bill)) = placed else {
        tracing::warn!("Session ended without an order");
        println!("{}", metrics.render()?);
        return Ok(());
    };

    // === 5. Receipt ===
    tracing::info!(
        order_id = %order.id(),
        items = order.item_count(),
        total = %config.format_price(order.total()),
        eta_minutes = order.estimated_time(),
        "✅ Order placed"
    );
    match &bill {
        Some(bill) => tracing::info!(
            order_type = ?bill.order_type,
            subtotal = %config.format_price(&bill.subtotal),
            tax = %config.format_price(&bill.tax),
            delivery = %config.format_price(&bill.delivery_fee),
            total = %config.format_price(&bill.total),
            "🧾 Bill"
        ),
        None => tracing::info!("Order placed without checkout, no bill"),
    }

    // Order lookup the way the tracking page does it
    let order_id = store.lookup_order(&order.id().to_string())?.id();

    // === 6. Simulated tracking ===
    let mut timeline = TrackingTimeline::for_status(order.status());
    let simulator = TrackingSimulator::new(config.tracking_interval);
    tracing::info!(
        interval_ms = simulator.step_interval().as_millis() as u64,
        "Tracking order"
    );
    simulator
        .run(&mut timeline, |step| {
            tracing::info!(
                step = step.title(),
                detail = step.description(),
                progress = step.progress_percent(),
                "🚚 Tracking"
            );
            store.update_order_status(order_id, step.status());
        })
        .await;

    if let Some(current) = store.current_order() {
        tracing::info!(order_id = %current.id(), status = %current.status(), "🎉 Session complete");
    }

    // === 7. Metrics snapshot ===
    println!("{}", metrics.render()?);

    Ok(())
}
