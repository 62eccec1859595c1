use bigdecimal::BigDecimal;
use chrono::Utc;
use std::sync::Arc;

use super::events::{EventBus, EventEnvelope, Listener, StoreEvent, SubscriptionId};
use super::strategy::{EtaEstimator, OrderIdSource, RandomEta, TimestampIds};
use crate::config::StoreConfig;
use crate::domain::cart::{Cart, CartLine, QuantityChange};
use crate::domain::customer::{CustomerInfo, CustomerInfoUpdate};
use crate::domain::menu::{MenuItem, MenuItemId};
use crate::domain::order::{
    validate as validate_checkout, Bill, CheckoutError, Order, OrderError, OrderId, OrderStatus,
    OrderType, Receipt,
};
use crate::metrics::StoreMetrics;

// ============================================================================
// Order Store - single source of truth for one session
// ============================================================================
//
// Owns the cart, the cart-panel flag, the customer draft and every order
// placed so far. All fields are private so each mutation goes through an
// operation below and the cart total can never drift from the lines.
//
// Operations run synchronously to completion. After an effective change the
// store publishes one StoreEvent to its subscribers; no-ops publish nothing.
//
// ============================================================================

pub struct OrderStore {
    config: StoreConfig,
    cart: Cart,
    cart_open: bool,
    customer: CustomerInfo,
    orders: Vec<Order>,
    current_order: Option<OrderId>,

    ids: Box<dyn OrderIdSource>,
    eta: Box<dyn EtaEstimator>,
    events: EventBus,
    metrics: Option<Arc<StoreMetrics>>,
}

impl Default for OrderStore {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

impl OrderStore {
    pub fn new(config: StoreConfig) -> Self {
        let eta = RandomEta::new(config.eta_range());
        Self {
            config,
            cart: Cart::new(),
            cart_open: false,
            customer: CustomerInfo::default(),
            orders: Vec::new(),
            current_order: None,
            ids: Box::new(TimestampIds::default()),
            eta: Box::new(eta),
            events: EventBus::default(),
            metrics: None,
        }
    }

    pub fn with_id_source(mut self, ids: impl OrderIdSource + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    pub fn with_eta_estimator(mut self, eta: impl EtaEstimator + 'static) -> Self {
        self.eta = Box::new(eta);
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<StoreMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    // ------------------------------------------------------------------------
    // Cart operations
    // ------------------------------------------------------------------------

    /// Adds one unit of `item`, merging with an existing line for the same id
    pub fn add_to_cart(&mut self, item: &MenuItem) {
        let quantity = self.cart.add(item);
        tracing::debug!(item_id = item.id, quantity, total = %self.cart.total(), "Added to cart");

        self.record_cart_operation("add");
        self.events.publish(StoreEvent::ItemAdded {
            item_id: item.id,
            quantity,
        });
    }

    /// Removes the line for `id`; unknown ids are ignored
    pub fn remove_from_cart(&mut self, id: MenuItemId) {
        if !self.cart.remove(id) {
            tracing::debug!(item_id = id, "Remove ignored, item not in cart");
            return;
        }
        tracing::debug!(item_id = id, total = %self.cart.total(), "Removed from cart");

        self.record_cart_operation("remove");
        self.events.publish(StoreEvent::ItemRemoved { item_id: id });
    }

    /// Sets an absolute quantity. Zero or negative removes the line.
    pub fn update_quantity(&mut self, id: MenuItemId, quantity: i64) {
        match self.cart.set_quantity(id, quantity) {
            QuantityChange::Updated(quantity) => {
                tracing::debug!(item_id = id, quantity, total = %self.cart.total(), "Quantity updated");
                self.record_cart_operation("update_quantity");
                self.events.publish(StoreEvent::QuantityUpdated { item_id: id, quantity });
            }
            QuantityChange::Removed => {
                tracing::debug!(item_id = id, requested = quantity, "Quantity dropped to zero, line removed");
                self.record_cart_operation("remove");
                self.events.publish(StoreEvent::ItemRemoved { item_id: id });
            }
            QuantityChange::Unchanged => {
                tracing::debug!(item_id = id, requested = quantity, "Quantity update ignored");
            }
        }
    }

    /// Σ price × quantity over the current lines
    pub fn calculate_total(&self) -> BigDecimal {
        self.cart.calculate_total()
    }

    pub fn toggle_cart(&mut self) {
        self.cart_open = !self.cart_open;
        self.events.publish(StoreEvent::CartToggled {
            open: self.cart_open,
        });
    }

    /// Empties the cart. Orders and customer info are untouched.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
        tracing::debug!("Cart cleared");

        self.record_cart_operation("clear");
        self.events.publish(StoreEvent::CartCleared);
    }

    // ------------------------------------------------------------------------
    // Customer draft
    // ------------------------------------------------------------------------

    pub fn update_customer_info(&mut self, update: CustomerInfoUpdate) {
        if update.is_empty() {
            return;
        }
        self.customer.merge(update);
        self.events.publish(StoreEvent::CustomerInfoUpdated);
    }

    // ------------------------------------------------------------------------
    // Orders
    // ------------------------------------------------------------------------

    /// Snapshots the cart and customer into a new pending order, then empties
    /// the cart and closes the panel. Validation is the caller's job, see
    /// [`OrderStore::checkout`].
    pub fn place_order(&mut self) -> Order {
        if self.cart.is_empty() {
            tracing::warn!("Placing an order with an empty cart");
        }

        let now = Utc::now();
        let id = self.ids.next_id(now);
        let estimated_time = self.eta.estimate();
        let (items, total) = self.cart.take();

        let order = Order::new(id, items, total, self.customer.clone(), now, estimated_time);
        self.orders.push(order.clone());
        self.current_order = Some(id);
        self.cart_open = false;

        tracing::info!(
            order_id = %id,
            items = order.item_count(),
            total = %order.total(),
            eta_minutes = estimated_time,
            "Order placed"
        );

        if let Some(metrics) = &self.metrics {
            metrics.record_order_placed(order.total());
        }
        self.events.publish(StoreEvent::OrderPlaced { order_id: id });

        order
    }

    /// Validates the cart and customer, then places the order and bills it
    pub fn checkout(&mut self, order_type: OrderType) -> Result<Receipt, CheckoutError> {
        if let Err(err) = validate_checkout(&self.cart, &self.customer) {
            tracing::warn!(reason = %err, "Checkout rejected");
            return Err(err);
        }

        let bill = Bill::compute(self.cart.total(), order_type, &self.config);
        let order = self.place_order();
        Ok(Receipt { order, bill })
    }

    /// Replaces the status of the matching order; unknown ids are ignored
    pub fn update_order_status(&mut self, id: OrderId, status: OrderStatus) {
        let Some(order) = self.orders.iter_mut().find(|o| o.id() == id) else {
            tracing::debug!(order_id = %id, "Status update ignored, no such order");
            return;
        };

        let previous = order.status();
        order.set_status(status);
        tracing::info!(order_id = %id, from = %previous, to = %status, "Order status updated");

        if let Some(metrics) = &self.metrics {
            metrics.record_status_update(status);
        }
        self.events.publish(StoreEvent::OrderStatusUpdated { order_id: id, status });
    }

    pub fn find_order(&self, id: OrderId) -> Option<&Order> {
        self.orders.iter().find(|o| o.id() == id)
    }

    /// Resolves an id typed by the user
    pub fn lookup_order(&self, query: &str) -> Result<&Order, OrderError> {
        let id: OrderId = query.parse()?;
        self.find_order(id).ok_or(OrderError::NotFound(id))
    }

    // ------------------------------------------------------------------------
    // Observers
    // ------------------------------------------------------------------------

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&EventEnvelope) + Send + Sync + 'static,
    {
        let listener: Listener = Box::new(listener);
        let id = self.events.subscribe(listener);
        tracing::debug!(listeners = self.events.listener_count(), "Listener subscribed");
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    // ------------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------------

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn cart_lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    pub fn cart_total(&self) -> &BigDecimal {
        self.cart.total()
    }

    /// Units in the cart, the number shown on the cart badge
    pub fn item_count(&self) -> u64 {
        self.cart.item_count()
    }

    pub fn is_cart_open(&self) -> bool {
        self.cart_open
    }

    pub fn customer_info(&self) -> &CustomerInfo {
        &self.customer
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Most recently placed order, with its latest status
    pub fn current_order(&self) -> Option<&Order> {
        self.current_order.and_then(|id| self.find_order(id))
    }

    fn record_cart_operation(&self, operation: &str) {
        if let Some(metrics) = &self.metrics {
            metrics.record_cart_operation(operation, self.cart.lines().len());
        }
    }
}

impl std::fmt::Debug for OrderStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderStore")
            .field("cart", &self.cart)
            .field("cart_open", &self.cart_open)
            .field("customer", &self.customer)
            .field("orders", &self.orders.len())
            .field("current_order", &self.current_order)
            .field("events", &self.events)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::strategy::FixedEta;
    use crate::domain::menu::Category;
    use std::collections::HashMap;
    use std::sync::Mutex;

    fn dish(id: MenuItemId, price: u32) -> MenuItem {
        MenuItem {
            id,
            name: format!("Dish {}", id),
            description: String::new(),
            price: BigDecimal::from(price),
            category: Category::Mains,
            image: "🍛".to_string(),
            spice_level: 2,
            is_veg: false,
            popular: None,
        }
    }

    fn test_store() -> OrderStore {
        OrderStore::new(StoreConfig::default()).with_eta_estimator(FixedEta(30))
    }

    fn ready_customer() -> CustomerInfoUpdate {
        CustomerInfoUpdate::default()
            .name("John Doe")
            .phone("+91 98765 43210")
            .address("123 Main Street, Delhi")
    }

    fn recorded_events(store: &mut OrderStore) -> Arc<Mutex<Vec<StoreEvent>>> {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        store.subscribe(move |env: &EventEnvelope| sink.lock().unwrap().push(env.event.clone()));
        events
    }

    #[test]
    fn test_single_item_walkthrough() {
        let mut store = test_store();
        let item = dish(1, 100);

        store.add_to_cart(&item);
        store.add_to_cart(&item);
        assert_eq!(store.cart_lines().len(), 1);
        assert_eq!(store.cart_lines()[0].quantity, 2);
        assert_eq!(store.cart_total(), &BigDecimal::from(200));

        store.update_quantity(1, 5);
        assert_eq!(store.cart_lines()[0].quantity, 5);
        assert_eq!(store.cart_total(), &BigDecimal::from(500));

        store.remove_from_cart(1);
        assert!(store.cart_lines().is_empty());
        assert_eq!(store.cart_total(), &BigDecimal::from(0));
    }

    #[test]
    fn test_add_counts_match_calls_per_id() {
        let mut store = test_store();
        let sequence = [3, 1, 3, 2, 3, 1, 7];
        let mut expected: HashMap<MenuItemId, u32> = HashMap::new();

        for id in sequence {
            store.add_to_cart(&dish(id, 10 * id));
            *expected.entry(id).or_default() += 1;
        }

        assert_eq!(store.cart_lines().len(), expected.len());
        for line in store.cart_lines() {
            assert_eq!(line.quantity, expected[&line.id()]);
        }
        assert_eq!(store.item_count(), sequence.len() as u64);
    }

    #[test]
    fn test_total_tracks_every_mutation() {
        let mut store = test_store();
        let check = |store: &OrderStore| {
            assert_eq!(store.cart_total(), &store.calculate_total());
        };

        store.add_to_cart(&dish(1, 280));
        check(&store);
        store.add_to_cart(&dish(2, 320));
        check(&store);
        store.update_quantity(2, 4);
        check(&store);
        store.remove_from_cart(1);
        check(&store);
        store.update_quantity(2, -1);
        check(&store);
        store.clear_cart();
        check(&store);

        assert_eq!(store.cart_total(), &BigDecimal::from(0));
    }

    #[test]
    fn test_update_quantity_non_positive_removes() {
        let mut store = test_store();
        store.add_to_cart(&dish(1, 100));
        store.add_to_cart(&dish(2, 100));

        store.update_quantity(1, 0);
        store.update_quantity(2, -5);

        assert!(store.cart_lines().is_empty());
        assert_eq!(store.cart_total(), &BigDecimal::from(0));
    }

    #[test]
    fn test_unknown_ids_are_noops() {
        let mut store = test_store();
        store.add_to_cart(&dish(1, 100));
        let events = recorded_events(&mut store);

        store.remove_from_cart(99);
        store.update_quantity(99, 3);
        store.update_order_status(OrderId(12345), OrderStatus::Delivered);

        assert_eq!(store.cart_lines().len(), 1);
        assert!(store.orders().is_empty());
        assert!(events.lock().unwrap().is_empty());
    }

    #[test]
    fn test_toggle_cart_leaves_contents_alone() {
        let mut store = test_store();
        store.add_to_cart(&dish(1, 100));

        assert!(!store.is_cart_open());
        store.toggle_cart();
        assert!(store.is_cart_open());
        store.toggle_cart();
        assert!(!store.is_cart_open());

        assert_eq!(store.cart_lines().len(), 1);
    }

    #[test]
    fn test_clear_cart_keeps_orders_and_customer() {
        let mut store = test_store();
        store.update_customer_info(ready_customer());
        store.add_to_cart(&dish(1, 100));
        store.place_order();
        store.add_to_cart(&dish(2, 50));

        store.clear_cart();

        assert!(store.cart_lines().is_empty());
        assert_eq!(store.orders().len(), 1);
        assert_eq!(store.customer_info().name, "John Doe");
    }

    #[test]
    fn test_update_customer_info_merges() {
        let mut store = test_store();
        store.update_customer_info(CustomerInfoUpdate::default().name("Asha"));
        store.update_customer_info(CustomerInfoUpdate::default().table_number("12"));

        let info = store.customer_info();
        assert_eq!(info.name, "Asha");
        assert_eq!(info.table_number, "12");
        assert_eq!(info.phone, "");
    }

    #[test]
    fn test_place_order_snapshots_and_clears() {
        let mut store = test_store();
        store.update_customer_info(ready_customer());
        store.add_to_cart(&dish(4, 450));
        store.add_to_cart(&dish(10, 80));
        store.add_to_cart(&dish(10, 80));
        store.toggle_cart();

        let lines_before = store.cart_lines().to_vec();
        let total_before = store.cart_total().clone();

        let order = store.place_order();

        assert_eq!(order.items(), lines_before.as_slice());
        assert_eq!(order.total(), &total_before);
        assert_eq!(order.total(), &BigDecimal::from(610));
        assert_eq!(order.status(), OrderStatus::Pending);
        assert_eq!(order.estimated_time(), 30);
        assert_eq!(order.customer().name, "John Doe");

        assert!(store.cart_lines().is_empty());
        assert_eq!(store.cart_total(), &BigDecimal::from(0));
        assert!(!store.is_cart_open());
        assert_eq!(store.orders().len(), 1);
        assert_eq!(store.current_order().map(Order::id), Some(order.id()));
    }

    #[test]
    fn test_order_snapshot_ignores_later_customer_edits() {
        let mut store = test_store();
        store.update_customer_info(ready_customer());
        store.add_to_cart(&dish(1, 100));
        let order = store.place_order();

        store.update_customer_info(CustomerInfoUpdate::default().name("Someone Else"));

        let stored = store.find_order(order.id()).unwrap();
        assert_eq!(stored.customer().name, "John Doe");
    }

    #[test]
    fn test_order_ids_are_unique() {
        let mut store = test_store();
        let mut ids = Vec::new();
        for _ in 0..20 {
            store.add_to_cart(&dish(1, 100));
            ids.push(store.place_order().id());
        }

        let mut deduped = ids.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), ids.len());
        assert_eq!(store.current_order().map(Order::id), ids.last().copied());
    }

    #[test]
    fn test_random_eta_within_configured_range() {
        let mut store = OrderStore::default();
        for _ in 0..50 {
            store.add_to_cart(&dish(1, 100));
            let eta = store.place_order().estimated_time();
            assert!((15..=45).contains(&eta));
        }
    }

    #[test]
    fn test_place_order_with_inverted_eta_config() {
        let config = StoreConfig {
            eta_min_minutes: 45,
            eta_max_minutes: 15,
            ..StoreConfig::default()
        };
        let mut store = OrderStore::new(config);
        store.add_to_cart(&dish(1, 100));

        let order = store.place_order();
        assert!((15..=45).contains(&order.estimated_time()));
    }

    #[test]
    fn test_update_order_status() {
        let mut store = test_store();
        store.add_to_cart(&dish(1, 100));
        let first = store.place_order().id();
        store.add_to_cart(&dish(2, 100));
        let second = store.place_order().id();

        store.update_order_status(first, OrderStatus::Preparing);

        assert_eq!(store.find_order(first).unwrap().status(), OrderStatus::Preparing);
        assert_eq!(store.find_order(second).unwrap().status(), OrderStatus::Pending);
    }

    #[test]
    fn test_update_status_of_missing_order_leaves_list_unchanged() {
        let mut store = test_store();
        store.add_to_cart(&dish(1, 100));
        store.place_order();
        let before = store.orders().to_vec();

        store.update_order_status(OrderId(1), OrderStatus::Delivered);

        assert_eq!(store.orders(), before.as_slice());
    }

    #[test]
    fn test_current_order_reflects_status_changes() {
        let mut store = test_store();
        store.add_to_cart(&dish(1, 100));
        let id = store.place_order().id();

        store.update_order_status(id, OrderStatus::OutForDelivery);

        assert_eq!(store.current_order().unwrap().status(), OrderStatus::OutForDelivery);
    }

    #[test]
    fn test_checkout_rejections_leave_state_untouched() {
        let mut store = test_store();
        assert_eq!(store.checkout(OrderType::Delivery), Err(CheckoutError::EmptyCart));

        store.add_to_cart(&dish(1, 100));
        assert_eq!(store.checkout(OrderType::Delivery), Err(CheckoutError::MissingName));

        store.update_customer_info(CustomerInfoUpdate::default().name("Asha"));
        assert_eq!(store.checkout(OrderType::Pickup), Err(CheckoutError::MissingPhone));

        assert_eq!(store.cart_lines().len(), 1);
        assert!(store.orders().is_empty());
    }

    #[test]
    fn test_checkout_places_and_bills() {
        let mut store = test_store();
        store.update_customer_info(ready_customer());
        store.add_to_cart(&dish(4, 450));
        store.add_to_cart(&dish(10, 80));
        store.update_quantity(10, 2);

        let receipt = store.checkout(OrderType::Delivery).unwrap();

        assert_eq!(receipt.bill.subtotal, BigDecimal::from(610));
        assert_eq!(receipt.bill.total, "680.50".parse::<BigDecimal>().unwrap());
        assert_eq!(receipt.order.total(), &BigDecimal::from(610));
        assert!(store.cart_lines().is_empty());
        assert_eq!(store.orders().len(), 1);
    }

    #[test]
    fn test_lookup_order() {
        let mut store = test_store();
        store.add_to_cart(&dish(1, 100));
        let id = store.place_order().id();

        assert_eq!(store.lookup_order(&id.to_string()).unwrap().id(), id);
        assert_eq!(
            store.lookup_order("42").unwrap_err(),
            OrderError::NotFound(OrderId(42))
        );
        assert!(matches!(
            store.lookup_order("ORD-1"),
            Err(OrderError::InvalidOrderId(_))
        ));
    }

    #[test]
    fn test_events_published_for_effective_changes() {
        let mut store = test_store();
        let events = recorded_events(&mut store);

        store.add_to_cart(&dish(1, 100));
        store.add_to_cart(&dish(1, 100));
        store.update_quantity(1, 3);
        store.add_to_cart(&dish(2, 50));
        store.remove_from_cart(2);
        store.add_to_cart(&dish(3, 70));
        store.update_quantity(3, 0);
        store.add_to_cart(&dish(4, 90));
        store.clear_cart();
        store.add_to_cart(&dish(1, 100));
        store.toggle_cart();
        store.update_customer_info(CustomerInfoUpdate::default());
        store.update_customer_info(CustomerInfoUpdate::default().name("Asha"));
        let id = store.place_order().id();
        store.update_order_status(id, OrderStatus::Confirmed);

        assert_eq!(
            *events.lock().unwrap(),
            vec![
                StoreEvent::ItemAdded { item_id: 1, quantity: 1 },
                StoreEvent::ItemAdded { item_id: 1, quantity: 2 },
                StoreEvent::QuantityUpdated { item_id: 1, quantity: 3 },
                StoreEvent::ItemAdded { item_id: 2, quantity: 1 },
                StoreEvent::ItemRemoved { item_id: 2 },
                StoreEvent::ItemAdded { item_id: 3, quantity: 1 },
                StoreEvent::ItemRemoved { item_id: 3 },
                StoreEvent::ItemAdded { item_id: 4, quantity: 1 },
                StoreEvent::CartCleared,
                StoreEvent::ItemAdded { item_id: 1, quantity: 1 },
                StoreEvent::CartToggled { open: true },
                StoreEvent::CustomerInfoUpdated,
                StoreEvent::OrderPlaced { order_id: id },
                StoreEvent::OrderStatusUpdated { order_id: id, status: OrderStatus::Confirmed },
            ]
        );
    }

    #[test]
    fn test_metrics_follow_store_activity() {
        let metrics = Arc::new(StoreMetrics::new().unwrap());
        let mut store = test_store().with_metrics(metrics.clone());

        store.add_to_cart(&dish(1, 100));
        store.add_to_cart(&dish(2, 100));
        let id = store.place_order().id();
        store.update_order_status(id, OrderStatus::Delivered);

        assert_eq!(metrics.orders_placed.get(), 1);
        assert_eq!(metrics.cart_operations.with_label_values(&["add"]).get(), 2);
        assert_eq!(metrics.order_status_updates.with_label_values(&["delivered"]).get(), 1);
        assert_eq!(metrics.cart_lines.get(), 0);
    }
}
