use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::catalog::StockLedger;
use crate::metrics::Metrics;
use crate::notify::{self, Mailer, OrderConfirmationMail};
use crate::store::{CartBackend, OrderStore, Session};

use super::errors::OrderError;
use super::model::{Order, OrderItem, TrackingEntry};
use super::value_objects::{Address, CustomBouquet, MoneyBreakdown, OrderStatus, PaymentStatus};

// ============================================================================
// Order Workflow Engine
// ============================================================================
//
// Orchestrates placement: stock verification -> order + items -> stock
// decrement -> tracking entry -> cart clear -> detached confirmation email.
//
// All validation happens before the first write, so a rejected request
// leaves no state behind. The single compensating action is the deletion
// of the order row when item creation fails after it.
//
// ============================================================================

/// One requested line: either a catalog product or a bespoke bouquet
/// carrying its own price and configuration.
///
/// Catalog lines never carry a client price: the unit price is always
/// snapshotted from the fetched product, and a `unit_price` field sent
/// alongside a `product_id` is dropped during deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestedItem {
    Catalog {
        product_id: Uuid,
        quantity: u32,
    },
    Custom {
        name: String,
        quantity: u32,
        unit_price: Decimal,
        #[serde(default)]
        config: Option<CustomBouquet>,
    },
}

impl RequestedItem {
    pub fn quantity(&self) -> u32 {
        match self {
            RequestedItem::Catalog { quantity, .. } => *quantity,
            RequestedItem::Custom { quantity, .. } => *quantity,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceOrderRequest {
    pub items: Vec<RequestedItem>,
    pub delivery_address: Address,
    #[serde(default)]
    pub billing_address: Option<Address>,
    #[serde(default)]
    pub delivery_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub delivery_time_slot: Option<String>,
    #[serde(default)]
    pub gift_message: Option<String>,
    #[serde(default)]
    pub special_instructions: Option<String>,
    pub totals: MoneyBreakdown,
    pub payment_method: String,
    pub customer_email: String,
    pub customer_name: String,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "USD".to_string()
}

#[derive(Debug, Clone, Serialize)]
pub struct PlacedOrder {
    pub order_id: Uuid,
    pub order_number: String,
}

pub struct OrderWorkflowEngine {
    orders: Arc<dyn OrderStore>,
    ledger: StockLedger,
    carts: Arc<dyn CartBackend>,
    mailer: Arc<dyn Mailer>,
    metrics: Arc<Metrics>,
}

impl OrderWorkflowEngine {
    pub fn new(
        orders: Arc<dyn OrderStore>,
        ledger: StockLedger,
        carts: Arc<dyn CartBackend>,
        mailer: Arc<dyn Mailer>,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            orders,
            ledger,
            carts,
            mailer,
            metrics,
        }
    }

    /// Attempt to place an order for the authenticated user. Payment capture
    /// is assumed to have already happened upstream.
    pub async fn place_order(
        &self,
        session: &Session,
        request: PlaceOrderRequest,
    ) -> Result<PlacedOrder, OrderError> {
        let result = self.try_place(session, request).await;
        match &result {
            Ok(placed) => {
                self.metrics.record_order_placed();
                tracing::info!(
                    order_id = %placed.order_id,
                    order_number = %placed.order_number,
                    user_id = %session.user_id,
                    "✅ Order placed"
                );
            }
            Err(err) => {
                self.metrics.record_order_failed(err.kind());
                tracing::warn!(user_id = %session.user_id, error = %err, "Order placement failed");
            }
        }
        result
    }

    async fn try_place(
        &self,
        session: &Session,
        request: PlaceOrderRequest,
    ) -> Result<PlacedOrder, OrderError> {
        if request.items.is_empty() {
            return Err(OrderError::EmptyOrder);
        }
        if let Some(item) = request.items.iter().find(|i| i.quantity() == 0) {
            return Err(OrderError::InvalidQuantity(item.quantity()));
        }

        // Batch stock verification: the whole request fails before any write
        // if a product is missing or short.
        let catalog_ids: Vec<Uuid> = request
            .items
            .iter()
            .filter_map(|i| match i {
                RequestedItem::Catalog { product_id, .. } => Some(*product_id),
                RequestedItem::Custom { .. } => None,
            })
            .collect();
        let products = self.ledger.fetch(&catalog_ids).await?;

        for item in &request.items {
            if let RequestedItem::Catalog { product_id, quantity } = item {
                let product = products
                    .get(product_id)
                    .ok_or(OrderError::ProductNotFound(*product_id))?;
                if *quantity > product.stock_quantity {
                    return Err(OrderError::InsufficientStock {
                        product_id: *product_id,
                        requested: *quantity,
                        available: product.stock_quantity,
                    });
                }
            }
        }

        if request.totals.has_negative_component() {
            return Err(OrderError::NegativeAmount);
        }
        if !request.totals.is_consistent() {
            return Err(OrderError::TotalMismatch {
                stated: request.totals.total,
                computed: request.totals.computed_total(),
            });
        }

        // Items must sum to the stated subtotal within rounding tolerance.
        let items_sum: Decimal = request
            .items
            .iter()
            .map(|item| match item {
                RequestedItem::Catalog { product_id, quantity } => {
                    products[product_id].price * Decimal::from(*quantity)
                }
                RequestedItem::Custom { unit_price, quantity, .. } => {
                    *unit_price * Decimal::from(*quantity)
                }
            })
            .sum();
        if (items_sum - request.totals.subtotal).abs() > MoneyBreakdown::TOLERANCE {
            return Err(OrderError::TotalMismatch {
                stated: request.totals.subtotal,
                computed: items_sum,
            });
        }

        let now = Utc::now();
        let order_id = Uuid::new_v4();
        let order_number = generate_order_number(now);
        let estimated_delivery = request.delivery_date.unwrap_or(now + Duration::days(3));

        let order = Order {
            id: order_id,
            order_number: order_number.clone(),
            user_id: session.user_id,
            status: OrderStatus::Confirmed,
            payment_status: PaymentStatus::Paid,
            payment_method: request.payment_method.clone(),
            delivery_address: request.delivery_address.clone(),
            billing_address: request.billing_address.clone(),
            delivery_date: request.delivery_date,
            delivery_time_slot: request.delivery_time_slot.clone(),
            gift_message: request.gift_message.clone(),
            special_instructions: request.special_instructions.clone(),
            totals: request.totals.clone(),
            currency: request.currency.clone(),
            tracking_number: None,
            estimated_delivery,
            delivered_at: None,
            created_at: now,
            updated_at: now,
        };
        self.orders.insert_order(order).await?;

        // Snapshot prices onto the line items; later catalog changes must
        // never retroactively affect this order.
        let items: Vec<OrderItem> = request
            .items
            .iter()
            .map(|item| match item {
                RequestedItem::Catalog { product_id, quantity } => {
                    let product = &products[product_id];
                    OrderItem {
                        id: Uuid::new_v4(),
                        order_id,
                        product_id: Some(*product_id),
                        name: product.name.clone(),
                        quantity: *quantity,
                        unit_price: product.price,
                        line_total: product.price * Decimal::from(*quantity),
                        custom: None,
                    }
                }
                RequestedItem::Custom {
                    name,
                    quantity,
                    unit_price,
                    config,
                } => OrderItem {
                    id: Uuid::new_v4(),
                    order_id,
                    product_id: None,
                    name: name.clone(),
                    quantity: *quantity,
                    unit_price: *unit_price,
                    line_total: *unit_price * Decimal::from(*quantity),
                    custom: config.clone(),
                },
            })
            .collect();

        if let Err(err) = self.orders.insert_items(items).await {
            // Compensating rollback: no orphan order without items.
            tracing::error!(order_id = %order_id, error = %err, "Item creation failed, rolling back order");
            if let Err(rollback_err) = self.orders.delete_order(order_id).await {
                tracing::error!(order_id = %order_id, error = %rollback_err, "Rollback of orphan order failed");
            }
            return Err(OrderError::Persistence(err.to_string()));
        }

        // Best-effort stock accounting: the committed order takes precedence
        // over a failed decrement.
        for item in &request.items {
            if let RequestedItem::Catalog { product_id, quantity } = item {
                if let Err(err) = self.ledger.decrement(*product_id, *quantity).await {
                    tracing::warn!(product_id = %product_id, error = %err, "Stock decrement failed");
                }
            }
        }

        let entry = TrackingEntry::new(
            order_id,
            OrderStatus::Confirmed.as_str(),
            OrderStatus::Confirmed.default_description(),
            Some(session.user_id),
        );
        if let Err(err) = self.orders.append_tracking(entry).await {
            tracing::error!(order_id = %order_id, error = %err, "Tracking entry write failed; order persists");
            return Err(OrderError::Persistence(err.to_string()));
        }

        // Cart is authoritatively cleared regardless of how its lines map to
        // the order.
        if let Err(err) = self.carts.clear_cart(session.user_id).await {
            tracing::warn!(user_id = %session.user_id, error = %err, "Cart clear failed after placement");
        }

        notify::send_detached(
            self.mailer.clone(),
            OrderConfirmationMail {
                to: request.customer_email,
                customer_name: request.customer_name,
                order_number: order_number.clone(),
                total: request.totals.total,
                currency: request.currency,
            },
            self.metrics.clone(),
        );

        Ok(PlacedOrder {
            order_id,
            order_number,
        })
    }
}

/// Time-based number with a random suffix drawn from an unambiguous
/// alphabet. Collisions are treated as negligible; the suffix exists to
/// deter enumeration by customers.
fn generate_order_number(now: DateTime<Utc>) -> String {
    use rand::Rng;

    const ALPHABET: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ23456789";
    let mut rng = rand::thread_rng();
    let suffix: String = (0..6)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect();

    format!("BLM-{}-{}", now.format("%Y%m%d"), suffix)
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::Product;
    use crate::domain::order::value_objects::Role;
    use crate::notify::LogMailer;
    use crate::store::{MemoryBackend, ProductStore};
    use async_trait::async_trait;
    use rust_decimal_macros::dec;

    fn address() -> Address {
        Address {
            name: "Alice Smith".to_string(),
            line1: "12 Garden Lane".to_string(),
            line2: None,
            city: "Portland".to_string(),
            state: "OR".to_string(),
            postal_code: "97201".to_string(),
            country: "US".to_string(),
            phone: Some("555-0101".to_string()),
        }
    }

    fn breakdown(subtotal: Decimal, tax: Decimal) -> MoneyBreakdown {
        MoneyBreakdown {
            subtotal,
            tax,
            shipping: dec!(0.00),
            discount: dec!(0.00),
            total: subtotal + tax,
        }
    }

    fn request(items: Vec<RequestedItem>, totals: MoneyBreakdown) -> PlaceOrderRequest {
        PlaceOrderRequest {
            items,
            delivery_address: address(),
            billing_address: None,
            delivery_date: None,
            delivery_time_slot: None,
            gift_message: None,
            special_instructions: None,
            totals,
            payment_method: "card".to_string(),
            customer_email: "alice@example.com".to_string(),
            customer_name: "Alice Smith".to_string(),
            currency: "USD".to_string(),
        }
    }

    fn customer() -> Session {
        Session {
            user_id: Uuid::new_v4(),
            role: Role::Customer,
        }
    }

    fn engine(backend: Arc<MemoryBackend>) -> OrderWorkflowEngine {
        OrderWorkflowEngine::new(
            backend.clone(),
            StockLedger::new(backend.clone()),
            backend,
            Arc::new(LogMailer),
            Arc::new(Metrics::new().unwrap()),
        )
    }

    async fn seed_product(backend: &MemoryBackend, price: Decimal, stock: u32) -> Uuid {
        let product = Product::new("Bouquet", price, "mixed", stock);
        let id = product.id;
        backend.insert_product(product).await.unwrap();
        id
    }

    #[tokio::test]
    async fn test_scenario_a_two_items_succeed() {
        let backend = Arc::new(MemoryBackend::new());
        let p1 = seed_product(&backend, dec!(10.00), 5).await;
        let p2 = seed_product(&backend, dec!(15.00), 3).await;
        let engine = engine(backend.clone());
        let session = customer();

        let placed = engine
            .place_order(
                &session,
                request(
                    vec![
                        RequestedItem::Catalog { product_id: p1, quantity: 2 },
                        RequestedItem::Catalog { product_id: p2, quantity: 1 },
                    ],
                    breakdown(dec!(35.00), dec!(3.50)),
                ),
            )
            .await
            .unwrap();

        let order = backend.get_order(placed.order_id).await.unwrap().unwrap();
        assert_eq!(order.status, OrderStatus::Confirmed);
        assert_eq!(order.payment_status, PaymentStatus::Paid);
        assert_eq!(order.totals.total, dec!(38.50));
        assert_eq!(order.order_number, placed.order_number);

        let items = backend.items_for_order(placed.order_id).await.unwrap();
        assert_eq!(items.len(), 2);

        assert_eq!(backend.get_product(p1).await.unwrap().unwrap().stock_quantity, 3);
        assert_eq!(backend.get_product(p2).await.unwrap().unwrap().stock_quantity, 2);

        let tracking = backend.tracking_for_order(placed.order_id).await.unwrap();
        assert_eq!(tracking.len(), 1);
        assert_eq!(tracking[0].status, "confirmed");
    }

    #[tokio::test]
    async fn test_scenario_b_insufficient_stock_is_atomic() {
        let backend = Arc::new(MemoryBackend::new());
        let p1 = seed_product(&backend, dec!(10.00), 2).await;
        let engine = engine(backend.clone());
        let session = customer();

        let err = engine
            .place_order(
                &session,
                request(
                    vec![RequestedItem::Catalog { product_id: p1, quantity: 5 }],
                    breakdown(dec!(50.00), dec!(0.00)),
                ),
            )
            .await
            .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("Insufficient stock"));
        assert!(message.contains("Available: 2"));

        // Atomic failure: nothing persisted, stock untouched.
        assert_eq!(backend.get_product(p1).await.unwrap().unwrap().stock_quantity, 2);
        assert!(matches!(err, OrderError::InsufficientStock { available: 2, .. }));
    }

    #[tokio::test]
    async fn test_cart_cleared_after_placement() {
        use crate::domain::cart::CartItem;

        let backend = Arc::new(MemoryBackend::new());
        let p1 = seed_product(&backend, dec!(20.00), 4).await;
        let engine = engine(backend.clone());
        let session = customer();

        backend
            .add_cart_item(
                session.user_id,
                CartItem::for_product(p1, "Bouquet", 1, dec!(20.00)),
            )
            .await
            .unwrap();

        engine
            .place_order(
                &session,
                request(
                    vec![RequestedItem::Catalog { product_id: p1, quantity: 1 }],
                    breakdown(dec!(20.00), dec!(2.00)),
                ),
            )
            .await
            .unwrap();

        assert!(backend.cart_items(session.user_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_order_rejected() {
        let backend = Arc::new(MemoryBackend::new());
        let engine = engine(backend);
        let err = engine
            .place_order(&customer(), request(vec![], breakdown(dec!(0), dec!(0))))
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::EmptyOrder));
    }

    #[tokio::test]
    async fn test_unknown_product_rejected_before_any_write() {
        let backend = Arc::new(MemoryBackend::new());
        let engine = engine(backend.clone());
        let missing = Uuid::new_v4();

        let err = engine
            .place_order(
                &customer(),
                request(
                    vec![RequestedItem::Catalog { product_id: missing, quantity: 1 }],
                    breakdown(dec!(10.00), dec!(0.00)),
                ),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, OrderError::ProductNotFound(id) if id == missing));
    }

    #[tokio::test]
    async fn test_total_mismatch_rejected() {
        let backend = Arc::new(MemoryBackend::new());
        let p1 = seed_product(&backend, dec!(10.00), 5).await;
        let engine = engine(backend);

        let mut totals = breakdown(dec!(10.00), dec!(1.00));
        totals.total = dec!(99.00);

        let err = engine
            .place_order(
                &customer(),
                request(vec![RequestedItem::Catalog { product_id: p1, quantity: 1 }], totals),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::TotalMismatch { .. }));
    }

    #[tokio::test]
    async fn test_items_sum_must_match_subtotal() {
        let backend = Arc::new(MemoryBackend::new());
        let p1 = seed_product(&backend, dec!(10.00), 5).await;
        let engine = engine(backend);

        // Consistent breakdown, but the line items only add up to 10.00.
        let err = engine
            .place_order(
                &customer(),
                request(
                    vec![RequestedItem::Catalog { product_id: p1, quantity: 1 }],
                    breakdown(dec!(25.00), dec!(0.00)),
                ),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::TotalMismatch { .. }));
    }

    #[tokio::test]
    async fn test_custom_bouquet_snapshots_payload_price() {
        let backend = Arc::new(MemoryBackend::new());
        let engine = engine(backend.clone());
        let session = customer();

        let placed = engine
            .place_order(
                &session,
                request(
                    vec![RequestedItem::Custom {
                        name: "Birthday special".to_string(),
                        quantity: 1,
                        unit_price: dec!(62.00),
                        config: Some(CustomBouquet {
                            wrap: Some("kraft".to_string()),
                            ribbon: Some("red".to_string()),
                            card_message: Some("Happy birthday!".to_string()),
                        }),
                    }],
                    breakdown(dec!(62.00), dec!(6.20)),
                ),
            )
            .await
            .unwrap();

        let items = backend.items_for_order(placed.order_id).await.unwrap();
        assert_eq!(items.len(), 1);
        assert!(items[0].product_id.is_none());
        assert_eq!(items[0].unit_price, dec!(62.00));
        assert!(items[0].custom.is_some());
    }

    #[tokio::test]
    async fn test_estimated_delivery_defaults_to_three_days() {
        let backend = Arc::new(MemoryBackend::new());
        let p1 = seed_product(&backend, dec!(10.00), 5).await;
        let engine = engine(backend.clone());

        let placed = engine
            .place_order(
                &customer(),
                request(
                    vec![RequestedItem::Catalog { product_id: p1, quantity: 1 }],
                    breakdown(dec!(10.00), dec!(0.00)),
                ),
            )
            .await
            .unwrap();

        let order = backend.get_order(placed.order_id).await.unwrap().unwrap();
        let days = (order.estimated_delivery - order.created_at).num_days();
        assert_eq!(days, 3);
        assert!(order.delivery_date.is_none());
    }

    #[tokio::test]
    async fn test_mailer_failure_does_not_fail_the_order() {
        struct FailingMailer;

        #[async_trait]
        impl Mailer for FailingMailer {
            async fn send_order_confirmation(&self, _: &OrderConfirmationMail) -> anyhow::Result<()> {
                anyhow::bail!("smtp down")
            }
        }

        let backend = Arc::new(MemoryBackend::new());
        let p1 = seed_product(&backend, dec!(10.00), 5).await;
        let engine = OrderWorkflowEngine::new(
            backend.clone(),
            StockLedger::new(backend.clone()),
            backend.clone(),
            Arc::new(FailingMailer),
            Arc::new(Metrics::new().unwrap()),
        );

        let placed = engine
            .place_order(
                &customer(),
                request(
                    vec![RequestedItem::Catalog { product_id: p1, quantity: 1 }],
                    breakdown(dec!(10.00), dec!(1.00)),
                ),
            )
            .await
            .unwrap();

        assert!(backend.get_order(placed.order_id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_item_write_failure_rolls_back_order() {
        struct ItemsFail {
            inner: Arc<MemoryBackend>,
        }

        #[async_trait]
        impl OrderStore for ItemsFail {
            async fn insert_order(&self, order: Order) -> anyhow::Result<()> {
                self.inner.insert_order(order).await
            }
            async fn insert_items(&self, _: Vec<OrderItem>) -> anyhow::Result<()> {
                anyhow::bail!("item table unavailable")
            }
            async fn update_order(&self, order: Order) -> anyhow::Result<()> {
                self.inner.update_order(order).await
            }
            async fn delete_order(&self, id: Uuid) -> anyhow::Result<()> {
                self.inner.delete_order(id).await
            }
            async fn get_order(&self, id: Uuid) -> anyhow::Result<Option<Order>> {
                self.inner.get_order(id).await
            }
            async fn items_for_order(&self, id: Uuid) -> anyhow::Result<Vec<OrderItem>> {
                self.inner.items_for_order(id).await
            }
            async fn append_tracking(&self, entry: TrackingEntry) -> anyhow::Result<()> {
                self.inner.append_tracking(entry).await
            }
            async fn tracking_for_order(&self, id: Uuid) -> anyhow::Result<Vec<TrackingEntry>> {
                self.inner.tracking_for_order(id).await
            }
        }

        let backend = Arc::new(MemoryBackend::new());
        let p1 = seed_product(&backend, dec!(10.00), 5).await;
        let engine = OrderWorkflowEngine::new(
            Arc::new(ItemsFail { inner: backend.clone() }),
            StockLedger::new(backend.clone()),
            backend.clone(),
            Arc::new(LogMailer),
            Arc::new(Metrics::new().unwrap()),
        );

        let err = engine
            .place_order(
                &customer(),
                request(
                    vec![RequestedItem::Catalog { product_id: p1, quantity: 1 }],
                    breakdown(dec!(10.00), dec!(0.00)),
                ),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, OrderError::Persistence(_)));
        // No orphan order without items may persist.
        assert_eq!(backend.order_count().await, 0);
        // Stock untouched: decrement happens after item creation.
        assert_eq!(backend.get_product(p1).await.unwrap().unwrap().stock_quantity, 5);
    }

    #[test]
    fn test_order_number_shape() {
        let now = Utc::now();
        let number = generate_order_number(now);
        let parts: Vec<&str> = number.split('-').collect();
        assert_eq!(parts[0], "BLM");
        assert_eq!(parts[1], now.format("%Y%m%d").to_string());
        assert_eq!(parts[2].len(), 6);
        assert!(parts[2].chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[tokio::test]
    async fn test_catalog_lines_ignore_client_supplied_prices() {
        let backend = Arc::new(MemoryBackend::new());
        let p1 = seed_product(&backend, dec!(10.00), 5).await;
        let engine = engine(backend.clone());

        // A catalog line with a bogus unit_price still parses as Catalog and
        // the field is dropped; the order snapshots the catalog price.
        let item: RequestedItem = serde_json::from_str(&format!(
            r#"{{"product_id":"{p1}","quantity":2,"unit_price":"0.01"}}"#
        ))
        .unwrap();
        assert!(matches!(item, RequestedItem::Catalog { quantity: 2, .. }));

        let placed = engine
            .place_order(&customer(), request(vec![item], breakdown(dec!(20.00), dec!(2.00))))
            .await
            .unwrap();

        let items = backend.items_for_order(placed.order_id).await.unwrap();
        assert_eq!(items[0].unit_price, dec!(10.00));
        assert_eq!(items[0].line_total, dec!(20.00));
    }

    #[test]
    fn test_requested_item_deserializes_both_shapes() {
        let catalog: RequestedItem =
            serde_json::from_str(&format!(r#"{{"product_id":"{}","quantity":2}}"#, Uuid::new_v4()))
                .unwrap();
        assert!(matches!(catalog, RequestedItem::Catalog { quantity: 2, .. }));

        let custom: RequestedItem = serde_json::from_str(
            r#"{"name":"Builder bouquet","quantity":1,"unit_price":"48.00","config":{"wrap":"kraft"}}"#,
        )
        .unwrap();
        assert!(matches!(custom, RequestedItem::Custom { .. }));
    }
}
