use std::collections::HashMap;

use anyhow::bail;
use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::cart::CartItem;
use crate::domain::catalog::Product;
use crate::domain::order::model::{Order, OrderItem, TrackingEntry};
use crate::domain::review::Review;

use super::{CartBackend, OrderStore, ProductStore, ReviewStore, Session, SessionStore};

// ============================================================================
// In-Memory Backend
// ============================================================================
//
// Reference implementation of every persistence trait, backed by RwLock'd
// maps. Per-statement atomicity only, matching the external-store model the
// workflow is written against: each method is one atomic mutation, there is
// no cross-method transaction.
//
// ============================================================================

#[derive(Default)]
pub struct MemoryBackend {
    products: RwLock<HashMap<Uuid, Product>>,
    orders: RwLock<HashMap<Uuid, Order>>,
    order_items: RwLock<HashMap<Uuid, Vec<OrderItem>>>,
    tracking: RwLock<HashMap<Uuid, Vec<TrackingEntry>>>,
    carts: RwLock<HashMap<Uuid, Vec<CartItem>>>,
    reviews: RwLock<HashMap<Uuid, Review>>,
    sessions: RwLock<HashMap<String, Session>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub async fn order_count(&self) -> usize {
        self.orders.read().await.len()
    }
}

#[async_trait]
impl SessionStore for MemoryBackend {
    async fn resolve(&self, token: &str) -> anyhow::Result<Option<Session>> {
        Ok(self.sessions.read().await.get(token).copied())
    }

    async fn register(&self, token: &str, session: Session) -> anyhow::Result<()> {
        self.sessions.write().await.insert(token.to_string(), session);
        Ok(())
    }
}

#[async_trait]
impl ProductStore for MemoryBackend {
    async fn insert_product(&self, product: Product) -> anyhow::Result<()> {
        self.products.write().await.insert(product.id, product);
        Ok(())
    }

    async fn get_product(&self, id: Uuid) -> anyhow::Result<Option<Product>> {
        Ok(self.products.read().await.get(&id).cloned())
    }

    async fn products_by_ids(&self, ids: &[Uuid]) -> anyhow::Result<Vec<Product>> {
        let products = self.products.read().await;
        Ok(ids.iter().filter_map(|id| products.get(id).cloned()).collect())
    }

    async fn decrement_stock(&self, id: Uuid, by: u32) -> anyhow::Result<()> {
        let mut products = self.products.write().await;
        match products.get_mut(&id) {
            Some(product) => {
                product.stock_quantity = product.stock_quantity.saturating_sub(by);
                Ok(())
            }
            None => bail!("Product not found: {}", id),
        }
    }

    async fn set_rating(&self, id: Uuid, rating: Decimal, review_count: u32) -> anyhow::Result<()> {
        let mut products = self.products.write().await;
        match products.get_mut(&id) {
            Some(product) => {
                product.rating = rating;
                product.review_count = review_count;
                Ok(())
            }
            None => bail!("Product not found: {}", id),
        }
    }
}

#[async_trait]
impl OrderStore for MemoryBackend {
    async fn insert_order(&self, order: Order) -> anyhow::Result<()> {
        self.orders.write().await.insert(order.id, order);
        Ok(())
    }

    async fn insert_items(&self, items: Vec<OrderItem>) -> anyhow::Result<()> {
        let mut stored = self.order_items.write().await;
        for item in items {
            stored.entry(item.order_id).or_default().push(item);
        }
        Ok(())
    }

    async fn update_order(&self, order: Order) -> anyhow::Result<()> {
        let mut orders = self.orders.write().await;
        if !orders.contains_key(&order.id) {
            bail!("Order not found: {}", order.id);
        }
        orders.insert(order.id, order);
        Ok(())
    }

    async fn delete_order(&self, id: Uuid) -> anyhow::Result<()> {
        self.orders.write().await.remove(&id);
        self.order_items.write().await.remove(&id);
        self.tracking.write().await.remove(&id);
        Ok(())
    }

    async fn get_order(&self, id: Uuid) -> anyhow::Result<Option<Order>> {
        Ok(self.orders.read().await.get(&id).cloned())
    }

    async fn items_for_order(&self, id: Uuid) -> anyhow::Result<Vec<OrderItem>> {
        Ok(self.order_items.read().await.get(&id).cloned().unwrap_or_default())
    }

    async fn append_tracking(&self, entry: TrackingEntry) -> anyhow::Result<()> {
        self.tracking.write().await.entry(entry.order_id).or_default().push(entry);
        Ok(())
    }

    async fn tracking_for_order(&self, id: Uuid) -> anyhow::Result<Vec<TrackingEntry>> {
        Ok(self.tracking.read().await.get(&id).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl CartBackend for MemoryBackend {
    async fn cart_items(&self, user_id: Uuid) -> anyhow::Result<Vec<CartItem>> {
        Ok(self.carts.read().await.get(&user_id).cloned().unwrap_or_default())
    }

    async fn add_cart_item(&self, user_id: Uuid, item: CartItem) -> anyhow::Result<()> {
        self.carts.write().await.entry(user_id).or_default().push(item);
        Ok(())
    }

    async fn set_cart_quantity(&self, user_id: Uuid, item_id: Uuid, quantity: u32) -> anyhow::Result<()> {
        let mut carts = self.carts.write().await;
        let items = carts.entry(user_id).or_default();
        match items.iter_mut().find(|i| i.id == item_id) {
            Some(item) => {
                item.quantity = quantity;
                Ok(())
            }
            None => bail!("Cart item not found: {}", item_id),
        }
    }

    async fn remove_cart_item(&self, user_id: Uuid, item_id: Uuid) -> anyhow::Result<()> {
        if let Some(items) = self.carts.write().await.get_mut(&user_id) {
            items.retain(|i| i.id != item_id);
        }
        Ok(())
    }

    async fn clear_cart(&self, user_id: Uuid) -> anyhow::Result<()> {
        self.carts.write().await.remove(&user_id);
        Ok(())
    }
}

#[async_trait]
impl ReviewStore for MemoryBackend {
    async fn insert_review(&self, review: Review) -> anyhow::Result<()> {
        self.reviews.write().await.insert(review.id, review);
        Ok(())
    }

    async fn update_review(&self, review: Review) -> anyhow::Result<()> {
        let mut reviews = self.reviews.write().await;
        if !reviews.contains_key(&review.id) {
            bail!("Review not found: {}", review.id);
        }
        reviews.insert(review.id, review);
        Ok(())
    }

    async fn delete_review(&self, id: Uuid) -> anyhow::Result<()> {
        self.reviews.write().await.remove(&id);
        Ok(())
    }

    async fn get_review(&self, id: Uuid) -> anyhow::Result<Option<Review>> {
        Ok(self.reviews.read().await.get(&id).cloned())
    }

    async fn reviews_for_product(&self, product_id: Uuid) -> anyhow::Result<Vec<Review>> {
        let reviews = self.reviews.read().await;
        let mut matching: Vec<Review> = reviews
            .values()
            .filter(|r| r.product_id == product_id)
            .cloned()
            .collect();
        matching.sort_by_key(|r| r.created_at);
        Ok(matching)
    }

    async fn set_helpful_count(&self, id: Uuid, count: u32) -> anyhow::Result<()> {
        let mut reviews = self.reviews.write().await;
        match reviews.get_mut(&id) {
            Some(review) => {
                review.helpful_count = count;
                Ok(())
            }
            None => bail!("Review not found: {}", id),
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
