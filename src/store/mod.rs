use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::cart::CartItem;
use crate::domain::catalog::Product;
use crate::domain::order::model::{Order, OrderItem, TrackingEntry};
use crate::domain::order::value_objects::Role;
use crate::domain::review::Review;

mod memory;

pub use memory::MemoryBackend;

// ============================================================================
// Persistence Seam
// ============================================================================
//
// One trait per concern so domain code depends only on the operations it
// needs. All methods return anyhow::Result; domain layers translate
// failures into their own error taxonomies at the seam.
//
// ============================================================================

/// Authenticated caller, resolved from a bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: Uuid,
    pub role: Role,
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn resolve(&self, token: &str) -> anyhow::Result<Option<Session>>;
    async fn register(&self, token: &str, session: Session) -> anyhow::Result<()>;
}

#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn insert_product(&self, product: Product) -> anyhow::Result<()>;
    async fn get_product(&self, id: Uuid) -> anyhow::Result<Option<Product>>;
    /// Batch read; unknown ids are silently omitted from the result.
    async fn products_by_ids(&self, ids: &[Uuid]) -> anyhow::Result<Vec<Product>>;
    /// Decrement stock, floored at zero.
    async fn decrement_stock(&self, id: Uuid, by: u32) -> anyhow::Result<()>;
    /// Persist the derived review aggregates.
    async fn set_rating(&self, id: Uuid, rating: Decimal, review_count: u32) -> anyhow::Result<()>;
}

#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn insert_order(&self, order: Order) -> anyhow::Result<()>;
    async fn insert_items(&self, items: Vec<OrderItem>) -> anyhow::Result<()>;
    async fn update_order(&self, order: Order) -> anyhow::Result<()>;
    /// Cascade-deletes the order's items and tracking entries. Used only as
    /// rollback of a failed creation.
    async fn delete_order(&self, id: Uuid) -> anyhow::Result<()>;
    async fn get_order(&self, id: Uuid) -> anyhow::Result<Option<Order>>;
    async fn items_for_order(&self, id: Uuid) -> anyhow::Result<Vec<OrderItem>>;
    /// Append-only; entries are never edited or removed.
    async fn append_tracking(&self, entry: TrackingEntry) -> anyhow::Result<()>;
    /// Entries in append order.
    async fn tracking_for_order(&self, id: Uuid) -> anyhow::Result<Vec<TrackingEntry>>;
}

#[async_trait]
pub trait CartBackend: Send + Sync {
    async fn cart_items(&self, user_id: Uuid) -> anyhow::Result<Vec<CartItem>>;
    async fn add_cart_item(&self, user_id: Uuid, item: CartItem) -> anyhow::Result<()>;
    async fn set_cart_quantity(&self, user_id: Uuid, item_id: Uuid, quantity: u32) -> anyhow::Result<()>;
    async fn remove_cart_item(&self, user_id: Uuid, item_id: Uuid) -> anyhow::Result<()>;
    async fn clear_cart(&self, user_id: Uuid) -> anyhow::Result<()>;
}

#[async_trait]
pub trait ReviewStore: Send + Sync {
    async fn insert_review(&self, review: Review) -> anyhow::Result<()>;
    async fn update_review(&self, review: Review) -> anyhow::Result<()>;
    async fn delete_review(&self, id: Uuid) -> anyhow::Result<()>;
    async fn get_review(&self, id: Uuid) -> anyhow::Result<Option<Review>>;
    async fn reviews_for_product(&self, product_id: Uuid) -> anyhow::Result<Vec<Review>>;
    async fn set_helpful_count(&self, id: Uuid, count: u32) -> anyhow::Result<()>;
}
