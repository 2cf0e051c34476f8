use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::order::value_objects::CustomBouquet;
use crate::store::CartBackend;

// ============================================================================
// Cart - pending purchase selections
// ============================================================================
//
// One Cart abstraction with two backings selected by caller identity:
// - ServerCart: persisted per user id on the shared backend.
// - GuestCart: process-local, keyed by nothing but its own instance,
//   standing in for the requester's local storage.
//
// A guest cart is merged into the user's persisted cart exactly once at
// login, then the local copy is purged.
//
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    pub id: Uuid,
    /// None for custom bouquets assembled in the builder.
    pub product_id: Option<Uuid>,
    pub name: String,
    pub quantity: u32,
    /// Price snapshot taken when the item was added.
    pub unit_price: Decimal,
    pub custom: Option<CustomBouquet>,
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    pub fn for_product(product_id: Uuid, name: impl Into<String>, quantity: u32, unit_price: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            product_id: Some(product_id),
            name: name.into(),
            quantity,
            unit_price,
            custom: None,
            added_at: Utc::now(),
        }
    }

    pub fn for_custom(name: impl Into<String>, quantity: u32, unit_price: Decimal, config: CustomBouquet) -> Self {
        Self {
            id: Uuid::new_v4(),
            product_id: None,
            name: name.into(),
            quantity,
            unit_price,
            custom: Some(config),
            added_at: Utc::now(),
        }
    }
}

/// Capability set shared by both cart backings.
#[async_trait]
pub trait CartStore: Send + Sync {
    async fn items(&self) -> anyhow::Result<Vec<CartItem>>;
    async fn add(&self, item: CartItem) -> anyhow::Result<()>;
    async fn set_quantity(&self, item_id: Uuid, quantity: u32) -> anyhow::Result<()>;
    async fn remove(&self, item_id: Uuid) -> anyhow::Result<()>;
    async fn clear(&self) -> anyhow::Result<()>;
}

/// Server-persisted cart for an authenticated user.
pub struct ServerCart {
    backend: Arc<dyn CartBackend>,
    user_id: Uuid,
}

impl ServerCart {
    pub fn new(backend: Arc<dyn CartBackend>, user_id: Uuid) -> Self {
        Self { backend, user_id }
    }
}

#[async_trait]
impl CartStore for ServerCart {
    async fn items(&self) -> anyhow::Result<Vec<CartItem>> {
        self.backend.cart_items(self.user_id).await
    }

    async fn add(&self, item: CartItem) -> anyhow::Result<()> {
        self.backend.add_cart_item(self.user_id, item).await
    }

    async fn set_quantity(&self, item_id: Uuid, quantity: u32) -> anyhow::Result<()> {
        self.backend.set_cart_quantity(self.user_id, item_id, quantity).await
    }

    async fn remove(&self, item_id: Uuid) -> anyhow::Result<()> {
        self.backend.remove_cart_item(self.user_id, item_id).await
    }

    async fn clear(&self) -> anyhow::Result<()> {
        self.backend.clear_cart(self.user_id).await
    }
}

/// Local-only cart for a guest session.
#[derive(Default)]
pub struct GuestCart {
    items: RwLock<Vec<CartItem>>,
}

impl GuestCart {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CartStore for GuestCart {
    async fn items(&self) -> anyhow::Result<Vec<CartItem>> {
        Ok(self.items.read().await.clone())
    }

    async fn add(&self, item: CartItem) -> anyhow::Result<()> {
        self.items.write().await.push(item);
        Ok(())
    }

    async fn set_quantity(&self, item_id: Uuid, quantity: u32) -> anyhow::Result<()> {
        let mut items = self.items.write().await;
        if let Some(item) = items.iter_mut().find(|i| i.id == item_id) {
            item.quantity = quantity;
        }
        Ok(())
    }

    async fn remove(&self, item_id: Uuid) -> anyhow::Result<()> {
        self.items.write().await.retain(|i| i.id != item_id);
        Ok(())
    }

    async fn clear(&self) -> anyhow::Result<()> {
        self.items.write().await.clear();
        Ok(())
    }
}

/// Merge a guest cart into the user's persisted cart at login.
///
/// Quantities are summed for matching catalog lines; custom bouquets are
/// always appended as new lines. The guest copy is purged afterwards, so a
/// repeated call is a no-op. Returns the number of lines merged.
pub async fn merge_guest_cart(guest: &dyn CartStore, user: &dyn CartStore) -> anyhow::Result<usize> {
    let guest_items = guest.items().await?;
    if guest_items.is_empty() {
        return Ok(0);
    }

    let existing = user.items().await?;
    let merged = guest_items.len();

    // Accumulate per matched user line first; a guest cart can hold several
    // lines for the same product and each must contribute its quantity.
    let mut summed: HashMap<Uuid, u32> = HashMap::new();
    for item in guest_items {
        let matching = item
            .product_id
            .and_then(|pid| existing.iter().find(|e| e.product_id == Some(pid)));

        match matching {
            Some(line) => {
                *summed.entry(line.id).or_insert(line.quantity) += item.quantity;
            }
            None => {
                user.add(item).await?;
            }
        }
    }
    for (line_id, quantity) in summed {
        user.set_quantity(line_id, quantity).await?;
    }

    guest.clear().await?;

    tracing::info!(lines = merged, "Merged guest cart into user cart");
    Ok(merged)
}

// ============================================================================
// Unit Tests
// ============================================================================
