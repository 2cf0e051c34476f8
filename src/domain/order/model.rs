use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::value_objects::{Address, CustomBouquet, MoneyBreakdown, OrderStatus, PaymentStatus};

// ============================================================================
// Order Aggregate - Persistent State
// ============================================================================
//
// An Order owns its OrderItems and TrackingEntries (deleting an order
// cascades both; deletion is only used as rollback of a failed creation).
// Products are referenced, never owned.
//
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    /// Human-readable, unguessable order number, e.g. `BLM-20260827-X4K9PQ`.
    pub order_number: String,
    pub user_id: Uuid,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub payment_method: String,
    pub delivery_address: Address,
    pub billing_address: Option<Address>,
    pub delivery_date: Option<DateTime<Utc>>,
    pub delivery_time_slot: Option<String>,
    pub gift_message: Option<String>,
    pub special_instructions: Option<String>,
    pub totals: MoneyBreakdown,
    pub currency: String,
    pub tracking_number: Option<String>,
    pub estimated_delivery: DateTime<Utc>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One priced line within an order. Unit price is snapshotted at purchase
/// time; later catalog price changes never affect a placed order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    /// None for bespoke bouquets with no catalog identity.
    pub product_id: Option<Uuid>,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub line_total: Decimal,
    pub custom: Option<CustomBouquet>,
}

/// Append-only timeline event. Entries are never edited or deleted; the
/// order's own status field and the latest entry are kept consistent by
/// the writer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingEntry {
    pub id: Uuid,
    pub order_id: Uuid,
    pub status: String,
    pub description: String,
    pub location: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub actor_id: Option<Uuid>,
}

impl TrackingEntry {
    pub fn new(
        order_id: Uuid,
        status: impl Into<String>,
        description: impl Into<String>,
        actor_id: Option<Uuid>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            order_id,
            status: status.into(),
            description: description.into(),
            location: None,
            timestamp: Utc::now(),
            actor_id,
        }
    }
}
