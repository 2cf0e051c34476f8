use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ============================================================================
// Order Value Objects
// ============================================================================

/// Closed set of order lifecycle statuses.
///
/// Any member may be written by an authorized actor at any time; only set
/// membership is validated (no transition table). `Cancelled` is absorbing
/// in practice but nothing enforces that for staff writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::OutForDelivery => "out_for_delivery",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.as_str() == value)
    }

    /// Canned tracking description used when a status update carries no note.
    pub fn default_description(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Order has been received",
            OrderStatus::Confirmed => "Order has been confirmed",
            OrderStatus::Preparing => "Your bouquet is being prepared",
            OrderStatus::OutForDelivery => "Order is out for delivery",
            OrderStatus::Delivered => "Order has been delivered",
            OrderStatus::Cancelled => "Order has been cancelled",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Refunded,
}

/// Caller roles resolved from the session store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Customer,
    Florist,
    Admin,
}

impl Role {
    /// Staff roles may write order statuses.
    pub fn is_staff(&self) -> bool {
        matches!(self, Role::Florist | Role::Admin)
    }
}

/// Structured delivery/billing address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub name: String,
    pub line1: String,
    #[serde(default)]
    pub line2: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Builder-originated bouquet configuration, snapshotted onto order items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomBouquet {
    #[serde(default)]
    pub wrap: Option<String>,
    #[serde(default)]
    pub ribbon: Option<String>,
    #[serde(default)]
    pub card_message: Option<String>,
}

/// Monetary breakdown supplied with an order request and persisted verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoneyBreakdown {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub shipping: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
}

impl MoneyBreakdown {
    /// Tolerance for rounding drift between stated and computed totals (0.01).
    pub const TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

    pub fn computed_total(&self) -> Decimal {
        self.subtotal + self.tax + self.shipping - self.discount
    }

    /// Stated total matches subtotal + tax + shipping - discount within
    /// the rounding tolerance.
    pub fn is_consistent(&self) -> bool {
        (self.total - self.computed_total()).abs() <= Self::TOLERANCE
    }

    pub fn has_negative_component(&self) -> bool {
        [self.subtotal, self.tax, self.shipping, self.discount, self.total]
            .iter()
            .any(|v| v.is_sign_negative() && !v.is_zero())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
