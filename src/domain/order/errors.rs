use rust_decimal::Decimal;
use uuid::Uuid;

use super::value_objects::OrderStatus;

// ============================================================================
// Order Workflow Errors
// ============================================================================
//
// Each variant is distinct so callers can render a specific message; the
// Display strings double as the user-facing reason text. Store-level detail
// is flattened into `Persistence` and never exposed verbatim over the API.
//
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("Authorization required")]
    MissingAuthorization,

    #[error("Invalid or expired session")]
    InvalidAuthorization,

    #[error("You do not have permission to perform this action")]
    Forbidden,

    #[error("Order must contain at least one item")]
    EmptyOrder,

    #[error("Invalid item quantity: {0}")]
    InvalidQuantity(u32),

    #[error("Product not found: {0}")]
    ProductNotFound(Uuid),

    #[error("Insufficient stock for product {product_id}. Available: {available}")]
    InsufficientStock {
        product_id: Uuid,
        requested: u32,
        available: u32,
    },

    #[error("Order total {stated} does not match computed total {computed}")]
    TotalMismatch { stated: Decimal, computed: Decimal },

    #[error("Order amounts must not be negative")]
    NegativeAmount,

    #[error("Invalid order status: {0}")]
    InvalidStatus(String),

    #[error("Order not found: {0}")]
    NotFound(Uuid),

    #[error("Order in status {0:?} can no longer be cancelled")]
    NotCancellable(OrderStatus),

    #[error("Refunds can only be requested for delivered or cancelled orders")]
    NotRefundable(OrderStatus),

    #[error("Storage operation failed: {0}")]
    Persistence(String),
}

impl OrderError {
    /// Stable label for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            OrderError::MissingAuthorization => "missing_authorization",
            OrderError::InvalidAuthorization => "invalid_authorization",
            OrderError::Forbidden => "forbidden",
            OrderError::EmptyOrder => "empty_order",
            OrderError::InvalidQuantity(_) => "invalid_quantity",
            OrderError::ProductNotFound(_) => "product_not_found",
            OrderError::InsufficientStock { .. } => "insufficient_stock",
            OrderError::TotalMismatch { .. } => "total_mismatch",
            OrderError::NegativeAmount => "negative_amount",
            OrderError::InvalidStatus(_) => "invalid_status",
            OrderError::NotFound(_) => "not_found",
            OrderError::NotCancellable(_) => "not_cancellable",
            OrderError::NotRefundable(_) => "not_refundable",
            OrderError::Persistence(_) => "persistence",
        }
    }
}

impl From<anyhow::Error> for OrderError {
    fn from(err: anyhow::Error) -> Self {
        OrderError::Persistence(err.to_string())
    }
}
