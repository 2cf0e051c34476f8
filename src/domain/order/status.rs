use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::metrics::Metrics;
use crate::store::{OrderStore, Session};

use super::errors::OrderError;
use super::model::{Order, TrackingEntry};
use super::value_objects::OrderStatus;

// ============================================================================
// Order Status Controller
// ============================================================================
//
// Staff-initiated status writes over the closed status set, plus the
// customer-initiated cancel / refund-request sub-flows. Beyond membership
// in the set, any status may be written at any time by staff; there is no
// transition table. The status change is the primary effect; the timeline
// entry is best-effort commentary.
//
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct StatusUpdate {
    pub order_id: Uuid,
    pub status: String,
    #[serde(default)]
    pub tracking_number: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Source statuses from which a customer may still cancel.
const CANCELLABLE: [OrderStatus; 3] = [
    OrderStatus::Pending,
    OrderStatus::Confirmed,
    OrderStatus::Preparing,
];

/// Source statuses from which a refund may be requested.
const REFUNDABLE: [OrderStatus; 2] = [OrderStatus::Delivered, OrderStatus::Cancelled];

pub struct OrderStatusController {
    orders: Arc<dyn OrderStore>,
    metrics: Arc<Metrics>,
}

impl OrderStatusController {
    pub fn new(orders: Arc<dyn OrderStore>, metrics: Arc<Metrics>) -> Self {
        Self { orders, metrics }
    }

    /// Apply a staff-initiated status transition and append a timeline entry.
    pub async fn update_status(
        &self,
        session: &Session,
        update: StatusUpdate,
    ) -> Result<Order, OrderError> {
        if !session.role.is_staff() {
            return Err(OrderError::Forbidden);
        }

        let target = OrderStatus::parse(&update.status)
            .ok_or_else(|| OrderError::InvalidStatus(update.status.clone()))?;

        let mut order = self
            .orders
            .get_order(update.order_id)
            .await?
            .ok_or(OrderError::NotFound(update.order_id))?;

        order.status = target;
        order.updated_at = Utc::now();
        if target == OrderStatus::Delivered {
            order.delivered_at = Some(order.updated_at);
        }
        if let Some(tracking_number) = update.tracking_number {
            order.tracking_number = Some(tracking_number);
        }
        self.orders.update_order(order.clone()).await?;

        let description = update
            .notes
            .unwrap_or_else(|| target.default_description().to_string());
        let entry = TrackingEntry::new(
            order.id,
            target.as_str(),
            description,
            Some(session.user_id),
        );
        if let Err(err) = self.orders.append_tracking(entry).await {
            tracing::warn!(order_id = %order.id, error = %err, "Tracking entry append failed after status write");
        }

        self.metrics.record_status_update(target.as_str());
        tracing::info!(
            order_id = %order.id,
            status = target.as_str(),
            actor = %session.user_id,
            "Order status updated"
        );

        Ok(order)
    }

    /// Customer-initiated cancellation, permitted only before preparation is
    /// finished. The order's owner (or staff on their behalf) may cancel.
    pub async fn cancel_order(&self, session: &Session, order_id: Uuid) -> Result<Order, OrderError> {
        let mut order = self
            .orders
            .get_order(order_id)
            .await?
            .ok_or(OrderError::NotFound(order_id))?;

        if order.user_id != session.user_id && !session.role.is_staff() {
            return Err(OrderError::Forbidden);
        }
        if !CANCELLABLE.contains(&order.status) {
            return Err(OrderError::NotCancellable(order.status));
        }

        order.status = OrderStatus::Cancelled;
        order.updated_at = Utc::now();
        self.orders.update_order(order.clone()).await?;

        let entry = TrackingEntry::new(
            order_id,
            OrderStatus::Cancelled.as_str(),
            "Order cancelled by customer",
            Some(session.user_id),
        );
        if let Err(err) = self.orders.append_tracking(entry).await {
            tracing::warn!(order_id = %order_id, error = %err, "Tracking entry append failed after cancellation");
        }

        self.metrics.record_status_update(OrderStatus::Cancelled.as_str());
        Ok(order)
    }

    /// Customer-initiated refund request. Appends a timeline entry without
    /// changing the order's status.
    pub async fn request_refund(
        &self,
        session: &Session,
        order_id: Uuid,
        reason: Option<String>,
    ) -> Result<(), OrderError> {
        let order = self
            .orders
            .get_order(order_id)
            .await?
            .ok_or(OrderError::NotFound(order_id))?;

        if order.user_id != session.user_id && !session.role.is_staff() {
            return Err(OrderError::Forbidden);
        }
        if !REFUNDABLE.contains(&order.status) {
            return Err(OrderError::NotRefundable(order.status));
        }

        let description = reason.unwrap_or_else(|| "Refund requested by customer".to_string());
        let entry = TrackingEntry::new(order_id, "refund-requested", description, Some(session.user_id));
        self.orders.append_tracking(entry).await?;

        tracing::info!(order_id = %order_id, user_id = %session.user_id, "Refund requested");
        Ok(())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
