use actix_web::{web, HttpResponse, Responder};
use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::Arc;

// ============================================================================
// Metrics - Prometheus counters for the order workflow
// ============================================================================

pub struct Metrics {
    registry: Registry,

    pub orders_placed: IntCounter,
    pub orders_failed: IntCounterVec,
    pub status_updates: IntCounterVec,
    pub emails_sent: IntCounter,
    pub emails_failed: IntCounter,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let orders_placed = IntCounter::new("orders_placed_total", "Orders successfully placed")?;
        registry.register(Box::new(orders_placed.clone()))?;

        let orders_failed = IntCounterVec::new(
            Opts::new("orders_failed_total", "Order placements rejected or failed"),
            &["reason"],
        )?;
        registry.register(Box::new(orders_failed.clone()))?;

        let status_updates = IntCounterVec::new(
            Opts::new("order_status_updates_total", "Order status writes by target status"),
            &["status"],
        )?;
        registry.register(Box::new(status_updates.clone()))?;

        let emails_sent = IntCounter::new("confirmation_emails_sent_total", "Confirmation emails sent")?;
        registry.register(Box::new(emails_sent.clone()))?;

        let emails_failed =
            IntCounter::new("confirmation_emails_failed_total", "Confirmation email send failures")?;
        registry.register(Box::new(emails_failed.clone()))?;

        Ok(Self {
            registry,
            orders_placed,
            orders_failed,
            status_updates,
            emails_sent,
            emails_failed,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn record_order_placed(&self) {
        self.orders_placed.inc();
    }

    pub fn record_order_failed(&self, reason: &str) {
        self.orders_failed.with_label_values(&[reason]).inc();
    }

    pub fn record_status_update(&self, status: &str) {
        self.status_updates.with_label_values(&[status]).inc();
    }

    pub fn record_email(&self, success: bool) {
        if success {
            self.emails_sent.inc();
        } else {
            self.emails_failed.inc();
        }
    }
}

/// Prometheus text exposition, mounted at /metrics on the API server.
pub async fn metrics_handler(metrics: web::Data<Arc<Metrics>>) -> impl Responder {
    let encoder = TextEncoder::new();
    let families = metrics.registry().gather();

    let mut buffer = Vec::new();
    if let Err(err) = encoder.encode(&families, &mut buffer) {
        tracing::error!(error = %err, "Failed to encode metrics");
        return HttpResponse::InternalServerError().finish();
    }

    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new().unwrap();
        assert!(!metrics.registry().gather().is_empty());
    }

    #[test]
    fn test_order_counters() {
        let metrics = Metrics::new().unwrap();
        metrics.record_order_placed();
        metrics.record_order_placed();
        metrics.record_order_failed("insufficient_stock");

        assert_eq!(metrics.orders_placed.get(), 2);
        assert_eq!(
            metrics.orders_failed.with_label_values(&["insufficient_stock"]).get(),
            1
        );
    }

    #[test]
    fn test_status_update_counter_labels() {
        let metrics = Metrics::new().unwrap();
        metrics.record_status_update("delivered");
        metrics.record_status_update("delivered");
        metrics.record_status_update("cancelled");

        assert_eq!(metrics.status_updates.with_label_values(&["delivered"]).get(), 2);
        assert_eq!(metrics.status_updates.with_label_values(&["cancelled"]).get(), 1);
    }

    #[test]
    fn test_email_counters() {
        let metrics = Metrics::new().unwrap();
        metrics.record_email(true);
        metrics.record_email(false);
        metrics.record_email(false);

        assert_eq!(metrics.emails_sent.get(), 1);
        assert_eq!(metrics.emails_failed.get(), 2);
    }
}
