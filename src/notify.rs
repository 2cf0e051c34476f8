use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::metrics::Metrics;

// ============================================================================
// Notification Sender
// ============================================================================
//
// Best-effort confirmation email after order creation. The send is spawned
// as a detached task after the order commits; its outcome never affects the
// result reported to the caller. Failures are logged and swallowed.
//
// ============================================================================

#[derive(Debug, Clone)]
pub struct OrderConfirmationMail {
    pub to: String,
    pub customer_name: String,
    pub order_number: String,
    pub total: Decimal,
    pub currency: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_order_confirmation(&self, mail: &OrderConfirmationMail) -> anyhow::Result<()>;
}

/// Log-only mailer; stands in for an SMTP/API integration.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send_order_confirmation(&self, mail: &OrderConfirmationMail) -> anyhow::Result<()> {
        tracing::info!(
            to = %mail.to,
            order_number = %mail.order_number,
            total = %mail.total,
            currency = %mail.currency,
            "📧 Order confirmation email sent"
        );
        Ok(())
    }
}

/// Fire-and-forget dispatch. Spawns the send on the runtime and returns
/// immediately; errors land in the log and the email-failure counter only.
pub fn send_detached(mailer: Arc<dyn Mailer>, mail: OrderConfirmationMail, metrics: Arc<Metrics>) {
    tokio::spawn(async move {
        match mailer.send_order_confirmation(&mail).await {
            Ok(()) => metrics.record_email(true),
            Err(err) => {
                metrics.record_email(false);
                tracing::warn!(
                    order_number = %mail.order_number,
                    error = %err,
                    "Confirmation email failed; order is unaffected"
                );
            }
        }
    });
}
