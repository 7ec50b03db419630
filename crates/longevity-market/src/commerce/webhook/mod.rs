mod event;
pub mod signature;

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, warn};

pub use event::{CheckoutSessionObject, StripeEvent, CHECKOUT_SESSION_COMPLETED};
pub use signature::{signature_header, SignatureError, DEFAULT_TOLERANCE_SECS};

use super::orders::{OrderDispatcher, OrderOutcome};

/// Rejections surfaced to the payment provider as a 400 response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WebhookError {
    #[error("No signature")]
    MissingSignature,
    #[error("Webhook secret not configured")]
    SecretNotConfigured,
    #[error("Invalid signature")]
    InvalidSignature(#[source] SignatureError),
    #[error("Invalid payload: {0}")]
    MalformedPayload(String),
    #[error("Missing product info")]
    MissingProductInfo,
}

/// What happened to an accepted delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookReceipt {
    pub event_id: String,
    pub event_type: String,
    pub fulfillment: Option<OrderOutcome>,
}

/// Verifies payment provider deliveries and forwards completed checkouts to fulfillment.
pub struct WebhookService<D> {
    secret: Option<String>,
    tolerance_secs: i64,
    dispatcher: Arc<D>,
}

impl<D> WebhookService<D>
where
    D: OrderDispatcher + 'static,
{
    pub fn new(secret: Option<String>, tolerance_secs: i64, dispatcher: Arc<D>) -> Self {
        Self {
            secret,
            tolerance_secs,
            dispatcher,
        }
    }

    pub fn handle(
        &self,
        payload: &[u8],
        signature: Option<&str>,
    ) -> Result<WebhookReceipt, WebhookError> {
        self.handle_at(payload, signature, Utc::now().timestamp())
    }

    /// Same as [`WebhookService::handle`] with an explicit clock for the replay window.
    pub fn handle_at(
        &self,
        payload: &[u8],
        signature: Option<&str>,
        now: i64,
    ) -> Result<WebhookReceipt, WebhookError> {
        let signature = signature
            .filter(|value| !value.is_empty())
            .ok_or(WebhookError::MissingSignature)?;
        let secret = self.secret.as_deref().ok_or_else(|| {
            error!("webhook received but STRIPE_WEBHOOK_SECRET is not set");
            WebhookError::SecretNotConfigured
        })?;

        signature::verify(payload, signature, secret, self.tolerance_secs, now).map_err(|err| {
            warn!(error = %err, "webhook signature verification failed");
            WebhookError::InvalidSignature(err)
        })?;

        let event: StripeEvent = serde_json::from_slice(payload)
            .map_err(|err| WebhookError::MalformedPayload(err.to_string()))?;

        if event.event_type != CHECKOUT_SESSION_COMPLETED {
            info!(event_id = %event.id, event_type = %event.event_type, "webhook event ignored");
            return Ok(WebhookReceipt {
                event_id: event.id,
                event_type: event.event_type,
                fulfillment: None,
            });
        }

        let session: CheckoutSessionObject = serde_json::from_value(event.data.object.clone())
            .map_err(|err| WebhookError::MalformedPayload(err.to_string()))?;
        let order = session.order_params().ok_or_else(|| {
            error!(session_id = %session.id, "completed checkout carries no product id");
            WebhookError::MissingProductInfo
        })?;

        info!(
            session_id = %session.id,
            product_id = %order.product_id,
            vendor = order.vendor.as_deref().unwrap_or("unknown"),
            amount_paid = order.amount_paid,
            "payment completed"
        );

        // Fulfillment problems never fail the acknowledgement.
        let outcome = OrderOutcome::from(self.dispatcher.dispatch(&order));
        if outcome.success {
            info!(
                session_id = %session.id,
                order_id = outcome.order_id.as_deref().unwrap_or_default(),
                "order placed"
            );
        } else {
            error!(
                session_id = %session.id,
                error = outcome.error.as_deref().unwrap_or_default(),
                "order placement failed"
            );
        }

        Ok(WebhookReceipt {
            event_id: event.id,
            event_type: event.event_type,
            fulfillment: Some(outcome),
        })
    }
}
