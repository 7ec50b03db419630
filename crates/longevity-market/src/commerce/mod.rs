//! Hosted checkout, payment webhooks, and vendor order routing.

pub mod checkout;
pub mod clicks;
mod error;
pub mod orders;
pub mod router;
pub mod shopify;
pub mod stripe;
pub mod webhook;

#[cfg(test)]
mod tests;

pub use checkout::{CheckoutService, CheckoutSessionRequest, CreatedCheckoutSession, PaymentGateway};
pub use error::{CommerceError, GatewayError};
pub use orders::{
    FulfillmentReceipt, FulfillmentRoute, OrderDispatcher, OrderOutcome, OrderParams, OrderRouter,
    ShippingAddress, ShopifyOrderGateway,
};
pub use router::{commerce_router, CommerceServices};
pub use shopify::ShopifyAdminClient;
pub use stripe::StripeClient;
pub use webhook::{WebhookError, WebhookReceipt, WebhookService};
