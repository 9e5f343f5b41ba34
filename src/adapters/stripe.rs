//! Stripe side of the relay: API client, webhook signatures and the HTTP handler.

pub mod signature;
pub mod webhook;

pub use {
    super::stripe_client::{StripeGateway, user_metadata},
    signature::construct_event,
};
