pub mod api_errors;
pub mod discord;
pub mod stripe;
pub mod stripe_client;
