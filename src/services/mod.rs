pub mod balance;
pub mod storefront;
pub mod webhook_dispatch;
