use {
    super::error::PaymentError,
    super::id::DiscordUserId,
    std::{future::Future, pin::Pin},
};

pub type ProviderFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, PaymentError>> + Send + 'a>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceEntry {
    /// Minor units; pending balances can be negative.
    pub amount: i64,
    /// Lowercase ISO code as reported by the provider.
    pub currency: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BalanceSnapshot {
    pub available: Vec<BalanceEntry>,
    pub pending: Vec<BalanceEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceRecord {
    pub id: String,
    pub product_id: Option<String>,
    pub unit_amount: Option<i64>,
    pub currency: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub price_id: String,
    pub quantity: u64,
}

/// What the provider hands back after creating a hosted checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutLink {
    pub session_id: String,
    pub url: Option<String>,
}

/// Remote payment API. Every call is a single request with no retries.
pub trait PaymentGateway: Send + Sync {
    fn fetch_balance(&self) -> ProviderFuture<'_, BalanceSnapshot>;

    /// `Ok(None)` when the price does not exist.
    fn fetch_price(&self, price_id: &str) -> ProviderFuture<'_, Option<PriceRecord>>;

    /// `Ok(None)` when the product does not exist.
    fn fetch_product(&self, product_id: &str) -> ProviderFuture<'_, Option<ProductRecord>>;

    /// Creates a checkout session whose session and payment-intent metadata
    /// both carry `user` so later webhook events can be routed back.
    fn create_checkout(
        &self,
        user: DiscordUserId,
        line_items: Vec<LineItem>,
    ) -> ProviderFuture<'_, CheckoutLink>;
}
