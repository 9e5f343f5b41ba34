use crate::domain::{
    error::PurchaseError,
    id::DiscordUserId,
    money::{Currency, Money, MoneyAmount},
    provider::{LineItem, PaymentGateway},
};

/// Everything the purchase reply needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseOffer {
    pub product_name: String,
    pub price: Option<Money>,
    pub session_id: String,
    pub checkout_url: String,
}

/// Price lookup, product lookup, then a one-item checkout for `user`.
pub async fn prepare_purchase(
    gateway: &dyn PaymentGateway,
    price_id: &str,
    user: DiscordUserId,
) -> Result<PurchaseOffer, PurchaseError> {
    let price = gateway
        .fetch_price(price_id)
        .await?
        .ok_or_else(|| PurchaseError::PriceUnavailable(price_id.to_string()))?;

    let product_id = price
        .product_id
        .as_deref()
        .ok_or_else(|| PurchaseError::ProductUnavailable(price.id.clone()))?;
    let product = gateway
        .fetch_product(product_id)
        .await?
        .ok_or_else(|| PurchaseError::ProductUnavailable(price.id.clone()))?;

    let line_items = vec![LineItem {
        price_id: price.id.clone(),
        quantity: 1,
    }];
    let link = match gateway.create_checkout(user, line_items).await {
        Ok(link) => link,
        Err(e) => {
            tracing::error!(error = %e, user_id = %user, "checkout session creation failed");
            return Err(PurchaseError::CheckoutUnavailable);
        }
    };
    let checkout_url = link.url.ok_or(PurchaseError::CheckoutUnavailable)?;

    tracing::info!(user_id = %user, session_id = %link.session_id, "checkout session created");

    Ok(PurchaseOffer {
        product_name: product.name,
        price: price_money(price.unit_amount, price.currency.as_deref()),
        session_id: link.session_id,
        checkout_url,
    })
}

fn price_money(unit_amount: Option<i64>, currency: Option<&str>) -> Option<Money> {
    let amount = MoneyAmount::new(unit_amount?).ok()?;
    let currency = currency
        .and_then(|c| Currency::try_from(c).ok())
        .unwrap_or(Currency::Usd);
    Some(Money::new(amount, currency))
}
