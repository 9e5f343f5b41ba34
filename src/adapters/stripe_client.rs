use {
    crate::domain::{
        error::PaymentError,
        id::{DiscordUserId, USER_METADATA_KEY},
        provider::{
            BalanceEntry, BalanceSnapshot, CheckoutLink, LineItem, PaymentGateway, PriceRecord,
            ProductRecord, ProviderFuture,
        },
    },
    std::{collections::HashMap, sync::Arc},
};

pub struct StripeGateway {
    client: stripe::Client,
    success_url: Arc<str>,
}

impl StripeGateway {
    pub fn new(secret_key: &str, success_url: impl Into<Arc<str>>) -> Self {
        Self {
            client: stripe::Client::new(secret_key),
            success_url: success_url.into(),
        }
    }
}

impl PaymentGateway for StripeGateway {
    fn fetch_balance(&self) -> ProviderFuture<'_, BalanceSnapshot> {
        Box::pin(async move { self.fetch_balance_inner().await })
    }

    fn fetch_price(&self, price_id: &str) -> ProviderFuture<'_, Option<PriceRecord>> {
        let price_id = price_id.to_string();
        Box::pin(async move { self.fetch_price_inner(&price_id).await })
    }

    fn fetch_product(&self, product_id: &str) -> ProviderFuture<'_, Option<ProductRecord>> {
        let product_id = product_id.to_string();
        Box::pin(async move { self.fetch_product_inner(&product_id).await })
    }

    fn create_checkout(
        &self,
        user: DiscordUserId,
        line_items: Vec<LineItem>,
    ) -> ProviderFuture<'_, CheckoutLink> {
        Box::pin(async move { self.create_checkout_inner(user, line_items).await })
    }
}

impl StripeGateway {
    async fn fetch_balance_inner(&self) -> Result<BalanceSnapshot, PaymentError> {
        let balance: stripe::Balance = self
            .client
            .get("/balance")
            .await
            .map_err(|e| PaymentError::Provider(format!("Stripe API: {e}")))?;

        Ok(BalanceSnapshot {
            available: balance.available.iter().map(convert_balance_amount).collect(),
            pending: balance.pending.iter().map(convert_balance_amount).collect(),
        })
    }

    async fn fetch_price_inner(&self, raw: &str) -> Result<Option<PriceRecord>, PaymentError> {
        let price_id = raw
            .parse::<stripe::PriceId>()
            .map_err(|e| PaymentError::Validation(format!("invalid Price id: {e}")))?;

        let price = match stripe::Price::retrieve(&self.client, &price_id, &[]).await {
            Ok(price) => price,
            Err(e) if is_not_found(&e) => return Ok(None),
            Err(e) => return Err(PaymentError::Provider(format!("Stripe API: {e}"))),
        };

        let product_id = price.product.as_ref().map(|e| match e {
            stripe::Expandable::Id(id) => id.to_string(),
            stripe::Expandable::Object(product) => product.id.to_string(),
        });

        Ok(Some(PriceRecord {
            id: price.id.to_string(),
            product_id,
            unit_amount: price.unit_amount,
            currency: price.currency.map(|c| c.to_string()),
        }))
    }

    async fn fetch_product_inner(&self, raw: &str) -> Result<Option<ProductRecord>, PaymentError> {
        let product_id = raw
            .parse::<stripe::ProductId>()
            .map_err(|e| PaymentError::Validation(format!("invalid Product id: {e}")))?;

        let product = match stripe::Product::retrieve(&self.client, &product_id, &[]).await {
            Ok(product) => product,
            Err(e) if is_not_found(&e) => return Ok(None),
            Err(e) => return Err(PaymentError::Provider(format!("Stripe API: {e}"))),
        };

        Ok(product.name.map(|name| ProductRecord {
            id: product.id.to_string(),
            name,
        }))
    }

    async fn create_checkout_inner(
        &self,
        user: DiscordUserId,
        line_items: Vec<LineItem>,
    ) -> Result<CheckoutLink, PaymentError> {
        let metadata = user_metadata(user);

        let mut params = stripe::CreateCheckoutSession::new();
        params.mode = Some(stripe::CheckoutSessionMode::Payment);
        params.success_url = Some(&*self.success_url);
        params.metadata = Some(metadata.clone());
        params.payment_intent_data = Some(stripe::CreateCheckoutSessionPaymentIntentData {
            metadata: Some(metadata),
            ..Default::default()
        });
        params.line_items = Some(
            line_items
                .into_iter()
                .map(|item| stripe::CreateCheckoutSessionLineItems {
                    price: Some(item.price_id),
                    quantity: Some(item.quantity),
                    ..Default::default()
                })
                .collect(),
        );

        let session = stripe::CheckoutSession::create(&self.client, params)
            .await
            .map_err(|e| PaymentError::Provider(format!("Stripe API: {e}")))?;

        Ok(CheckoutLink {
            session_id: session.id.to_string(),
            url: session.url,
        })
    }
}

/// Metadata attached to both the session and its payment intent.
pub fn user_metadata(user: DiscordUserId) -> HashMap<String, String> {
    HashMap::from([(USER_METADATA_KEY.to_string(), user.to_string())])
}

fn convert_balance_amount(amount: &stripe::BalanceAmount) -> BalanceEntry {
    BalanceEntry {
        amount: amount.amount,
        currency: amount.currency.to_string(),
    }
}

fn is_not_found(err: &stripe::StripeError) -> bool {
    matches!(err, stripe::StripeError::Stripe(req) if req.http_status == 404)
}
