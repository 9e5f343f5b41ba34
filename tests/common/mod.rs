#![allow(dead_code)]

use {
    checkout_relay::{
        AppState,
        domain::{
            error::{NotifyError, PaymentError},
            id::{DiscordUserId, USER_METADATA_KEY},
            notify::{CompletedCheckout, DeclinedCharge, Notifier, NotifyErrorHook, NotifyFuture},
            provider::{
                BalanceEntry, BalanceSnapshot, CheckoutLink, LineItem, PaymentGateway,
                PriceRecord, ProductRecord, ProviderFuture,
            },
        },
    },
    hmac::{Hmac, Mac},
    sha2::Sha256,
    std::{
        collections::HashMap,
        sync::{Arc, Mutex},
        time::Duration,
    },
};

pub const SECRET: &str = "whsec_test_secret";
pub const USER_ID: u64 = 284_102_398_451_924_993;

// ── Recording notifier ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Declined(DeclinedCharge),
    Completed(CompletedCheckout),
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<Sent>>,
    pub fail: bool,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    /// Waits for detached deliveries to land; returns whatever was sent.
    pub async fn sent_after_delivery(&self, expected: usize) -> Vec<Sent> {
        for _ in 0..100 {
            if self.sent.lock().unwrap().len() >= expected {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        // Give anything unexpected a chance to show up too.
        tokio::time::sleep(Duration::from_millis(20)).await;
        self.sent()
    }

    fn record(&self, sent: Sent) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push(sent);
        if self.fail {
            return Err(NotifyError::Delivery {
                channel_id: 1,
                reason: "channel unavailable".into(),
            });
        }
        Ok(())
    }
}

impl Notifier for RecordingNotifier {
    fn card_declined(&self, charge: &DeclinedCharge) -> NotifyFuture<'_> {
        let result = self.record(Sent::Declined(charge.clone()));
        Box::pin(async move { result })
    }

    fn checkout_completed(&self, checkout: &CompletedCheckout) -> NotifyFuture<'_> {
        let result = self.record(Sent::Completed(checkout.clone()));
        Box::pin(async move { result })
    }
}

pub fn state_with(notifier: Arc<RecordingNotifier>, hook: Option<NotifyErrorHook>) -> AppState {
    AppState {
        stripe_webhook_secret: SECRET.into(),
        notifier,
        on_notify_error: hook,
    }
}

// ── Fake gateway ───────────────────────────────────────────────────────────

pub struct FakeGateway {
    pub balance: Result<BalanceSnapshot, String>,
    pub price: Option<PriceRecord>,
    pub product: Option<ProductRecord>,
    pub checkout: Result<CheckoutLink, String>,
    pub checkouts: Mutex<Vec<(DiscordUserId, Vec<LineItem>)>>,
}

impl Default for FakeGateway {
    fn default() -> Self {
        Self {
            balance: Ok(BalanceSnapshot::default()),
            price: Some(PriceRecord {
                id: "price_123".into(),
                product_id: Some("prod_123".into()),
                unit_amount: Some(1250),
                currency: Some("usd".into()),
            }),
            product: Some(ProductRecord {
                id: "prod_123".into(),
                name: "Ascend Script".into(),
            }),
            checkout: Ok(CheckoutLink {
                session_id: "cs_test_a1B2c3".into(),
                url: Some("https://checkout.stripe.com/c/pay/cs_test_a1B2c3".into()),
            }),
            checkouts: Mutex::new(Vec::new()),
        }
    }
}

impl FakeGateway {
    pub fn checkouts(&self) -> Vec<(DiscordUserId, Vec<LineItem>)> {
        self.checkouts.lock().unwrap().clone()
    }

    /// The metadata a real provider would have attached to the session.
    pub fn last_metadata(&self) -> HashMap<String, String> {
        let (user, _) = self.checkouts().pop().expect("no checkout created");
        checkout_relay::adapters::stripe::user_metadata(user)
    }
}

impl PaymentGateway for FakeGateway {
    fn fetch_balance(&self) -> ProviderFuture<'_, BalanceSnapshot> {
        let result = self.balance.clone().map_err(PaymentError::Provider);
        Box::pin(async move { result })
    }

    fn fetch_price(&self, price_id: &str) -> ProviderFuture<'_, Option<PriceRecord>> {
        let result = self.price.clone().filter(|p| p.id == price_id);
        Box::pin(async move { Ok(result) })
    }

    fn fetch_product(&self, product_id: &str) -> ProviderFuture<'_, Option<ProductRecord>> {
        let result = self.product.clone().filter(|p| p.id == product_id);
        Box::pin(async move { Ok(result) })
    }

    fn create_checkout(
        &self,
        user: DiscordUserId,
        line_items: Vec<LineItem>,
    ) -> ProviderFuture<'_, CheckoutLink> {
        self.checkouts.lock().unwrap().push((user, line_items));
        let result = self.checkout.clone().map_err(PaymentError::Provider);
        Box::pin(async move { result })
    }
}

pub fn entry(amount: i64, currency: &str) -> BalanceEntry {
    BalanceEntry {
        amount,
        currency: currency.into(),
    }
}

// ── Event payloads ─────────────────────────────────────────────────────────

pub fn event_json(event_id: &str, event_type: &str, object: serde_json::Value) -> Vec<u8> {
    serde_json::json!({
        "id": event_id,
        "object": "event",
        "type": event_type,
        "created": chrono::Utc::now().timestamp(),
        "livemode": false,
        "data": { "object": object },
    })
    .to_string()
    .into_bytes()
}

pub fn charge_failed(failure_code: &str, reason: &str, user: Option<&str>) -> Vec<u8> {
    let metadata = match user {
        Some(id) => serde_json::json!({ USER_METADATA_KEY: id }),
        None => serde_json::json!({}),
    };
    event_json(
        "evt_charge_failed",
        "charge.failed",
        serde_json::json!({
            "id": "ch_3Nx",
            "object": "charge",
            "failure_code": failure_code,
            "livemode": false,
            "outcome": { "network_status": "declined_by_network", "reason": reason },
            "metadata": metadata,
        }),
    )
}

pub fn checkout_completed(payment_status: &str, metadata: serde_json::Value) -> Vec<u8> {
    event_json(
        "evt_checkout_completed",
        "checkout.session.completed",
        serde_json::json!({
            "id": "cs_test_a1B2c3",
            "object": "checkout.session",
            "payment_status": payment_status,
            "livemode": false,
            "metadata": metadata,
            "customer_details": { "email": "buyer@example.com", "name": "Buyer" },
        }),
    )
}

/// `Stripe-Signature` header value for `payload`.
pub fn signature_header(secret: &str, timestamp: i64, payload: &[u8]) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    format!("t={timestamp},v1={}", hex::encode(mac.finalize().into_bytes()))
}

pub fn sign(payload: &[u8]) -> String {
    signature_header(SECRET, chrono::Utc::now().timestamp(), payload)
}
