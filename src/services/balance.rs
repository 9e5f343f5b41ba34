use crate::domain::{
    error::PaymentError,
    money::{Currency, format_cents},
    provider::{BalanceSnapshot, PaymentGateway},
};

/// Sum of available and pending funds in `currency`, in minor units.
pub fn total_in(snapshot: &BalanceSnapshot, currency: Currency) -> i64 {
    snapshot
        .available
        .iter()
        .chain(&snapshot.pending)
        .filter(|entry| entry.currency.eq_ignore_ascii_case(currency.as_str()))
        .map(|entry| entry.amount)
        .sum()
}

pub fn balance_message(total_cents: i64, currency: Currency) -> String {
    format!(
        "There is currently {} in the Stripe account.",
        format_cents(total_cents, currency)
    )
}

pub async fn current_balance(
    gateway: &dyn PaymentGateway,
    currency: Currency,
) -> Result<i64, PaymentError> {
    let snapshot = gateway.fetch_balance().await?;
    Ok(total_in(&snapshot, currency))
}
