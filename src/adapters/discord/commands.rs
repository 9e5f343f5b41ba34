use {
    super::{BotError, Context, embeds},
    crate::{
        domain::id::DiscordUserId,
        services::{balance, storefront},
    },
};

/// Purchase the script using Stripe.
#[poise::command(slash_command, ephemeral)]
pub async fn purchase(ctx: Context<'_>) -> Result<(), BotError> {
    ctx.defer_ephemeral().await?;

    let data = ctx.data();
    let user = DiscordUserId::new(ctx.author().id.get())?;

    let result = storefront::prepare_purchase(data.gateway.as_ref(), &data.price_id, user).await;
    if let Err(e) = &result {
        tracing::warn!(error = %e, user_id = %user, "purchase aborted");
    }

    ctx.send(embeds::purchase_response(&result)).await?;
    Ok(())
}

/// Check how much is in the Stripe account.
#[poise::command(slash_command)]
pub async fn money(ctx: Context<'_>) -> Result<(), BotError> {
    ctx.defer().await?;

    let data = ctx.data();
    match balance::current_balance(data.gateway.as_ref(), data.balance_currency).await {
        Ok(total) => {
            ctx.say(balance::balance_message(total, data.balance_currency))
                .await?;
        }
        // No reply on failure.
        Err(e) => tracing::warn!(error = %e, "balance lookup failed"),
    }
    Ok(())
}
