//! Discord side of the relay: slash commands, reply rendering and channel notifications.

pub mod commands;
pub mod embeds;
pub mod notifier;

use {
    crate::{
        config::Config,
        domain::{error::PaymentError, money::Currency, provider::PaymentGateway},
    },
    poise::serenity_prelude as serenity,
    std::sync::Arc,
    thiserror::Error,
    tracing::{error, info},
};

pub use notifier::DiscordNotifier;

/// Shared data available to every command invocation.
pub struct Data {
    pub gateway: Arc<dyn PaymentGateway>,
    pub price_id: String,
    pub balance_currency: Currency,
}

#[derive(Debug, Error)]
pub enum BotError {
    #[error("discord: {0}")]
    Discord(Box<serenity::Error>),

    #[error(transparent)]
    Payment(#[from] PaymentError),
}

impl From<serenity::Error> for BotError {
    fn from(value: serenity::Error) -> Self {
        Self::Discord(Box::new(value))
    }
}

pub type Context<'a> = poise::Context<'a, Data, BotError>;

async fn on_error(error: poise::FrameworkError<'_, Data, BotError>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!(error = %error, "failed to register commands");
            std::process::exit(1);
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!(command = %ctx.command().name, error = %error, "command failed");
            let reply = poise::CreateReply::default()
                .content("An error occurred")
                .ephemeral(true);
            if let Err(e) = ctx.send(reply).await {
                error!(error = %e, "failed to send error reply");
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!(error = %e, "error while handling error");
            }
        }
    }
}

pub fn framework(guild_id: u64, data: Data) -> poise::Framework<Data, BotError> {
    poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![commands::purchase(), commands::money()],
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!(user = %ready.user.name, "bot online");
                let guild = serenity::GuildId::new(guild_id);
                poise::builtins::register_in_guild(ctx, &framework.options().commands, guild)
                    .await?;
                info!(guild_id, "commands registered");
                Ok(data)
            })
        })
        .build()
}

/// Gateway client with the command framework attached. Not yet started.
pub async fn build_client(
    config: &Config,
    gateway: Arc<dyn PaymentGateway>,
) -> Result<serenity::Client, serenity::Error> {
    let data = Data {
        gateway,
        price_id: config.price_id.clone(),
        balance_currency: config.balance_currency,
    };

    let intents = serenity::GatewayIntents::GUILD_MEMBERS
        | serenity::GatewayIntents::GUILDS
        | serenity::GatewayIntents::DIRECT_MESSAGES;

    serenity::ClientBuilder::new(&config.bot_token, intents)
        .framework(framework(config.guild_id, data))
        .await
}
