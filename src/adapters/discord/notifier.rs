use {
    super::embeds,
    crate::{
        config::NotificationChannels,
        domain::{
            error::NotifyError,
            id::DiscordUserId,
            notify::{CompletedCheckout, DeclinedCharge, Notifier, NotifyFuture},
        },
    },
    poise::serenity_prelude as serenity,
    std::sync::Arc,
};

/// Posts payment notifications to fixed channels over the Discord REST API.
pub struct DiscordNotifier {
    http: Arc<serenity::Http>,
    channels: NotificationChannels,
    declined_image_url: Option<String>,
}

impl DiscordNotifier {
    pub fn new(
        http: Arc<serenity::Http>,
        channels: NotificationChannels,
        declined_image_url: Option<String>,
    ) -> Self {
        Self {
            http,
            channels,
            declined_image_url,
        }
    }

    async fn username(&self, user_id: DiscordUserId) -> Result<String, NotifyError> {
        serenity::UserId::new(user_id.get())
            .to_user(&self.http)
            .await
            .map(|user| user.name)
            .map_err(|e| NotifyError::UserLookup {
                user_id: user_id.get(),
                reason: e.to_string(),
            })
    }

    async fn post(&self, channel_id: u64, message: serenity::CreateMessage) -> Result<(), NotifyError> {
        serenity::ChannelId::new(channel_id)
            .send_message(&self.http, message)
            .await
            .map(|_| ())
            .map_err(|e| NotifyError::Delivery {
                channel_id,
                reason: e.to_string(),
            })
    }

    async fn card_declined_inner(&self, charge: &DeclinedCharge) -> Result<(), NotifyError> {
        let username = self.username(charge.user_id).await?;
        let message = serenity::CreateMessage::new()
            .content(embeds::declined_content(charge.user_id))
            .embed(embeds::declined_embed(
                charge,
                &username,
                self.declined_image_url.as_deref(),
            ));
        self.post(self.channels.declined, message).await
    }

    async fn checkout_completed_inner(&self, checkout: &CompletedCheckout) -> Result<(), NotifyError> {
        let username = self.username(checkout.user_id).await?;
        let message =
            serenity::CreateMessage::new().embed(embeds::completed_embed(checkout, &username));
        self.post(self.channels.completed, message).await
    }
}

impl Notifier for DiscordNotifier {
    fn card_declined(&self, charge: &DeclinedCharge) -> NotifyFuture<'_> {
        let charge = charge.clone();
        Box::pin(async move { self.card_declined_inner(&charge).await })
    }

    fn checkout_completed(&self, checkout: &CompletedCheckout) -> NotifyFuture<'_> {
        let checkout = checkout.clone();
        Box::pin(async move { self.checkout_completed_inner(&checkout).await })
    }
}
