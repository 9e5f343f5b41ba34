use {
    crate::{
        domain::{
            error::PurchaseError,
            id::DiscordUserId,
            notify::{CompletedCheckout, DeclinedCharge},
        },
        services::storefront::PurchaseOffer,
    },
    poise::serenity_prelude as serenity,
};

pub const GENERIC_ERROR: &str = "An error occurred, try again!";

pub fn code_block(text: &str) -> String {
    format!("```\n{text}\n```")
}

/// Third `_`-separated segment of a session id (`cs_test_<this>`), or the
/// whole id when it has fewer segments.
pub fn short_checkout_id(session_id: &str) -> &str {
    session_id.split('_').nth(2).unwrap_or(session_id)
}

fn mode_footer(livemode: bool) -> serenity::CreateEmbedFooter {
    serenity::CreateEmbedFooter::new(if livemode {
        "This is a real transaction"
    } else {
        "This is a test transaction"
    })
}

pub fn purchase_embed(offer: &PurchaseOffer) -> serenity::CreateEmbed {
    let price = offer
        .price
        .map(|money| money.to_string())
        .unwrap_or_else(|| "unavailable".to_string());

    serenity::CreateEmbed::new()
        .title("Purchase")
        .description("I have created a checkout session via Stripe with the following items:")
        .field(&offer.product_name, format!("Price: {price}"), false)
        .colour(serenity::Colour::BLURPLE)
}

pub fn checkout_button_row(url: &str) -> serenity::CreateActionRow {
    serenity::CreateActionRow::Buttons(vec![
        serenity::CreateButton::new_link(url)
            .label("Checkout")
            .emoji('💳'),
    ])
}

pub fn purchase_reply(offer: &PurchaseOffer) -> poise::CreateReply {
    poise::CreateReply::default()
        .embed(purchase_embed(offer))
        .components(vec![checkout_button_row(&offer.checkout_url)])
}

/// Reply for the `purchase` command. Failures get a plain message and no button.
pub fn purchase_response(result: &Result<PurchaseOffer, PurchaseError>) -> poise::CreateReply {
    match result {
        Ok(offer) => purchase_reply(offer),
        Err(_) => poise::CreateReply::default().content(GENERIC_ERROR),
    }
}

pub fn declined_content(user_id: DiscordUserId) -> String {
    format!("<@{user_id}>'s card was declined for insufficient funds.")
}

pub fn declined_embed(
    charge: &DeclinedCharge,
    username: &str,
    image_url: Option<&str>,
) -> serenity::CreateEmbed {
    let embed = serenity::CreateEmbed::new()
        .title("Payment declined")
        .description("Here are the details for the declined payment")
        .field("Decline reason", code_block("Insufficient funds"), false)
        .field(
            "Discord",
            code_block(&format!("{username} ({})", charge.user_id)),
            false,
        )
        .footer(mode_footer(charge.livemode))
        .colour(serenity::Colour::RED);

    match image_url {
        Some(url) => embed.image(url),
        None => embed,
    }
}

pub fn completed_embed(checkout: &CompletedCheckout, username: &str) -> serenity::CreateEmbed {
    serenity::CreateEmbed::new()
        .title("Checkout Complete")
        .field(
            "User",
            code_block(&format!("{username} ({})", checkout.user_id)),
            false,
        )
        .field(
            "Checkout ID",
            code_block(short_checkout_id(&checkout.session_id)),
            false,
        )
        .field(
            "Customer Email",
            code_block(checkout.customer_email.as_deref().unwrap_or("Failed to get")),
            false,
        )
        .field("Status", code_block("complete"), true)
        .footer(mode_footer(checkout.livemode))
        .timestamp(serenity::Timestamp::now())
        .colour(serenity::Colour::BLURPLE)
}
