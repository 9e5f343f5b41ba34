use {
    crate::domain::money::Currency,
    std::{env, sync::Arc},
    thiserror::Error,
};

pub const DEFAULT_PORT: u16 = 80;
pub const DEFAULT_DECLINED_CHANNEL: u64 = 1127230797154357268;
pub const DEFAULT_COMPLETED_CHANNEL: u64 = 1126722789966086154;
pub const DEFAULT_SUCCESS_URL: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variables: {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("invalid {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Where payment notifications are posted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationChannels {
    pub declined: u64,
    pub completed: u64,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: String,
    pub guild_id: u64,
    pub price_id: String,
    pub stripe_api_key: String,
    pub stripe_webhook_secret: Arc<str>,
    pub port: u16,
    pub channels: NotificationChannels,
    pub success_url: String,
    pub balance_currency: Currency,
    pub declined_image_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. Every required variable is checked before
    /// failing so the error names all of them at once.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let required = [
            "BOT_TOKEN",
            "GUILD_ID",
            "PRICE_ID",
            "STRIPE_API_KEY",
            "STRIPE_WEBHOOK_SECRET",
        ];
        let missing: Vec<&'static str> = required
            .into_iter()
            .filter(|key| get(*key).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing(vec![key]));

        let balance_currency = match get("BALANCE_CURRENCY") {
            Some(code) => Currency::try_from(code.as_str()).map_err(|e| ConfigError::Invalid {
                var: "BALANCE_CURRENCY",
                reason: e.to_string(),
            })?,
            None => Currency::Nzd,
        };

        Ok(Self {
            bot_token: require("BOT_TOKEN")?,
            guild_id: parse_var("GUILD_ID", &require("GUILD_ID")?)?,
            price_id: require("PRICE_ID")?,
            stripe_api_key: require("STRIPE_API_KEY")?,
            stripe_webhook_secret: require("STRIPE_WEBHOOK_SECRET")?.into(),
            port: get("WEBHOOK_PORT")
                .map(|v| parse_var("WEBHOOK_PORT", &v))
                .transpose()?
                .unwrap_or(DEFAULT_PORT),
            channels: NotificationChannels {
                declined: get("DECLINED_CHANNEL_ID")
                    .map(|v| parse_var("DECLINED_CHANNEL_ID", &v))
                    .transpose()?
                    .unwrap_or(DEFAULT_DECLINED_CHANNEL),
                completed: get("COMPLETED_CHANNEL_ID")
                    .map(|v| parse_var("COMPLETED_CHANNEL_ID", &v))
                    .transpose()?
                    .unwrap_or(DEFAULT_COMPLETED_CHANNEL),
            },
            success_url: get("CHECKOUT_SUCCESS_URL")
                .unwrap_or_else(|| DEFAULT_SUCCESS_URL.to_string()),
            balance_currency,
            declined_image_url: get("DECLINED_IMAGE_URL"),
        })
    }
}

fn parse_var<T>(var: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        var,
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    const REQUIRED: &[(&str, &str)] = &[
        ("BOT_TOKEN", "token"),
        ("GUILD_ID", "1126722789966086100"),
        ("PRICE_ID", "price_123"),
        ("STRIPE_API_KEY", "sk_test_123"),
        ("STRIPE_WEBHOOK_SECRET", "whsec_123"),
    ];

    #[test]
    fn defaults_apply() {
        let config = Config::from_lookup(lookup(REQUIRED)).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.channels.declined, DEFAULT_DECLINED_CHANNEL);
        assert_eq!(config.channels.completed, DEFAULT_COMPLETED_CHANNEL);
        assert_eq!(config.balance_currency, Currency::Nzd);
        assert_eq!(config.success_url, DEFAULT_SUCCESS_URL);
        assert_eq!(&*config.stripe_webhook_secret, "whsec_123");
        assert!(config.declined_image_url.is_none());
    }

    #[test]
    fn reports_every_missing_variable() {
        let err = Config::from_lookup(lookup(&[("BOT_TOKEN", "token")])).unwrap_err();
        let missing = match err {
            ConfigError::Missing(missing) => missing,
            other => panic!("expected Missing, got {other:?}"),
        };
        assert_eq!(
            missing,
            vec!["GUILD_ID", "PRICE_ID", "STRIPE_API_KEY", "STRIPE_WEBHOOK_SECRET"]
        );
    }

    #[test]
    fn blank_values_count_as_missing() {
        let mut pairs = REQUIRED.to_vec();
        pairs[0] = ("BOT_TOKEN", "  ");
        let err = Config::from_lookup(lookup(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::Missing(ref m) if m == &vec!["BOT_TOKEN"]));
    }

    #[test]
    fn invalid_guild_id_rejected() {
        let mut pairs = REQUIRED.to_vec();
        pairs[1] = ("GUILD_ID", "not-a-number");
        let err = Config::from_lookup(lookup(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "GUILD_ID", .. }));
    }

    #[test]
    fn overrides_are_read() {
        let mut pairs = REQUIRED.to_vec();
        pairs.extend([
            ("WEBHOOK_PORT", "8080"),
            ("DECLINED_CHANNEL_ID", "11"),
            ("COMPLETED_CHANNEL_ID", "22"),
            ("BALANCE_CURRENCY", "USD"),
            ("DECLINED_IMAGE_URL", "https://example.com/declined.gif"),
        ]);
        let config = Config::from_lookup(lookup(&pairs)).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(
            config.channels,
            NotificationChannels {
                declined: 11,
                completed: 22
            }
        );
        assert_eq!(config.balance_currency, Currency::Usd);
        assert_eq!(
            config.declined_image_url.as_deref(),
            Some("https://example.com/declined.gif")
        );
    }
}
