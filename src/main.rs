use {
    checkout_relay::{
        AppState,
        adapters::{discord, stripe::StripeGateway},
        config::Config,
        domain::provider::PaymentGateway,
    },
    poise::serenity_prelude as serenity,
    std::sync::Arc,
    tokio::{signal, sync::watch},
    tracing_subscriber::EnvFilter,
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    dotenvy::dotenv().ok();
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let gateway: Arc<dyn PaymentGateway> = Arc::new(StripeGateway::new(
        &config.stripe_api_key,
        config.success_url.as_str(),
    ));

    let http = Arc::new(serenity::Http::new(&config.bot_token));
    let notifier = discord::DiscordNotifier::new(
        http,
        config.channels,
        config.declined_image_url.clone(),
    );

    let state = AppState {
        stripe_webhook_secret: Arc::clone(&config.stripe_webhook_secret),
        notifier: Arc::new(notifier),
        on_notify_error: None,
    };

    let addr = ("0.0.0.0", config.port);
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(port = config.port, error = %e, "failed to bind webhook listener");
            std::process::exit(1);
        }
    };
    tracing::info!(port = config.port, "webhook server listening");

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let server = tokio::spawn(async move {
        let app = checkout_relay::router(state);
        let shutdown = async move {
            let _ = shutdown_rx.changed().await;
        };
        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
        {
            tracing::error!(error = %e, "webhook server error");
        }
    });

    let mut client = match discord::build_client(&config, gateway).await {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "failed to create Discord client");
            std::process::exit(1);
        }
    };
    let shard_manager = Arc::clone(&client.shard_manager);

    tokio::select! {
        result = client.start() => {
            if let Err(e) = result {
                tracing::error!(error = %e, "Discord client stopped");
            }
        }
        _ = shutdown_signal() => {
            shard_manager.shutdown_all().await;
        }
    }

    let _ = shutdown_tx.send(true);
    if let Err(e) = server.await {
        tracing::error!(error = %e, "webhook server task panicked");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to listen for ctrl+c");
    };

    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to listen for SIGTERM")
            .recv()
            .await;
    };

    tokio::select! {
        _ = ctrl_c => tracing::info!("received ctrl+c, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
