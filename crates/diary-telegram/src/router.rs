use std::{convert::Infallible, net::SocketAddr, sync::Arc};

use axum::routing::get;
use teloxide::{
    dispatching::{Dispatcher, UpdateHandler},
    dptree,
    error_handlers::LoggingErrorHandler,
    prelude::*,
    update_listeners::{webhooks, UpdateListener},
};
use tracing::{error, info};
use url::Url;

use diary_core::{
    config::{Config, Transport},
    messaging::port::MessagingPort,
    router::CommandRouter,
};

use crate::handlers;
use crate::TelegramMessenger;

#[derive(Clone)]
pub struct AppState {
    pub router: Arc<CommandRouter>,
    pub messenger: Arc<dyn MessagingPort>,
}

fn schema() -> UpdateHandler<teloxide::RequestError> {
    dptree::entry()
        .branch(Update::filter_callback_query().endpoint(handlers::handle_callback))
        .branch(Update::filter_message().endpoint(handlers::handle_message))
}

/// Run the bot until the transport stops.
pub async fn run(cfg: Arc<Config>, router: Arc<CommandRouter>) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.telegram_token.clone());

    match bot.get_me().await {
        Ok(me) => info!(username = %me.username(), "diary bot started"),
        Err(e) => error!("getMe failed (is TELEGRAM_TOKEN valid?): {e}"),
    }
    info!(transport = cfg.transport.name(), "starting update listener");

    let messenger: Arc<dyn MessagingPort> = Arc::new(TelegramMessenger::new(bot.clone()));
    let state = Arc::new(AppState { router, messenger });

    let mut dispatcher = Dispatcher::builder(bot.clone(), schema())
        .dependencies(dptree::deps![state])
        .default_handler(|upd| async move {
            tracing::debug!(update_id = upd.id, "unhandled update");
        })
        .build();

    match &cfg.transport {
        Transport::Polling => dispatcher.dispatch().await,
        Transport::Webhook { url, listen_addr } => {
            let listener = serve_webhook(bot, url.clone(), *listen_addr).await?;
            dispatcher
                .dispatch_with_listener(
                    listener,
                    LoggingErrorHandler::with_custom_text("An error from the update listener"),
                )
                .await;
        }
    }

    info!("dispatcher stopped");
    Ok(())
}

/// Register the webhook with Telegram and serve it, plus `GET /health`, on
/// `listen_addr`.
async fn serve_webhook(
    bot: Bot,
    url: Url,
    listen_addr: SocketAddr,
) -> anyhow::Result<impl UpdateListener<Err = Infallible>> {
    let options = webhooks::Options::new(listen_addr, url.clone());
    let (mut listener, stop_flag, app) = webhooks::axum_to_router(bot, options).await?;
    let app = app.route("/health", get(health));

    let stop_token = listener.stop_token();
    tokio::spawn(async move {
        let served = axum::Server::bind(&listen_addr)
            .serve(app.into_make_service())
            .with_graceful_shutdown(stop_flag)
            .await;
        if let Err(e) = served {
            error!("webhook server failed: {e}");
            stop_token.stop();
        }
    });

    info!(%listen_addr, %url, "webhook listening");
    Ok(listener)
}

async fn health() -> &'static str {
    "ok"
}
