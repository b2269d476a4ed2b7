//! Telegram update handlers.
//!
//! Each handler is a small adapter that:
//! - extracts the user and payload from the teloxide update
//! - calls into the `diary-core` router
//! - renders the response through the messenger

use std::sync::Arc;

use teloxide::{
    prelude::*,
    types::{CallbackQuery, Message},
};

use diary_core::messaging::{
    port::{deliver, ReplyTarget},
    types::Response,
};

use crate::router::AppState;

mod callback;
mod commands;
mod text;

pub async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    state: Arc<AppState>,
) -> ResponseResult<()> {
    callback::handle_callback(bot, q, state).await
}

pub async fn handle_message(bot: Bot, msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        tracing::debug!(chat_id = msg.chat.id.0, "ignoring non-text message");
        return Ok(());
    };

    if text.starts_with('/') {
        return commands::handle_command(bot, msg, state).await;
    }

    text::handle_text(bot, msg, state).await
}

/// Send a response, logging (not propagating) transport failures so one bad
/// send never takes the dispatcher down.
async fn reply(state: &AppState, target: ReplyTarget, response: &Response) {
    if let Err(e) = deliver(state.messenger.as_ref(), target, response).await {
        tracing::warn!(?target, "failed to deliver response: {e}");
    }
}
