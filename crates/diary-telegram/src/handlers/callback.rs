use std::sync::Arc;

use teloxide::prelude::*;

use diary_core::{
    domain::{ChatId, MessageId, MessageRef, UserId},
    messaging::{
        port::ReplyTarget,
        types::{Interaction, InteractionKind},
    },
};

use crate::router::AppState;

use super::reply;

pub async fn handle_callback(
    _bot: Bot,
    q: CallbackQuery,
    state: Arc<AppState>,
) -> ResponseResult<()> {
    // Always answer the callback query so the client stops its spinner.
    if let Err(e) = state.messenger.answer_callback_query(&q.id).await {
        tracing::warn!("failed to answer callback query: {e}");
    }

    let Some(data) = q.data.clone().filter(|d| !d.is_empty()) else {
        return Ok(());
    };
    let user_id = UserId(q.from.id.0 as i64);

    let Some(response) = state
        .router
        .handle(Interaction {
            user_id,
            kind: InteractionKind::MenuSelect(data),
        })
        .await
    else {
        return Ok(());
    };

    // Replace the message that carried the pressed button; fall back to a new
    // message to the user's private chat when Telegram omits it.
    let target = match &q.message {
        Some(m) => ReplyTarget::Edit(MessageRef {
            chat_id: ChatId(m.chat.id.0),
            message_id: MessageId(m.id.0),
        }),
        None => ReplyTarget::NewMessage(ChatId(user_id.0)),
    };
    reply(&state, target, &response).await;

    Ok(())
}
