use std::sync::Arc;

use teloxide::prelude::*;

use diary_core::{
    domain::{ChatId, UserId},
    messaging::port::ReplyTarget,
};

use crate::router::AppState;

use super::reply;

pub async fn handle_text(_bot: Bot, msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(user) = msg.from() else {
        return Ok(());
    };
    let Some(text) = msg.text() else {
        return Ok(());
    };

    let user_id = UserId(user.id.0 as i64);
    tracing::debug!(user = %user_id, "text message");

    let response = state.router.on_text(user_id, text).await;
    reply(&state, ReplyTarget::NewMessage(ChatId(msg.chat.id.0)), &response).await;
    Ok(())
}
