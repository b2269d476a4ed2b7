use std::sync::Arc;

use teloxide::prelude::*;

use diary_core::{
    domain::{ChatId, UserId},
    messaging::port::ReplyTarget,
};

use crate::router::AppState;

use super::reply;

fn parse_command(text: &str) -> String {
    // Telegram may send `/cmd@botname arg1 ...`
    let first = text.split_whitespace().next().unwrap_or("");

    first
        .trim_start_matches('/')
        .split('@')
        .next()
        .unwrap_or("")
        .to_lowercase()
}

pub async fn handle_command(_bot: Bot, msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(user) = msg.from() else {
        return Ok(());
    };
    let Some(text) = msg.text() else {
        return Ok(());
    };

    let user_id = UserId(user.id.0 as i64);
    let cmd = parse_command(text);

    match cmd.as_str() {
        "start" | "help" => {
            let response = state.router.on_start(user_id).await;
            reply(&state, ReplyTarget::NewMessage(ChatId(msg.chat.id.0)), &response).await;
        }
        _ => tracing::debug!(user = %user_id, command = %cmd, "ignoring unknown command"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_slash_bot_suffix_and_args() {
        assert_eq!(parse_command("/start"), "start");
        assert_eq!(parse_command("/Start@diary_bot"), "start");
        assert_eq!(parse_command("  /help extra words"), "help");
        assert_eq!(parse_command("/"), "");
    }
}
