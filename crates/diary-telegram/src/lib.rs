//! Telegram adapter (teloxide).
//!
//! This crate implements the `diary-core` MessagingPort over Telegram Bot API
//! and runs the update dispatcher in polling or webhook mode.

use async_trait::async_trait;

use teloxide::{
    prelude::*,
    types::{InlineKeyboardButton, InlineKeyboardMarkup},
};

use tokio::time::sleep;

pub mod handlers;
pub mod router;

use diary_core::{
    domain::{ChatId, MessageId, MessageRef},
    errors::Error,
    messaging::{port::MessagingPort, types::Menu},
    Result,
};

/// Bot API limit for `sendMessage` / `editMessageText` text.
pub const TELEGRAM_MESSAGE_LIMIT: usize = 4096;

#[derive(Clone)]
pub struct TelegramMessenger {
    bot: Bot,
}

impl TelegramMessenger {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    fn tg_chat(chat_id: ChatId) -> teloxide::types::ChatId {
        teloxide::types::ChatId(chat_id.0)
    }

    fn tg_msg_id(message_id: MessageId) -> teloxide::types::MessageId {
        teloxide::types::MessageId(message_id.0)
    }

    fn map_err(e: teloxide::RequestError) -> Error {
        Error::External(format!("telegram error: {e}"))
    }

    async fn with_retry<T, Fut>(&self, mut op: impl FnMut() -> Fut) -> Result<T>
    where
        Fut: std::future::IntoFuture<Output = std::result::Result<T, teloxide::RequestError>>,
        Fut::IntoFuture: Send,
    {
        const MAX_RETRIES: usize = 1;
        let mut attempts = 0usize;
        loop {
            match op().await {
                Ok(v) => return Ok(v),
                Err(e) => match e {
                    teloxide::RequestError::RetryAfter(d) if attempts < MAX_RETRIES => {
                        attempts += 1;
                        tracing::warn!("telegram asked to retry after {d:?}");
                        sleep(d).await;
                        continue;
                    }
                    other => return Err(Self::map_err(other)),
                },
            }
        }
    }
}

/// One button per row, in menu order.
pub fn menu_markup(menu: &Menu) -> InlineKeyboardMarkup {
    let rows: Vec<Vec<InlineKeyboardButton>> = menu
        .items
        .iter()
        .map(|item| {
            vec![InlineKeyboardButton::callback(
                item.label.clone(),
                item.id.clone(),
            )]
        })
        .collect();
    InlineKeyboardMarkup::new(rows)
}

#[async_trait]
impl MessagingPort for TelegramMessenger {
    fn max_message_len(&self) -> usize {
        TELEGRAM_MESSAGE_LIMIT
    }

    async fn send_text(
        &self,
        chat_id: ChatId,
        text: &str,
        menu: Option<&Menu>,
    ) -> Result<MessageRef> {
        let markup = menu.map(menu_markup);
        let msg = self
            .with_retry(|| {
                let req = self.bot.send_message(Self::tg_chat(chat_id), text.to_string());
                match markup.clone() {
                    Some(m) => req.reply_markup(m),
                    None => req,
                }
            })
            .await?;

        Ok(MessageRef {
            chat_id,
            message_id: MessageId(msg.id.0),
        })
    }

    async fn edit_text(&self, msg: MessageRef, text: &str, menu: Option<&Menu>) -> Result<()> {
        let markup = menu.map(menu_markup);
        self.with_retry(|| {
            let req = self.bot.edit_message_text(
                Self::tg_chat(msg.chat_id),
                Self::tg_msg_id(msg.message_id),
                text.to_string(),
            );
            match markup.clone() {
                Some(m) => req.reply_markup(m),
                None => req,
            }
        })
        .await?;
        Ok(())
    }

    async fn answer_callback_query(&self, callback_id: &str) -> Result<()> {
        self.with_retry(|| self.bot.answer_callback_query(callback_id.to_string()))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::types::InlineKeyboardButtonKind;

    #[test]
    fn menu_renders_one_button_per_row() {
        let markup = menu_markup(&Menu::main());

        assert_eq!(markup.inline_keyboard.len(), 4);
        assert!(markup.inline_keyboard.iter().all(|row| row.len() == 1));

        let ids: Vec<String> = markup
            .inline_keyboard
            .iter()
            .map(|row| match &row[0].kind {
                InlineKeyboardButtonKind::CallbackData(data) => data.clone(),
                other => panic!("unexpected button kind: {other:?}"),
            })
            .collect();
        assert_eq!(ids, vec!["add", "show", "edit", "delete"]);
        assert_eq!(markup.inline_keyboard[0][0].text, "Добавить запись");
    }

    #[test]
    fn messenger_reports_telegram_limit() {
        let messenger = TelegramMessenger::new(Bot::new("123:test"));
        assert_eq!(messenger.max_message_len(), 4096);
    }
}
