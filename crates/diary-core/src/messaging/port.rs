use async_trait::async_trait;

use crate::{
    domain::{ChatId, MessageRef},
    messaging::types::{Menu, Response},
    texts::split_message,
    Result,
};

/// Cross-messenger port.
///
/// Telegram is the only implementation; the router never talks to it directly,
/// the adapter renders [`Response`] values through it.
#[async_trait]
pub trait MessagingPort: Send + Sync {
    /// Longest text a single message may carry.
    fn max_message_len(&self) -> usize;

    async fn send_text(&self, chat_id: ChatId, text: &str, menu: Option<&Menu>)
        -> Result<MessageRef>;

    /// Replace the text (and menu) of a message the bot sent earlier.
    async fn edit_text(&self, msg: MessageRef, text: &str, menu: Option<&Menu>) -> Result<()>;

    async fn answer_callback_query(&self, callback_id: &str) -> Result<()>;
}

/// Where a response should go: a fresh message, or an edit of the message
/// that carried the pressed button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplyTarget {
    NewMessage(ChatId),
    Edit(MessageRef),
}

/// Render a router response through a messenger.
///
/// Text longer than the messenger allows goes out as several messages split at
/// line boundaries: the first chunk takes `target`, the rest are sent to the
/// same chat, and only the last one carries the menu.
pub async fn deliver(
    messenger: &dyn MessagingPort,
    target: ReplyTarget,
    response: &Response,
) -> Result<()> {
    let chunks = split_message(&response.text, messenger.max_message_len());
    let last = chunks.len() - 1;

    for (i, chunk) in chunks.iter().enumerate() {
        let menu = if i == last {
            response.menu.as_ref()
        } else {
            None
        };

        match (i, target) {
            (0, ReplyTarget::Edit(msg)) => messenger.edit_text(msg, chunk, menu).await?,
            (0, ReplyTarget::NewMessage(chat_id)) => {
                messenger.send_text(chat_id, chunk, menu).await?;
            }
            (_, target) => {
                messenger.send_text(target.chat_id(), chunk, menu).await?;
            }
        }
    }
    Ok(())
}

impl ReplyTarget {
    pub fn chat_id(self) -> ChatId {
        match self {
            ReplyTarget::NewMessage(chat_id) => chat_id,
            ReplyTarget::Edit(msg) => msg.chat_id,
        }
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use std::sync::Mutex;

    use super::*;
    use crate::domain::MessageId;

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum Call {
        Send(ChatId, String, Option<Menu>),
        Edit(MessageRef, String, Option<Menu>),
        Answer(String),
    }

    pub struct FakeMessenger {
        max_len: usize,
        calls: Mutex<Vec<Call>>,
    }

    impl Default for FakeMessenger {
        fn default() -> Self {
            Self::with_limit(4096)
        }
    }

    impl FakeMessenger {
        pub fn with_limit(max_len: usize) -> Self {
            Self {
                max_len,
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MessagingPort for FakeMessenger {
        fn max_message_len(&self) -> usize {
            self.max_len
        }

        async fn send_text(
            &self,
            chat_id: ChatId,
            text: &str,
            menu: Option<&Menu>,
        ) -> Result<MessageRef> {
            let mut calls = self.calls.lock().unwrap();
            calls.push(Call::Send(chat_id, text.to_string(), menu.cloned()));
            Ok(MessageRef {
                chat_id,
                message_id: MessageId(calls.len() as i32),
            })
        }

        async fn edit_text(&self, msg: MessageRef, text: &str, menu: Option<&Menu>) -> Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::Edit(msg, text.to_string(), menu.cloned()));
            Ok(())
        }

        async fn answer_callback_query(&self, callback_id: &str) -> Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::Answer(callback_id.to_string()));
            Ok(())
        }
    }
}
