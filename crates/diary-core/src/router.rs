//! Conversation router: turns interactions into store mutations and replies.

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::{
    conversation::{ConversationStates, Mode},
    domain::UserId,
    errors::Error,
    journal::{parse_entry_number, Entry, EntryStore},
    locks::UserLocks,
    messaging::types::{Interaction, InteractionKind, MenuChoice, Response},
    texts,
};

/// Owns the journals and per-user modes. Share it behind an `Arc`.
///
/// Every public call takes the caller's user lock for its whole duration, so a
/// double-submitted message cannot read a pending index that the first copy is
/// about to consume.
#[derive(Default)]
pub struct CommandRouter {
    store: Mutex<EntryStore>,
    states: Mutex<ConversationStates>,
    locks: UserLocks,
}

impl CommandRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatch a transport-neutral interaction.
    ///
    /// Returns `None` for menu payloads the bot does not know.
    pub async fn handle(&self, interaction: Interaction) -> Option<Response> {
        let user = interaction.user_id;
        match interaction.kind {
            InteractionKind::MenuSelect(id) => match MenuChoice::from_id(&id) {
                Some(choice) => Some(self.on_menu_select(user, choice).await),
                None => {
                    debug!(user = %user, payload = %id, "ignoring unknown menu payload");
                    None
                }
            },
            InteractionKind::Text(text) => Some(self.on_text(user, &text).await),
        }
    }

    /// `/start`: greeting plus the main menu. Leaves the mode alone.
    pub async fn on_start(&self, user: UserId) -> Response {
        debug!(user = %user, "start");
        Response::with_menu(texts::GREETING)
    }

    pub async fn on_menu_select(&self, user: UserId, choice: MenuChoice) -> Response {
        let _guard = self.locks.lock_user(user).await;

        let (next, prompt) = match choice {
            MenuChoice::Add => (Mode::AwaitingEntryText, texts::ADD_PROMPT),
            MenuChoice::Edit => (Mode::AwaitingEditIndex, texts::EDIT_SELECT_PROMPT),
            MenuChoice::Delete => (Mode::AwaitingDeleteIndex, texts::DELETE_SELECT_PROMPT),
            MenuChoice::Show => {
                let entries = self.store.lock().await.list(user);
                info!(user = %user, count = entries.len(), "show entries");
                return Response::with_menu(texts::format_entries(&entries));
            }
        };

        self.transition(user, next).await;
        Response::text(prompt)
    }

    pub async fn on_text(&self, user: UserId, text: &str) -> Response {
        let _guard = self.locks.lock_user(user).await;

        let mode = self.states.lock().await.get(user);
        match mode {
            Mode::Idle => Response::with_menu(texts::USE_MENU),
            Mode::AwaitingEntryText => {
                let entry = self.store.lock().await.append(user, text);
                info!(user = %user, at = %entry.formatted_timestamp(), "entry added");
                self.transition(user, Mode::Idle).await;
                Response::with_menu(texts::ENTRY_ADDED)
            }
            Mode::AwaitingEditIndex => {
                let len = self.store.lock().await.len(user);
                match parse_entry_number(text, len) {
                    Ok(index) => {
                        self.transition(user, Mode::AwaitingEditText { index })
                            .await;
                        Response::text(texts::EDIT_TEXT_PROMPT)
                    }
                    Err(e) => reprompt(user, mode, &e),
                }
            }
            Mode::AwaitingEditText { index } => {
                let res = self.store.lock().await.replace_text(user, index, text);
                self.transition(user, Mode::Idle).await;
                match res {
                    Ok(_) => {
                        info!(user = %user, index, "entry updated");
                        Response::with_menu(texts::ENTRY_UPDATED)
                    }
                    Err(e) => {
                        warn!(user = %user, "pending edit target vanished: {e}");
                        Response::with_menu(texts::ENTRY_GONE)
                    }
                }
            }
            Mode::AwaitingDeleteIndex => {
                let mut store = self.store.lock().await;
                let removed =
                    parse_entry_number(text, store.len(user)).and_then(|i| store.remove(user, i));
                drop(store);

                match removed {
                    Ok(_) => {
                        info!(user = %user, "entry deleted");
                        self.transition(user, Mode::Idle).await;
                        Response::with_menu(texts::ENTRY_DELETED)
                    }
                    Err(e) => reprompt(user, mode, &e),
                }
            }
        }
    }

    /// Current mode of a user (for diagnostics and tests).
    pub async fn mode(&self, user: UserId) -> Mode {
        self.states.lock().await.get(user)
    }

    pub async fn entries(&self, user: UserId) -> Vec<Entry> {
        self.store.lock().await.list(user)
    }

    async fn transition(&self, user: UserId, next: Mode) {
        let mut states = self.states.lock().await;
        let prev = states.get(user);
        states.set(user, next);
        debug!(user = %user, from = %prev, to = %next, "mode transition");
    }
}

/// Invalid index input keeps the mode and asks again.
fn reprompt(user: UserId, mode: Mode, err: &Error) -> Response {
    debug!(user = %user, mode = %mode, "re-prompt: {err}");
    match err {
        Error::NotANumber(_) => Response::text(texts::NOT_A_NUMBER),
        _ => Response::text(texts::INVALID_NUMBER),
    }
}
