use std::{collections::HashMap, fmt};

use crate::domain::UserId;

/// What the next free-text message from a user should be interpreted as.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Idle,
    AwaitingEntryText,
    AwaitingEditIndex,
    /// Waiting for replacement text for the entry at `index` (0-based).
    AwaitingEditText {
        index: usize,
    },
    AwaitingDeleteIndex,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Idle => f.write_str("idle"),
            Mode::AwaitingEntryText => f.write_str("add"),
            Mode::AwaitingEditIndex => f.write_str("edit_select"),
            Mode::AwaitingEditText { index } => write!(f, "edit_confirm({index})"),
            Mode::AwaitingDeleteIndex => f.write_str("delete_select"),
        }
    }
}

/// Per-user conversation modes. Users without a record are `Idle`.
#[derive(Debug, Default)]
pub struct ConversationStates {
    modes: HashMap<UserId, Mode>,
}

impl ConversationStates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, user: UserId) -> Mode {
        self.modes.get(&user).copied().unwrap_or_default()
    }

    /// Overwrite the user's mode. An unfinished flow is dropped silently.
    pub fn set(&mut self, user: UserId, mode: Mode) {
        if mode == Mode::Idle {
            self.modes.remove(&user);
            return;
        }
        self.modes.insert(user, mode);
    }

    pub fn clear(&mut self, user: UserId) {
        self.modes.remove(&user);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_user_is_idle() {
        let states = ConversationStates::new();
        assert_eq!(states.get(UserId(7)), Mode::Idle);
    }

    #[test]
    fn set_overwrites_pending_index() {
        let mut states = ConversationStates::new();
        let u = UserId(1);

        states.set(u, Mode::AwaitingEditText { index: 3 });
        states.set(u, Mode::AwaitingDeleteIndex);

        assert_eq!(states.get(u), Mode::AwaitingDeleteIndex);
    }

    #[test]
    fn clear_and_idle_drop_the_record() {
        let mut states = ConversationStates::new();
        states.set(UserId(1), Mode::AwaitingEntryText);
        states.set(UserId(2), Mode::AwaitingEditIndex);
        assert_eq!(states.modes.len(), 2);

        states.clear(UserId(1));
        states.set(UserId(2), Mode::Idle);

        assert!(states.modes.is_empty());
        assert_eq!(states.get(UserId(1)), Mode::Idle);
    }

    #[test]
    fn modes_render_as_flow_names() {
        assert_eq!(Mode::AwaitingEditText { index: 0 }.to_string(), "edit_confirm(0)");
        assert_eq!(Mode::AwaitingDeleteIndex.to_string(), "delete_select");
    }
}
