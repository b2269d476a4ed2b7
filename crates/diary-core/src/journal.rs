//! In-memory journal storage.
//!
//! Every user owns one ordered [`Journal`]. Indices in this module are 0-based;
//! the 1-based numbers users type are converted with [`parse_entry_number`].

use std::{collections::HashMap, num::IntErrorKind};

use chrono::{DateTime, Local};

use crate::{domain::UserId, errors::Error, Result};

/// Display format for entry timestamps (minute resolution, local time).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub timestamp: DateTime<Local>,
    pub text: String,
}

impl Entry {
    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }
}

/// Ordered entries of a single user. Insertion order is display order.
#[derive(Clone, Debug)]
pub struct Journal {
    pub owner: UserId,
    pub entries: Vec<Entry>,
}

impl Journal {
    fn new(owner: UserId) -> Self {
        Self {
            owner,
            entries: Vec::new(),
        }
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.entries.len() {
            return Ok(());
        }
        Err(Error::IndexOutOfRange {
            index: index as i64,
            len: self.entries.len(),
        })
    }
}

#[derive(Debug, Default)]
pub struct EntryStore {
    journals: HashMap<UserId, Journal>,
}

impl EntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, user: UserId, text: &str) -> Entry {
        self.append_at(user, text, Local::now())
    }

    pub fn append_at(&mut self, user: UserId, text: &str, at: DateTime<Local>) -> Entry {
        let entry = Entry {
            timestamp: at,
            text: text.to_string(),
        };
        self.journals
            .entry(user)
            .or_insert_with(|| Journal::new(user))
            .entries
            .push(entry.clone());
        entry
    }

    pub fn list(&self, user: UserId) -> Vec<Entry> {
        self.journals
            .get(&user)
            .map(|j| j.entries.clone())
            .unwrap_or_default()
    }

    pub fn len(&self, user: UserId) -> usize {
        self.journals.get(&user).map(|j| j.entries.len()).unwrap_or(0)
    }

    /// Overwrite the text of an entry; its timestamp is preserved.
    pub fn replace_text(&mut self, user: UserId, index: usize, text: &str) -> Result<Entry> {
        let Some(journal) = self.journals.get_mut(&user) else {
            return Err(Error::IndexOutOfRange {
                index: index as i64,
                len: 0,
            });
        };
        journal.check_index(index)?;

        let entry = &mut journal.entries[index];
        entry.text = text.to_string();
        Ok(entry.clone())
    }

    /// Remove an entry; later entries shift down by one.
    pub fn remove(&mut self, user: UserId, index: usize) -> Result<Entry> {
        let Some(journal) = self.journals.get_mut(&user) else {
            return Err(Error::IndexOutOfRange {
                index: index as i64,
                len: 0,
            });
        };
        journal.check_index(index)?;

        Ok(journal.entries.remove(index))
    }
}

/// Convert a user-typed 1-based entry number into a 0-based index.
///
/// Surrounding whitespace and a leading `+` are accepted. Anything that is not
/// an integer is `NotANumber`; integers outside `1..=len` are `IndexOutOfRange`.
pub fn parse_entry_number(text: &str, len: usize) -> Result<usize> {
    let number = match text.trim().parse::<i64>() {
        Ok(n) => n,
        // Still an integer, just one no journal could ever reach.
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => {
            return Err(Error::IndexOutOfRange {
                index: i64::MAX,
                len,
            })
        }
        Err(e) if *e.kind() == IntErrorKind::NegOverflow => {
            return Err(Error::IndexOutOfRange {
                index: i64::MIN,
                len,
            })
        }
        Err(_) => return Err(Error::NotANumber(text.to_string())),
    };

    let index = number.saturating_sub(1);
    if number < 1 || index as u64 >= len as u64 {
        return Err(Error::IndexOutOfRange { index, len });
    }
    Ok(index as usize)
}
