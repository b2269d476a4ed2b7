//! User-facing strings.

use crate::journal::Entry;

pub const GREETING: &str = "Привет! Я твой дневник успеха. Выбери действие:";

pub const ADD_PROMPT: &str = "Напиши свою запись в формате:\n\
Достижения: <текст>\n\
Уроки: <текст>\n\
Планы: <текст>";

pub const EDIT_SELECT_PROMPT: &str = "Отправь номер записи, которую хочешь отредактировать.";
pub const EDIT_TEXT_PROMPT: &str = "Отправь новый текст для записи.";
pub const DELETE_SELECT_PROMPT: &str = "Отправь номер записи, которую хочешь удалить.";

pub const ENTRY_ADDED: &str = "Запись добавлена!";
pub const ENTRY_UPDATED: &str = "Запись обновлена!";
pub const ENTRY_DELETED: &str = "Запись удалена!";

pub const INVALID_NUMBER: &str = "Неверный номер записи. Попробуй еще раз.";
pub const NOT_A_NUMBER: &str = "Пожалуйста, отправь номер записи.";
pub const ENTRY_GONE: &str = "Эта запись больше не существует. Выбери действие заново.";

pub const NO_ENTRIES: &str = "У вас пока нет записей.";
pub const ENTRIES_HEADER: &str = "Ваши записи:";
pub const USE_MENU: &str = "Используй меню для взаимодействия с ботом.";

/// `Ваши записи:` followed by `{n}. {timestamp}: {text}` lines, or the
/// "no entries" message for an empty journal.
pub fn format_entries(entries: &[Entry]) -> String {
    if entries.is_empty() {
        return NO_ENTRIES.to_string();
    }

    let lines = entries
        .iter()
        .enumerate()
        .map(|(i, e)| format!("{}. {}: {}", i + 1, e.formatted_timestamp(), e.text))
        .collect::<Vec<_>>()
        .join("\n");

    format!("{ENTRIES_HEADER}\n{lines}")
}

/// Split `text` into chunks of at most `limit` UTF-16 units (how Telegram
/// measures message length), breaking at line boundaries. A single line longer
/// than `limit` is cut between characters.
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    let limit = limit.max(2);
    if utf16_len(text) <= limit {
        return vec![text.to_string()];
    }

    let mut out = Vec::new();
    let mut chunk = String::new();
    let mut chunk_len = 0usize;

    for line in text.split('\n') {
        let line_len = utf16_len(line);
        let sep = usize::from(!chunk.is_empty());

        if chunk_len + sep + line_len <= limit {
            if sep == 1 {
                chunk.push('\n');
            }
            chunk.push_str(line);
            chunk_len += sep + line_len;
            continue;
        }

        if !chunk.is_empty() {
            out.push(std::mem::take(&mut chunk));
            chunk_len = 0;
        }

        if line_len <= limit {
            chunk.push_str(line);
            chunk_len = line_len;
            continue;
        }

        for c in line.chars() {
            let w = c.len_utf16();
            if chunk_len + w > limit {
                out.push(std::mem::take(&mut chunk));
                chunk_len = 0;
            }
            chunk.push(c);
            chunk_len += w;
        }
    }

    if !chunk.is_empty() {
        out.push(chunk);
    }
    out
}

fn utf16_len(s: &str) -> usize {
    s.chars().map(char::len_utf16).sum()
}
