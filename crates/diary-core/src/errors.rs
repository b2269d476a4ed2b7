/// Core error type for the diary bot.
///
/// Adapter crates map their specific errors into this type so the router can
/// tell user mistakes (re-prompt) apart from transport failures.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    /// A 0-based entry index that does not exist in the user's journal.
    #[error("entry index {index} out of range (journal has {len} entries)")]
    IndexOutOfRange { index: i64, len: usize },

    #[error("not a number: {0:?}")]
    NotANumber(String),

    #[error("external error: {0}")]
    External(String),
}

pub type Result<T> = std::result::Result<T, Error>;
