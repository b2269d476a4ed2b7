//! Transport-neutral interaction types and the messenger port.

pub mod port;
pub mod types;
