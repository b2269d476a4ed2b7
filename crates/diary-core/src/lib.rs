//! Core domain + application logic for the success diary bot.
//!
//! This crate is framework-agnostic. Telegram lives behind the messaging port
//! implemented in the adapter crate.

pub mod config;
pub mod conversation;
pub mod domain;
pub mod errors;
pub mod journal;
pub mod locks;
pub mod logging;
pub mod messaging;
pub mod router;
pub mod texts;

pub use errors::{Error, Result};
