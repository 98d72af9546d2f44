//! Typing-presence flag shared through the `otherUserTyping` key.
//!
//! A coarse signal with no delivery guarantee: one seat writes the flag,
//! the other polls it. The message store is not involved; this module only
//! shares the storage namespace.

use crate::error::Result;
use crate::storage::traits::{Storage, keys};
use std::time::Duration;

/// How often the shell polls the flag.
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Set or clear the typing flag.
///
/// # Errors
///
/// Returns an error if the storage operation fails.
pub fn set_typing(storage: &dyn Storage, typing: bool) -> Result<()> {
    storage.put(keys::TYPING, if typing { "true" } else { "false" })
}

/// Whether the other seat is currently typing.
///
/// Anything other than the literal string `"true"` reads as false.
///
/// # Errors
///
/// Returns an error if the storage operation fails.
pub fn is_other_typing(storage: &dyn Storage) -> Result<bool> {
    Ok(storage.get(keys::TYPING)?.as_deref() == Some("true"))
}
