//! Session identity persisted under the `chatUser` key.
//!
//! The viewer identity is session state owned by the shell, not by the
//! message store; the store only has it supplied via `set_viewer`.

use crate::core::message::UserId;
use crate::error::Result;
use crate::storage::traits::{Storage, keys};

/// Record `user` as the active session identity.
///
/// # Errors
///
/// Returns an error if the storage operation fails.
pub fn login(storage: &dyn Storage, user: UserId) -> Result<()> {
    storage.put(keys::USER, user.as_str())
}

/// Forget the active session identity.
///
/// # Errors
///
/// Returns an error if the storage operation fails.
pub fn logout(storage: &dyn Storage) -> Result<()> {
    storage.remove(keys::USER)
}

/// The currently logged-in viewer, if any.
///
/// An unrecognized stored value reads as "no viewer" rather than an error,
/// the same soft policy the store applies to a malformed message log.
///
/// # Errors
///
/// Returns an error if the storage operation fails.
pub fn current_viewer(storage: &dyn Storage) -> Result<Option<UserId>> {
    Ok(storage
        .get(keys::USER)?
        .and_then(|raw| raw.parse::<UserId>().ok()))
}
