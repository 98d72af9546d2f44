//! Storage trait definitions.

use crate::error::Result;

/// Keys used in the shared key-value namespace.
///
/// Everything parlor persists lives under these three keys. Keeping them in
/// one place stops the presence flag from colliding with the message log.
pub mod keys {
    /// Current session identity (`R` or `B`).
    pub const USER: &str = "chatUser";

    /// Serialized ordered array of message records.
    pub const MESSAGES: &str = "chatMessages";

    /// Coarse typing-presence flag, `"true"` or `"false"`.
    pub const TYPING: &str = "otherUserTyping";
}

/// String-keyed persistence capability injected into the store.
///
/// Backends enforce their own byte budget: `put` fails with
/// [`crate::Error::QuotaExceeded`] when a write would exceed it, which is
/// what drives the message-log truncation cascade.
pub trait Storage: Send + Sync {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::QuotaExceeded`] if the write would exceed the
    /// backend's byte budget, or another error if the operation fails.
    fn put(&self, key: &str, value: &str) -> Result<()>;

    /// Remove the value stored under `key`. Removing an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn remove(&self, key: &str) -> Result<()>;

    /// Remove every key this application owns.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage operation fails.
    fn clear(&self) -> Result<()>;
}
