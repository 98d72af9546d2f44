//! `parlor login` command implementation.

use crate::config::load_config;
use crate::core::UserId;
use crate::core::session;
use crate::error::Result;

/// Run the login command.
///
/// Records the chosen identity as the active session. Logging in as the
/// other seat is how the "second user" of this chat exists at all.
///
/// # Errors
///
/// Returns an error if the identity is not `R` or `B`, or if the storage
/// backend fails.
pub fn run(user: &str) -> Result<()> {
    let config = load_config()?;
    let storage = config.open_backend()?;
    let user: UserId = user.parse()?;

    session::login(&storage, user)?;
    println!("Logged in as {user}.");

    Ok(())
}
