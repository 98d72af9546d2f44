//! `parlor logout` command implementation.

use crate::config::load_config;
use crate::core::session;
use crate::error::Result;

/// Run the logout command.
///
/// # Errors
///
/// Returns an error if the storage backend fails.
pub fn run() -> Result<()> {
    let config = load_config()?;
    let storage = config.open_backend()?;

    match session::current_viewer(&storage)? {
        Some(user) => {
            session::logout(&storage)?;
            println!("Logged out {user}.");
        }
        None => println!("Not logged in."),
    }

    Ok(())
}
