//! `parlor typing` command implementation.

use crate::config::load_config;
use crate::core::presence;
use crate::error::{Error, Result};

/// Run the typing command.
///
/// Sets the shared typing flag. This is the other seat's keystroke signal:
/// in the original interface the flag flips on every keypress and a 2-second
/// debounce timer clears it; at the command line, the flip is explicit.
///
/// # Errors
///
/// Returns an error if `state` is not `on` or `off`, or if the storage
/// backend fails.
pub fn run(state: &str) -> Result<()> {
    let typing = parse_state(state)?;

    let config = load_config()?;
    let storage = config.open_backend()?;

    presence::set_typing(&storage, typing)?;
    println!("Typing flag set to {typing}.");

    Ok(())
}

/// Parse an on/off argument.
fn parse_state(state: &str) -> Result<bool> {
    match state.trim().to_lowercase().as_str() {
        "on" => Ok(true),
        "off" => Ok(false),
        other => Err(Error::Config(format!(
            "expected 'on' or 'off', got '{other}'"
        ))),
    }
}
