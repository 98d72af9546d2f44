//! `parlor clear` command implementation.

use crate::config::load_config;
use crate::core::MessageStore;
use crate::error::Result;
use std::io::{self, BufRead, Write};

/// Run the clear command.
///
/// Deletes the whole message log, in memory and in storage. Irreversible,
/// so it asks for confirmation unless `--yes` was passed.
///
/// # Errors
///
/// Returns an error if the storage backend fails or the confirmation
/// prompt cannot be read.
pub fn run(yes: bool) -> Result<()> {
    let config = load_config()?;
    let storage = config.open_backend()?;

    let mut store = MessageStore::open(&storage);
    let count = store.snapshot().len();

    if count == 0 {
        println!("No messages to delete.");
        return Ok(());
    }

    if !yes && !confirm(count)? {
        println!("Aborted.");
        return Ok(());
    }

    store.clear();
    println!("Deleted {count} message(s).");

    Ok(())
}

/// Ask for confirmation on stdin. Anything but `y`/`yes` aborts.
fn confirm(count: usize) -> Result<bool> {
    print!("Delete all {count} message(s)? This cannot be undone. [y/N] ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;

    Ok(is_affirmative(&answer))
}

/// Interpret a confirmation answer.
fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
