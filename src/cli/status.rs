//! `parlor status` command implementation.

use crate::config::load_config;
use crate::core::{MessageStore, UserId, presence, session};
use crate::error::Result;
use std::thread;

/// Run the status command.
///
/// Shows the session identity, message count, and the typing flag. With
/// `--watch`, keeps polling the flag at the fixed 1-second interval and
/// reports changes until interrupted.
///
/// # Errors
///
/// Returns an error if the storage backend fails.
pub fn run(watch: bool) -> Result<()> {
    let config = load_config()?;
    let storage = config.open_backend()?;

    let viewer = session::current_viewer(&storage)?;
    match viewer {
        Some(user) => println!("Logged in as {user}."),
        None => println!("Not logged in."),
    }

    let store = MessageStore::open(&storage);
    println!("{} message(s) in the log.", store.snapshot().len());

    let mut typing = presence::is_other_typing(&storage)?;
    print_typing(typing, viewer.map(UserId::other));

    if !watch {
        return Ok(());
    }

    loop {
        thread::sleep(presence::POLL_INTERVAL);
        let now = presence::is_other_typing(&storage)?;
        if now != typing {
            typing = now;
            print_typing(typing, viewer.map(UserId::other));
        }
    }
}

/// Print the typing flag, naming the other seat when known.
fn print_typing(typing: bool, other: Option<UserId>) {
    let who = other.map_or_else(|| "The other user".to_string(), |u| u.to_string());
    if typing {
        println!("{who} is typing...");
    } else {
        println!("{who} is not typing.");
    }
}

#[cfg(test)]
mod tests {
    use crate::core::{UserId, presence, session};
    use crate::storage::MemoryBackend;

    #[test]
    fn typing_flag_round_trip() {
        let storage = MemoryBackend::new();
        assert!(!presence::is_other_typing(&storage).unwrap());

        presence::set_typing(&storage, true).unwrap();
        assert!(presence::is_other_typing(&storage).unwrap());
    }

    #[test]
    fn status_reads_viewer_and_flag_from_same_store() {
        let storage = MemoryBackend::new();
        session::login(&storage, UserId::R).unwrap();
        presence::set_typing(&storage, true).unwrap();

        assert_eq!(session::current_viewer(&storage).unwrap(), Some(UserId::R));
        assert!(presence::is_other_typing(&storage).unwrap());
    }
}
