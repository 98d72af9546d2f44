//! `parlor send` command implementation.

use crate::config::load_config;
use crate::core::{MessageStore, presence, session};
use crate::error::{Error, Result};
use crate::media;
use std::path::Path;
use uuid::Uuid;

/// Run the send command.
///
/// Appends a message from the logged-in viewer, optionally replying to an
/// earlier message or attaching a file as inline media. Sending clears the
/// typing flag.
///
/// # Errors
///
/// Returns an error if no viewer is logged in, the reply id is malformed,
/// the media file cannot be read, or the storage backend fails.
pub fn run(text: &str, reply_to: Option<&str>, media_path: Option<&Path>) -> Result<()> {
    let config = load_config()?;
    let storage = config.open_backend()?;

    let viewer = session::current_viewer(&storage)?.ok_or(Error::NoViewer)?;

    let reply_to = match reply_to {
        Some(raw) => Some(parse_message_id(raw)?),
        None => None,
    };
    let media = match media_path {
        Some(path) => Some(media::data_url_from_file(path)?),
        None => None,
    };

    let mut store = MessageStore::open(&storage);
    store.set_viewer(viewer);

    if let Some(target) = reply_to {
        if store.resolve_reply(target).is_none() {
            // Dangling is allowed; the preview will just be empty
            println!("Note: reply target {target} is not in the log.");
        }
    }

    match store.append(text, viewer, reply_to, media) {
        Some(id) => {
            presence::set_typing(&storage, false)?;
            println!("Sent {id}.");
        }
        None => println!("Nothing to send: message is empty."),
    }

    Ok(())
}

/// Parse a message id from the command line.
fn parse_message_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| Error::InvalidMessageId(raw.to_string()))
}
