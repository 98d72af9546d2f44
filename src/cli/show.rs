//! `parlor show` command implementation.

use crate::config::load_config;
use crate::core::{Message, MessageStore, ReadStatus, UserId, presence, session};
use crate::error::{Error, Result};
use chrono::{DateTime, Local, Utc};

/// Maximum length for reply previews.
const REPLY_PREVIEW_LEN: usize = 50;

/// Run the show command.
///
/// Renders the full log for the logged-in viewer. Viewing is what drives
/// read receipts: every message from the other seat still marked sent
/// becomes seen, and the transition is persisted.
///
/// # Errors
///
/// Returns an error if no viewer is logged in or the storage backend fails.
pub fn run() -> Result<()> {
    let config = load_config()?;
    let storage = config.open_backend()?;

    let viewer = session::current_viewer(&storage)?.ok_or(Error::NoViewer)?;

    let mut store = MessageStore::open(&storage);
    store.set_viewer(viewer);

    if store.snapshot().is_empty() {
        println!("No messages yet. Chat as {viewer}.");
        return Ok(());
    }

    println!("Chat as {viewer}");
    println!("{}", "─".repeat(72));

    for message in store.snapshot() {
        if let Some(target) = message.reply_to {
            println!("    ↳ {}", reply_line(&store, target));
        }
        println!("{}", format_line(message, viewer));
        println!("    id {}", message.id);
    }

    println!("{}", "─".repeat(72));
    println!("{} message(s)", store.snapshot().len());

    if presence::is_other_typing(&storage)? {
        println!("{} is typing...", viewer.other());
    }

    Ok(())
}

/// Render one message row.
fn format_line(message: &Message, viewer: UserId) -> String {
    let time = format_local_time(message.timestamp);
    let ticks = if message.sender == viewer {
        match message.read_status {
            ReadStatus::Sent => " ✓",
            ReadStatus::Seen => " ✓✓",
        }
    } else {
        ""
    };
    let media_marker = if message.media.is_some() { " [image]" } else { "" };

    format!("[{time}] {}{ticks}: {}{media_marker}", message.sender, message.text)
}

/// Preview for a reply back-reference, looked up through the store so a
/// dangling target reads as a deleted message rather than an error.
fn reply_line(store: &MessageStore<'_>, target: uuid::Uuid) -> String {
    store
        .resolve_reply(target)
        .map_or_else(|| "(deleted message)".to_string(), reply_preview)
}

/// First line of a reply target, truncated for display.
fn reply_preview(message: &Message) -> String {
    if message.text.is_empty() && message.media.is_some() {
        return "[image]".to_string();
    }

    let first_line = message.text.lines().next().unwrap_or(&message.text);
    if first_line.chars().count() > REPLY_PREVIEW_LEN {
        let truncated: String = first_line.chars().take(REPLY_PREVIEW_LEN).collect();
        format!("{truncated}...")
    } else {
        first_line.to_string()
    }
}

/// Format UTC time as local time for display.
fn format_local_time(utc: DateTime<Utc>) -> String {
    let local: DateTime<Local> = utc.into();
    local.format("%Y-%m-%d %H:%M").to_string()
}
