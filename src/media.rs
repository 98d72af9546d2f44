//! Inline media encoding.
//!
//! Attachments travel inside the message record as data URLs
//! (`data:<mime>;base64,...`), so the store never has to manage files of
//! its own. The payload is opaque to the store.

use crate::error::Result;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use std::path::Path;

/// Media types recognized by extension. Anything else is sent as a generic
/// binary payload.
const MIME_BY_EXTENSION: [(&str, &str); 6] = [
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("svg", "image/svg+xml"),
];

/// Read a file and encode it as a data URL.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn data_url_from_file(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    let mime = guess_mime(path);
    Ok(format!("data:{mime};base64,{}", STANDARD.encode(bytes)))
}

/// Guess a mime type from the file extension.
fn guess_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some(ext) => MIME_BY_EXTENSION
            .iter()
            .find(|(e, _)| *e == ext)
            .map_or("application/octet-stream", |(_, mime)| mime),
        None => "application/octet-stream",
    }
}
