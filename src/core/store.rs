//! The message store: in-memory log, quota-bounded persistence, read receipts.

use crate::core::message::{Message, ReadStatus, UserId};
use crate::error::{Error, Result};
use crate::storage::traits::{Storage, keys};
use uuid::Uuid;

/// Fallback log sizes tried when a full persist exceeds the storage quota.
/// After the last step fails, storage is cleared outright.
const TRIM_STEPS: [usize; 2] = [30, 10];

/// Authoritative in-memory message log, mirrored to an injected [`Storage`]
/// under a byte budget.
///
/// All failure handling is internal policy: `load` falls back to an empty
/// log, `persist` degrades through the truncation cascade, and neither ever
/// surfaces an error to the caller.
pub struct MessageStore<'a> {
    storage: &'a dyn Storage,
    messages: Vec<Message>,
    viewer: Option<UserId>,
}

impl<'a> MessageStore<'a> {
    /// Create an empty store over `storage`. Nothing is read from storage
    /// until [`load`](Self::load).
    #[must_use]
    pub fn new(storage: &'a dyn Storage) -> Self {
        Self {
            storage,
            messages: Vec::new(),
            viewer: None,
        }
    }

    /// Create a store and load any previously persisted log.
    #[must_use]
    pub fn open(storage: &'a dyn Storage) -> Self {
        let mut store = Self::new(storage);
        store.load();
        store
    }

    /// Read any previously persisted log from storage.
    ///
    /// Fails soft: a malformed payload (parse failure, entries missing
    /// required fields) is discarded with a warning and the store starts
    /// with an empty log. Timestamps are reconstructed from their ISO-8601
    /// serialized form.
    pub fn load(&mut self) {
        self.messages.clear();

        match self.storage.get(keys::MESSAGES) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Message>>(&raw) {
                Ok(messages) => self.messages = messages,
                Err(e) => {
                    eprintln!("parlor: warning: discarding malformed message log: {e}");
                }
            },
            Ok(None) => {}
            Err(e) => {
                eprintln!("parlor: warning: failed to read message log: {e}");
            }
        }
    }

    /// The currently active viewer, if any.
    #[must_use]
    pub fn viewer(&self) -> Option<UserId> {
        self.viewer
    }

    /// Append a new message and persist the log.
    ///
    /// Returns the new message's id, or `None` when the preconditions are
    /// not met (no active viewer, or neither non-blank text nor media).
    /// A violated precondition is a no-op, not an error: the shell is
    /// responsible for not offering "send" in that state.
    pub fn append(
        &mut self,
        text: &str,
        sender: UserId,
        reply_to: Option<Uuid>,
        media: Option<String>,
    ) -> Option<Uuid> {
        if self.viewer.is_none() {
            return None;
        }
        if text.trim().is_empty() && media.is_none() {
            return None;
        }

        let message = Message::new(text, sender, reply_to, media);
        let id = message.id;
        self.messages.push(message);
        self.persist();
        Some(id)
    }

    /// Make `user` the active viewer and reconcile read receipts:
    /// every message from the other seat still marked `Sent` becomes `Seen`.
    ///
    /// Idempotent. Persists only when at least one transition occurred.
    pub fn set_viewer(&mut self, user: UserId) {
        self.viewer = Some(user);

        let mut changed = false;
        for message in &mut self.messages {
            if message.sender != user && message.read_status == ReadStatus::Sent {
                message.read_status = ReadStatus::Seen;
                changed = true;
            }
        }

        if changed {
            self.persist();
        }
    }

    /// Serialize the in-memory log to storage.
    ///
    /// Quota cascade: try the full log; on quota failure keep only the most
    /// recent 30 messages, then 10; if even that fails, clear storage
    /// entirely and accept the data loss. Storage is never left partially
    /// written, and the caller never sees a failure.
    pub fn persist(&self) {
        match self.persist_tail(self.messages.len()) {
            Ok(()) => return,
            Err(Error::QuotaExceeded { .. }) => {}
            Err(e) => {
                eprintln!("parlor: warning: failed to persist messages: {e}");
                return;
            }
        }

        for keep in TRIM_STEPS {
            eprintln!("parlor: warning: storage quota hit, keeping last {keep} messages");
            match self.persist_tail(keep) {
                Ok(()) => return,
                Err(Error::QuotaExceeded { .. }) => {}
                Err(e) => {
                    eprintln!("parlor: warning: failed to persist messages: {e}");
                    return;
                }
            }
        }

        eprintln!("parlor: warning: storage quota still exceeded, clearing storage");
        if let Err(e) = self.storage.clear() {
            eprintln!("parlor: warning: failed to clear storage: {e}");
        }
    }

    /// Persist the most recent `keep` messages (a contiguous suffix).
    fn persist_tail(&self, keep: usize) -> Result<()> {
        let start = self.messages.len().saturating_sub(keep);
        let json = serde_json::to_string(&self.messages[start..])?;
        self.storage.put(keys::MESSAGES, &json)
    }

    /// Empty the in-memory log and remove the persisted copy. Irreversible;
    /// the shell obtains confirmation before calling this.
    pub fn clear(&mut self) {
        self.messages.clear();
        if let Err(e) = self.storage.remove(keys::MESSAGES) {
            eprintln!("parlor: warning: failed to remove persisted messages: {e}");
        }
    }

    /// Look up the target of a reply. A missing id (deleted or truncated
    /// away) is an absence, never an error.
    #[must_use]
    pub fn resolve_reply(&self, id: Uuid) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }

    /// The current ordered log, for rendering. Read-only.
    #[must_use]
    pub fn snapshot(&self) -> &[Message] {
        &self.messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryBackend;

    fn store_with_viewer(storage: &MemoryBackend, viewer: UserId) -> MessageStore<'_> {
        let mut store = MessageStore::open(storage);
        store.set_viewer(viewer);
        store
    }

    #[test]
    fn append_preserves_order_and_unique_ids() {
        let storage = MemoryBackend::new();
        let mut store = store_with_viewer(&storage, UserId::R);

        let mut ids = Vec::new();
        for i in 0..20 {
            ids.push(store.append(&format!("msg {i}"), UserId::R, None, None).unwrap());
        }

        let snapshot = store.snapshot();
        assert_eq!(snapshot.len(), 20);
        for (i, msg) in snapshot.iter().enumerate() {
            assert_eq!(msg.text, format!("msg {i}"));
            assert_eq!(msg.id, ids[i]);
        }

        let mut deduped = ids.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), ids.len());
    }

    #[test]
    fn append_without_viewer_is_noop() {
        let storage = MemoryBackend::new();
        let mut store = MessageStore::new(&storage);

        assert!(store.append("hi", UserId::R, None, None).is_none());
        assert!(store.snapshot().is_empty());
        // Nothing persisted either
        assert!(storage.get(keys::MESSAGES).unwrap().is_none());
    }

    #[test]
    fn append_blank_text_without_media_is_noop() {
        let storage = MemoryBackend::new();
        let mut store = store_with_viewer(&storage, UserId::R);

        assert!(store.append("   \n ", UserId::R, None, None).is_none());
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn append_blank_text_with_media_succeeds() {
        let storage = MemoryBackend::new();
        let mut store = store_with_viewer(&storage, UserId::R);

        let id = store.append("", UserId::R, None, Some("data:image/png;base64,AA==".to_string()));
        assert!(id.is_some());
        assert_eq!(store.snapshot().len(), 1);
    }

    #[test]
    fn set_viewer_marks_other_seats_messages_seen() {
        let storage = MemoryBackend::new();
        let mut store = store_with_viewer(&storage, UserId::R);
        store.append("hi", UserId::R, None, None).unwrap();

        store.set_viewer(UserId::B);

        assert_eq!(store.snapshot()[0].read_status, ReadStatus::Seen);
    }

    #[test]
    fn set_viewer_leaves_own_messages_sent() {
        let storage = MemoryBackend::new();
        let mut store = store_with_viewer(&storage, UserId::R);
        store.append("hi", UserId::R, None, None).unwrap();

        // R looking at R's own message changes nothing
        store.set_viewer(UserId::R);
        assert_eq!(store.snapshot()[0].read_status, ReadStatus::Sent);
    }

    #[test]
    fn set_viewer_is_idempotent() {
        let storage = MemoryBackend::new();
        let mut store = store_with_viewer(&storage, UserId::R);
        store.append("hi", UserId::R, None, None).unwrap();

        store.set_viewer(UserId::B);
        let after_once = store.snapshot().to_vec();

        store.set_viewer(UserId::B);
        assert_eq!(store.snapshot(), &after_once[..]);
    }

    #[test]
    fn seen_never_transitions_back() {
        let storage = MemoryBackend::new();
        let mut store = store_with_viewer(&storage, UserId::R);
        store.append("hi", UserId::R, None, None).unwrap();

        store.set_viewer(UserId::B);
        store.set_viewer(UserId::R);

        assert_eq!(store.snapshot()[0].read_status, ReadStatus::Seen);
    }

    #[test]
    fn persist_then_load_round_trips() {
        let storage = MemoryBackend::new();
        let mut store = store_with_viewer(&storage, UserId::R);
        let first = store.append("hello", UserId::R, None, None).unwrap();
        store
            .append("reply", UserId::R, Some(first), Some("data:image/png;base64,AA==".to_string()))
            .unwrap();
        let original = store.snapshot().to_vec();

        // Fresh store over the same backend
        let reloaded = MessageStore::open(&storage);
        assert_eq!(reloaded.snapshot(), &original[..]);
    }

    #[test]
    fn load_discards_malformed_payload() {
        let storage = MemoryBackend::new();
        storage.put(keys::MESSAGES, "{ not an array }").unwrap();

        let store = MessageStore::open(&storage);
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn load_discards_entries_missing_required_fields() {
        let storage = MemoryBackend::new();
        // Valid JSON array, but the entry has no sender
        storage
            .put(
                keys::MESSAGES,
                r#"[{"id":"3fa85f64-5717-4562-b3fc-2c963f66afa6","text":"hi","timestamp":"2026-01-01T00:00:00Z","readStatus":"sent"}]"#,
            )
            .unwrap();

        let store = MessageStore::open(&storage);
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn load_with_empty_storage_gives_empty_log() {
        let storage = MemoryBackend::new();
        let store = MessageStore::open(&storage);
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn quota_cascade_trims_to_thirty() {
        // Room for ~35 messages' worth of JSON: the full log of 50 fails,
        // the 30-message retry fits.
        let storage = MemoryBackend::new();
        let mut store = store_with_viewer(&storage, UserId::R);
        for i in 0..50 {
            store.append(&format!("message number {i}"), UserId::R, None, None);
        }
        let one_message = serde_json::to_string(&store.snapshot()[..1]).unwrap();

        // Capacity that fits 30 messages but not 50
        let capacity = (one_message.len() * 35) as u64;
        let limited = MemoryBackend::with_capacity(capacity);
        let mut store2 = MessageStore::new(&limited);
        store2.set_viewer(UserId::R);
        for i in 0..50 {
            store2.append(&format!("message number {i}"), UserId::R, None, None);
        }

        let persisted: Vec<Message> =
            serde_json::from_str(&limited.get(keys::MESSAGES).unwrap().unwrap()).unwrap();
        assert!(persisted.len() <= 30);
        // Contiguous suffix: the newest message is always retained
        assert_eq!(persisted.last().unwrap().text, "message number 49");
        // In-memory log keeps the full history
        assert_eq!(store2.snapshot().len(), 50);
    }

    #[test]
    fn quota_cascade_trims_to_ten() {
        let sample = Message::new("message number 00", UserId::R, None, None);
        let one_message = serde_json::to_string(&[sample]).unwrap();

        // Fits 10 messages but not 30
        let capacity = (one_message.len() * 15) as u64;
        let limited = MemoryBackend::with_capacity(capacity);
        let mut store = MessageStore::new(&limited);
        store.set_viewer(UserId::R);
        for i in 0..50 {
            store.append(&format!("message number {i:02}"), UserId::R, None, None);
        }

        let persisted: Vec<Message> =
            serde_json::from_str(&limited.get(keys::MESSAGES).unwrap().unwrap()).unwrap();
        assert!(persisted.len() <= 10);
        assert_eq!(persisted.last().unwrap().text, "message number 49");
    }

    #[test]
    fn quota_cascade_clears_storage_as_last_resort() {
        // Too small for even a single message
        let limited = MemoryBackend::with_capacity(16);
        let mut store = MessageStore::new(&limited);
        store.set_viewer(UserId::R);
        store.append("this will never fit in sixteen bytes", UserId::R, None, None);

        // Storage ends up empty, not partially written
        assert!(limited.get(keys::MESSAGES).unwrap().is_none());
        // The in-memory log still has the message
        assert_eq!(store.snapshot().len(), 1);
    }

    #[test]
    fn clear_empties_log_and_storage() {
        let storage = MemoryBackend::new();
        let mut store = store_with_viewer(&storage, UserId::R);
        store.append("hi", UserId::R, None, None).unwrap();
        assert!(storage.get(keys::MESSAGES).unwrap().is_some());

        store.clear();

        assert!(store.snapshot().is_empty());
        assert!(storage.get(keys::MESSAGES).unwrap().is_none());
    }

    #[test]
    fn resolve_reply_finds_existing_message() {
        let storage = MemoryBackend::new();
        let mut store = store_with_viewer(&storage, UserId::R);
        let id = store.append("target", UserId::R, None, None).unwrap();

        let found = store.resolve_reply(id).unwrap();
        assert_eq!(found.text, "target");
    }

    #[test]
    fn resolve_reply_missing_id_is_none() {
        let storage = MemoryBackend::new();
        let store = MessageStore::open(&storage);
        assert!(store.resolve_reply(Uuid::new_v4()).is_none());
    }

    #[test]
    fn read_receipt_scenario() {
        let storage = MemoryBackend::new();
        let mut store = store_with_viewer(&storage, UserId::R);

        // R sends "hi"
        let a = store.append("hi", UserId::R, None, None).unwrap();

        // B opens the chat: A becomes seen
        store.set_viewer(UserId::B);
        assert_eq!(store.resolve_reply(a).unwrap().read_status, ReadStatus::Seen);

        // B replies to A, then R opens the chat
        let c = store.append("yo", UserId::B, Some(a), None).unwrap();
        store.set_viewer(UserId::R);

        let c_msg = store.resolve_reply(c).unwrap();
        assert_eq!(c_msg.read_status, ReadStatus::Seen);
        assert_eq!(store.resolve_reply(a).unwrap().read_status, ReadStatus::Seen);

        // C's back-reference resolves to A
        let target = store.resolve_reply(c_msg.reply_to.unwrap()).unwrap();
        assert_eq!(target.id, a);
        assert_eq!(target.text, "hi");
    }
}
