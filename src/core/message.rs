//! Message and identity types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// One of the two fixed chat identities.
///
/// Deliberately a closed two-variant enum, not a general identity system:
/// the chat has exactly two seats.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum UserId {
    /// User R.
    R,
    /// User B.
    B,
}

impl UserId {
    /// The other seat at the table.
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Self::R => Self::B,
            Self::B => Self::R,
        }
    }

    /// Identity as its persisted single-letter form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::R => "R",
            Self::B => "B",
        }
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserId {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "R" | "r" => Ok(Self::R),
            "B" | "b" => Ok(Self::B),
            other => Err(crate::Error::UnknownUser(other.to_string())),
        }
    }
}

/// Delivery state of a message, as shown by its ticks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReadStatus {
    /// Persisted, not yet observed by the other seat.
    Sent,

    /// Observed by a viewer other than the sender. Terminal.
    Seen,
}

/// A single chat message.
///
/// Immutable once created, except `read_status` which moves `Sent` -> `Seen`
/// exactly once. Field names on the wire are camelCase to match the persisted
/// layout (`readStatus`, `replyTo`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Unique identifier, assigned at creation, never reused.
    pub id: Uuid,

    /// Text content; may be empty when `media` is present.
    pub text: String,

    /// Which seat sent the message.
    pub sender: UserId,

    /// Creation instant, fixed at creation time.
    pub timestamp: DateTime<Utc>,

    /// Read-receipt state.
    pub read_status: ReadStatus,

    /// Back-reference to an earlier message. Dangling is fine: the target
    /// may have been truncated away, which resolves to "no preview".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<Uuid>,

    /// Inline-encoded media payload (a data URL), opaque to the store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<String>,
}

impl Message {
    /// Create a new message with a fresh id, `Sent` status, and the current
    /// time as its timestamp.
    #[must_use]
    pub fn new(
        text: &str,
        sender: UserId,
        reply_to: Option<Uuid>,
        media: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.to_string(),
            sender,
            timestamp: Utc::now(),
            read_status: ReadStatus::Sent,
            reply_to,
            media,
        }
    }
}
