//! Core chat types and store logic.

pub mod message;
pub mod presence;
pub mod session;
pub mod store;

pub use message::{Message, ReadStatus, UserId};
pub use store::MessageStore;
