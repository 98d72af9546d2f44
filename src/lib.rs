//! parlor - a two-seat local chat.
//!
//! Two fixed identities, one message log, zero servers: everything persists
//! through a local key-value store, and the "other user" is the same store
//! viewed from the other seat.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod media;
pub mod storage;

pub use config::Config;
pub use error::{Error, Result};
