//! Storage backends for the shared key-value namespace.

pub mod file;
pub mod memory;
pub mod traits;

pub use file::FileBackend;
pub use memory::MemoryBackend;
pub use traits::{Storage, keys};
