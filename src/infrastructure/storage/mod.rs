//! Backends and stores that keep state locally

mod memory;
mod tokens;

pub use memory::InMemoryBackend;
pub use tokens::{FileTokenStore, MemoryTokenStore};
