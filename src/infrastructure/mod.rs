//! Infrastructure layer - external concerns

pub mod error;
pub mod http;
pub mod storage;

pub use error::InfraError;
pub use http::{ApiClient, RestGateway};
pub use storage::{FileTokenStore, InMemoryBackend, MemoryTokenStore};
