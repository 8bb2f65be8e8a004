//! Staff account aggregate
//!
//! Session credential, login and registration payloads, and the
//! authentication repository interface.

pub mod model;
pub mod repository;

pub use model::{AccountDraft, Credential, LoginRequest, StaffRole};
pub use repository::AccountRepository;
