//! Guest aggregate
//!
//! Hotel clients: the people reservations are made for.

pub mod model;
pub mod repository;

pub use model::{index_guests, Guest, GuestDraft, GuestIndex};
pub use repository::GuestRepository;
