//! Room aggregate
//!
//! Contains the Room entity, its status, the create/update draft, and the
//! repository interface.

pub mod model;
pub mod repository;

pub use model::{index_rooms, Room, RoomDraft, RoomIndex, RoomStatus};
pub use repository::RoomRepository;
