//! Rooms and guests

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;
use validator::Validate;

use crate::application::availability::select_available;
use crate::domain::{
    Credential, DomainError, DomainResult, Guest, GuestDraft, HotelBackend, Room, RoomDraft,
};

/// Service for room and guest records
pub struct CatalogService {
    backend: Arc<dyn HotelBackend>,
}

impl CatalogService {
    pub fn new(backend: Arc<dyn HotelBackend>) -> Self {
        Self { backend }
    }

    // ── Rooms ──────────────────────────────────────────────────

    pub async fn rooms(&self, auth: &Credential) -> DomainResult<Vec<Room>> {
        self.backend.list_rooms(auth).await
    }

    /// Rooms whose current status allows a new reservation
    pub async fn eligible_rooms(&self, auth: &Credential) -> DomainResult<Vec<Room>> {
        let rooms = self.backend.list_rooms(auth).await?;
        Ok(select_available(&rooms))
    }

    /// Rooms the backend reports as free for `[start, end)`
    pub async fn free_between(
        &self,
        auth: &Credential,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DomainResult<Vec<Room>> {
        if end <= start {
            return Err(DomainError::Validation(
                "end date must be after start date".to_string(),
            ));
        }
        self.backend.list_rooms_free_between(auth, start, end).await
    }

    pub async fn room(&self, auth: &Credential, id: i64) -> DomainResult<Room> {
        self.backend.get_room(auth, id).await
    }

    pub async fn create_room(&self, auth: &Credential, draft: &RoomDraft) -> DomainResult<Room> {
        draft.validate()?;
        let room = self.backend.create_room(auth, draft).await?;
        info!(room_id = room.id, kind = %room.kind, "Room created");
        Ok(room)
    }

    pub async fn update_room(&self, auth: &Credential, id: i64, draft: &RoomDraft) -> DomainResult<Room> {
        draft.validate()?;
        let room = self.backend.update_room(auth, id, draft).await?;
        info!(room_id = id, status = %room.status, "Room updated");
        Ok(room)
    }

    pub async fn delete_room(&self, auth: &Credential, id: i64) -> DomainResult<()> {
        self.backend.delete_room(auth, id).await?;
        info!(room_id = id, "Room deleted");
        Ok(())
    }

    // ── Guests ─────────────────────────────────────────────────

    pub async fn guests(&self, auth: &Credential, search: Option<&str>) -> DomainResult<Vec<Guest>> {
        self.backend.list_guests(auth, search).await
    }

    pub async fn guest(&self, auth: &Credential, id: i64) -> DomainResult<Guest> {
        self.backend.get_guest(auth, id).await
    }

    pub async fn create_guest(&self, auth: &Credential, draft: &GuestDraft) -> DomainResult<Guest> {
        draft.validate()?;
        let guest = self.backend.create_guest(auth, draft).await?;
        info!(guest_id = guest.id, "Guest registered");
        Ok(guest)
    }

    pub async fn update_guest(&self, auth: &Credential, id: i64, draft: &GuestDraft) -> DomainResult<Guest> {
        draft.validate()?;
        let guest = self.backend.update_guest(auth, id, draft).await?;
        info!(guest_id = id, "Guest updated");
        Ok(guest)
    }

    pub async fn delete_guest(&self, auth: &Credential, id: i64) -> DomainResult<()> {
        self.backend.delete_guest(auth, id).await?;
        info!(guest_id = id, "Guest deleted");
        Ok(())
    }
}
