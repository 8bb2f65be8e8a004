//! Room repository interface

use async_trait::async_trait;
use chrono::NaiveDate;

use super::model::{Room, RoomDraft};
use crate::domain::{Credential, DomainResult};

#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// List every room
    async fn list_rooms(&self, auth: &Credential) -> DomainResult<Vec<Room>>;

    /// Find room by ID
    async fn get_room(&self, auth: &Credential, id: i64) -> DomainResult<Room>;

    /// Rooms the backend reports as free for the whole date range
    async fn list_rooms_free_between(
        &self,
        auth: &Credential,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DomainResult<Vec<Room>>;

    async fn create_room(&self, auth: &Credential, draft: &RoomDraft) -> DomainResult<Room>;

    async fn update_room(&self, auth: &Credential, id: i64, draft: &RoomDraft)
        -> DomainResult<Room>;

    async fn delete_room(&self, auth: &Credential, id: i64) -> DomainResult<()>;
}
