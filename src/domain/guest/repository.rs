//! Guest repository interface

use async_trait::async_trait;

use super::model::{Guest, GuestDraft};
use crate::domain::{Credential, DomainResult};

#[async_trait]
pub trait GuestRepository: Send + Sync {
    /// List guests, optionally narrowed by the backend's free-text search
    async fn list_guests(&self, auth: &Credential, search: Option<&str>)
        -> DomainResult<Vec<Guest>>;

    async fn get_guest(&self, auth: &Credential, id: i64) -> DomainResult<Guest>;

    async fn create_guest(&self, auth: &Credential, draft: &GuestDraft) -> DomainResult<Guest>;

    async fn update_guest(&self, auth: &Credential, id: i64, draft: &GuestDraft)
        -> DomainResult<Guest>;

    async fn delete_guest(&self, auth: &Credential, id: i64) -> DomainResult<()>;
}
