//! Reservation repository interface

use async_trait::async_trait;

use super::model::{Reservation, ReservationDraft, ReservationFilter};
use crate::domain::{Credential, DomainResult};

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// List reservations matching the filter (empty filter = all)
    async fn list_reservations(
        &self,
        auth: &Credential,
        filter: &ReservationFilter,
    ) -> DomainResult<Vec<Reservation>>;

    /// Find reservation by ID
    async fn get_reservation(&self, auth: &Credential, id: i64) -> DomainResult<Reservation>;

    async fn create_reservation(
        &self,
        auth: &Credential,
        draft: &ReservationDraft,
    ) -> DomainResult<Reservation>;

    async fn update_reservation(
        &self,
        auth: &Credential,
        id: i64,
        draft: &ReservationDraft,
    ) -> DomainResult<Reservation>;

    async fn delete_reservation(&self, auth: &Credential, id: i64) -> DomainResult<()>;

    /// Guest arrives: pending -> active. Legality is decided by the backend.
    async fn check_in(&self, auth: &Credential, id: i64) -> DomainResult<()>;

    /// Guest leaves: active -> finished. Legality is decided by the backend.
    async fn check_out(&self, auth: &Credential, id: i64) -> DomainResult<()>;
}
