//! Reservation management at the front desk

use std::sync::Arc;

use tracing::info;
use validator::Validate;

use crate::application::search::UNKNOWN_LABEL;
use crate::domain::{
    index_guests, index_rooms, Credential, DomainResult, HotelBackend, Reservation,
    ReservationAction, ReservationDraft, ReservationFilter,
};

/// Reservation with its display labels and the actions its status allows
#[derive(Debug, Clone, PartialEq)]
pub struct ReservationLine {
    pub reservation: Reservation,
    pub guest_name: String,
    pub room_label: String,
    pub actions: Vec<ReservationAction>,
}

pub struct FrontDeskService {
    backend: Arc<dyn HotelBackend>,
}

impl FrontDeskService {
    pub fn new(backend: Arc<dyn HotelBackend>) -> Self {
        Self { backend }
    }

    pub async fn list(
        &self,
        auth: &Credential,
        filter: &ReservationFilter,
    ) -> DomainResult<Vec<ReservationLine>> {
        let (reservations, guests, rooms) = tokio::try_join!(
            self.backend.list_reservations(auth, filter),
            self.backend.list_guests(auth, None),
            self.backend.list_rooms(auth),
        )?;
        let guests = index_guests(&guests);
        let rooms = index_rooms(&rooms);

        Ok(reservations
            .into_iter()
            .map(|reservation| ReservationLine {
                guest_name: guests
                    .get(&reservation.guest_id)
                    .map(|g| g.name.clone())
                    .unwrap_or_else(|| UNKNOWN_LABEL.to_string()),
                room_label: rooms
                    .get(&reservation.room_id)
                    .map(|r| r.label())
                    .unwrap_or_else(|| UNKNOWN_LABEL.to_string()),
                actions: reservation.offered_actions(),
                reservation,
            })
            .collect())
    }

    pub async fn get(&self, auth: &Credential, id: i64) -> DomainResult<Reservation> {
        self.backend.get_reservation(auth, id).await
    }

    pub async fn update(
        &self,
        auth: &Credential,
        id: i64,
        draft: &ReservationDraft,
    ) -> DomainResult<Reservation> {
        draft.validate()?;
        let updated = self.backend.update_reservation(auth, id, draft).await?;
        info!(reservation_id = id, status = %updated.status, "Reservation updated");
        Ok(updated)
    }

    pub async fn delete(&self, auth: &Credential, id: i64) -> DomainResult<()> {
        self.backend.delete_reservation(auth, id).await?;
        info!(reservation_id = id, "Reservation deleted");
        Ok(())
    }

    pub async fn check_in(&self, auth: &Credential, id: i64) -> DomainResult<()> {
        self.backend.check_in(auth, id).await?;
        info!(reservation_id = id, "Guest checked in");
        Ok(())
    }

    pub async fn check_out(&self, auth: &Credential, id: i64) -> DomainResult<()> {
        self.backend.check_out(auth, id).await?;
        info!(reservation_id = id, "Guest checked out");
        Ok(())
    }
}
