//! New reservation workflow

use std::sync::Arc;

use tracing::{debug, info, warn};
use validator::Validate;

use crate::application::availability::select_available;
use crate::domain::{
    Credential, DomainError, DomainResult, Guest, HotelBackend, Reservation, ReservationDraft, Room,
};

/// Choices offered by the booking form
#[derive(Debug, Clone, Default)]
pub struct BookingForm {
    pub guests: Vec<Guest>,
    /// Only rooms that are currently available
    pub rooms: Vec<Room>,
}

/// Service for creating reservations
pub struct BookingService {
    backend: Arc<dyn HotelBackend>,
}

impl BookingService {
    pub fn new(backend: Arc<dyn HotelBackend>) -> Self {
        Self { backend }
    }

    /// Load guests and rooms concurrently and keep the bookable rooms.
    pub async fn load_form(&self, auth: &Credential) -> DomainResult<BookingForm> {
        let (guests, rooms) = tokio::try_join!(
            self.backend.list_guests(auth, None),
            self.backend.list_rooms(auth),
        )?;

        let available = select_available(&rooms);
        debug!(
            guests = guests.len(),
            rooms = rooms.len(),
            available = available.len(),
            "Booking form loaded"
        );

        Ok(BookingForm {
            guests,
            rooms: available,
        })
    }

    /// Submit a reservation. The date range is checked before any call and
    /// the room must currently be available.
    pub async fn book(&self, auth: &Credential, draft: &ReservationDraft) -> DomainResult<Reservation> {
        draft.validate()?;
        let room = self.backend.get_room(auth, draft.room_id).await?;
        if !room.status.is_available() {
            warn!(room_id = room.id, status = %room.status, "Refusing to book unavailable room");
            return Err(DomainError::Validation(format!(
                "room {} is not available ({})",
                room.id, room.status
            )));
        }
        let reservation = self.backend.create_reservation(auth, draft).await?;
        info!(
            reservation_id = reservation.id,
            guest_id = reservation.guest_id,
            room_id = reservation.room_id,
            "Reservation created"
        );
        Ok(reservation)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DomainError, RoomStatus};
    use crate::infrastructure::InMemoryBackend;
    use chrono::NaiveDate;

    fn setup() -> (BookingService, Credential) {
        let backend = Arc::new(InMemoryBackend::seeded());
        let auth = backend.issue_token("admin").unwrap();
        (BookingService::new(backend), auth)
    }

    fn draft(start: &str, end: &str) -> ReservationDraft {
        ReservationDraft {
            guest_id: 1,
            room_id: 1,
            start_date: NaiveDate::parse_from_str(start, "%Y-%m-%d").unwrap(),
            end_date: NaiveDate::parse_from_str(end, "%Y-%m-%d").unwrap(),
            status: None,
        }
    }

    #[tokio::test]
    async fn form_offers_only_available_rooms() {
        let (service, auth) = setup();
        let form = service.load_form(&auth).await.unwrap();
        assert_eq!(form.guests.len(), 2);
        let ids: Vec<i64> = form.rooms.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert!(form.rooms.iter().all(|r| r.status == RoomStatus::Available));
    }

    #[tokio::test]
    async fn empty_stay_is_refused_locally() {
        let (service, auth) = setup();
        let err = service.book(&auth, &draft("2024-09-02", "2024-09-02")).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(msg) if msg.contains("after start")));
    }

    #[tokio::test]
    async fn occupied_room_cannot_be_booked() {
        let (service, auth) = setup();
        let mut d = draft("2025-01-01", "2025-01-03");
        d.room_id = 3;
        let err = service.book(&auth, &d).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(msg) if msg.contains("room 3")));
    }

    #[tokio::test]
    async fn room_in_maintenance_cannot_be_booked() {
        let (service, auth) = setup();
        let mut d = draft("2025-01-01", "2025-01-03");
        d.room_id = 4;
        assert!(matches!(
            service.book(&auth, &d).await,
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn unknown_room_is_not_found() {
        let (service, auth) = setup();
        let mut d = draft("2025-01-01", "2025-01-03");
        d.room_id = 99;
        assert!(matches!(
            service.book(&auth, &d).await,
            Err(DomainError::NotFound { entity: "room", id: 99 })
        ));
    }

    #[tokio::test]
    async fn booking_creates_pending_reservation() {
        let (service, auth) = setup();
        let r = service.book(&auth, &draft("2024-09-01", "2024-09-03")).await.unwrap();
        assert_eq!(r.start_date, "2024-09-01");
        assert_eq!(r.offered_actions()[0].to_string(), "check-in");
    }
}
