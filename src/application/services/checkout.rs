//! Payment workflow
//!
//! The payment form is opened either for one reservation handed over by
//! the booking workflow (the selection is then locked) or for the list of
//! reservations that have no payment yet. The amount is never typed in:
//! it is derived from the selected reservation and its room, and the form
//! cannot be submitted while no amount can be derived.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::application::pricing::{quote, StayQuote, Unpriceable};
use crate::application::search::UNKNOWN_LABEL;
use crate::domain::{
    index_guests, index_rooms, Credential, DomainError, DomainResult, GuestIndex, HotelBackend,
    NewPayment, Payment, PaymentMethod, PaymentStatus, Reservation, ReservationFilter, RoomIndex,
};

/// State of the payment form
#[derive(Debug, Clone)]
pub struct PaymentForm {
    reservations: Vec<Reservation>,
    guests: GuestIndex,
    rooms: RoomIndex,
    locked: bool,
    selected: Option<i64>,
    pricing: Option<Result<StayQuote, Unpriceable>>,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
}

impl PaymentForm {
    fn new(reservations: Vec<Reservation>, guests: GuestIndex, rooms: RoomIndex, locked: bool) -> Self {
        Self {
            reservations,
            guests,
            rooms,
            locked,
            selected: None,
            pricing: None,
            method: PaymentMethod::default(),
            status: PaymentStatus::default(),
        }
    }

    /// Reservations the operator can choose from
    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn selected(&self) -> Option<&Reservation> {
        let id = self.selected?;
        self.reservations.iter().find(|r| r.id == id)
    }

    /// Choose a reservation and recompute the amount.
    pub fn select(&mut self, id: i64) -> DomainResult<()> {
        if self.locked && self.selected.is_some_and(|current| current != id) {
            return Err(DomainError::Validation(
                "reservation is fixed for this payment".to_string(),
            ));
        }
        let reservation = self
            .reservations
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| DomainError::not_found("reservation", id))?;

        let pricing = quote(reservation, &self.rooms);
        if let Err(reason) = &pricing {
            warn!(reservation_id = id, %reason, "Amount cannot be derived");
        }
        self.selected = Some(id);
        self.pricing = Some(pricing);
        Ok(())
    }

    /// Derived amount for the current selection
    pub fn amount(&self) -> Option<Decimal> {
        match &self.pricing {
            Some(Ok(q)) => Some(q.amount),
            _ => None,
        }
    }

    /// Full pricing outcome, including why no amount is shown
    pub fn pricing(&self) -> Option<&Result<StayQuote, Unpriceable>> {
        self.pricing.as_ref()
    }

    /// One-line description of a reservation for pickers
    pub fn describe(&self, reservation: &Reservation) -> String {
        let guest = self
            .guests
            .get(&reservation.guest_id)
            .map(|g| g.name.as_str())
            .unwrap_or(UNKNOWN_LABEL);
        format!(
            "#{} {} - room {} ({} to {})",
            reservation.id, guest, reservation.room_id, reservation.start_date, reservation.end_date
        )
    }

    /// Payment to send, or the reason the form cannot be submitted.
    pub fn submission(&self) -> DomainResult<NewPayment> {
        let reservation = self
            .selected()
            .ok_or_else(|| DomainError::Validation("select a reservation first".to_string()))?;
        match &self.pricing {
            Some(Ok(q)) => Ok(NewPayment::derived(
                reservation.id,
                q.amount,
                self.method.clone(),
                self.status.clone(),
            )),
            Some(Err(reason)) => Err(DomainError::AmountUnavailable(reason.to_string())),
            None => Err(DomainError::AmountUnavailable("not computed".to_string())),
        }
    }
}

/// Service for recording payments
pub struct CheckoutService {
    backend: Arc<dyn HotelBackend>,
}

impl CheckoutService {
    pub fn new(backend: Arc<dyn HotelBackend>) -> Self {
        Self { backend }
    }

    /// Open the form, either for the handed-off reservation or for all
    /// unpaid ones.
    pub async fn open(&self, auth: &Credential, handoff: Option<i64>) -> DomainResult<PaymentForm> {
        match handoff {
            Some(id) => {
                let (reservation, guests, rooms) = tokio::try_join!(
                    self.backend.get_reservation(auth, id),
                    self.backend.list_guests(auth, None),
                    self.backend.list_rooms(auth),
                )?;
                let mut form =
                    PaymentForm::new(vec![reservation], index_guests(&guests), index_rooms(&rooms), true);
                form.select(id)?;
                debug!(reservation_id = id, amount = ?form.amount(), "Payment form opened for reservation");
                Ok(form)
            }
            None => {
                let unpaid = ReservationFilter::unpaid();
                let (reservations, guests, rooms) = tokio::try_join!(
                    self.backend.list_reservations(auth, &unpaid),
                    self.backend.list_guests(auth, None),
                    self.backend.list_rooms(auth),
                )?;
                debug!(unpaid = reservations.len(), "Payment form opened");
                Ok(PaymentForm::new(
                    reservations,
                    index_guests(&guests),
                    index_rooms(&rooms),
                    false,
                ))
            }
        }
    }

    pub async fn submit(&self, auth: &Credential, form: &PaymentForm) -> DomainResult<Payment> {
        let payment = form.submission()?;
        let created = self.backend.create_payment(auth, &payment).await?;
        info!(
            payment_id = created.id,
            reservation_id = payment.reservation_id(),
            amount = %payment.amount(),
            method = %payment.method(),
            "Payment recorded"
        );
        Ok(created)
    }
}

// ── Tests ──────────────────────────────────────────────────────
