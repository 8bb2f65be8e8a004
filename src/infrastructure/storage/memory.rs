//! In-memory hotel backend
//!
//! Mirrors the REST backend closely enough for development, demos and
//! tests: token check on every call, server-side filters, check-in and
//! check-out legality, and report aggregation.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use dashmap::DashMap;
use rust_decimal::Decimal;
use sha2::{Digest, Sha256};
use tracing::debug;
use validator::Validate;

use crate::domain::{
    AccountDraft, AccountRepository, Credential, DomainError, DomainResult, Guest, GuestDraft,
    GuestRepository, IncomeLine, IncomeReport, IncomeReportFilter, LoginRequest, NewPayment,
    Payment, PaymentFilter, PaymentMethod, PaymentRepository, PaymentStatus, PaymentUpdate,
    ReportRepository, Reservation, ReservationDraft, ReservationFilter, ReservationReportFilter,
    ReservationReportRow, ReservationRepository, ReservationStatus, ReservationSummary, Room,
    RoomDraft, RoomRepository, RoomStatus, StaffRole,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Staff account held by the in-memory backend
struct StoredAccount {
    password_digest: String,
    role: StaffRole,
}

/// In-memory backend for development and testing
pub struct InMemoryBackend {
    rooms: DashMap<i64, Room>,
    guests: DashMap<i64, Guest>,
    reservations: DashMap<i64, Reservation>,
    payments: DashMap<i64, Payment>,
    accounts: DashMap<String, StoredAccount>,
    /// token -> username
    tokens: DashMap<String, String>,
    room_counter: AtomicI64,
    guest_counter: AtomicI64,
    reservation_counter: AtomicI64,
    payment_counter: AtomicI64,
    token_counter: AtomicI64,
}

impl InMemoryBackend {
    /// Empty backend
    pub fn new() -> Self {
        Self {
            rooms: DashMap::new(),
            guests: DashMap::new(),
            reservations: DashMap::new(),
            payments: DashMap::new(),
            accounts: DashMap::new(),
            tokens: DashMap::new(),
            room_counter: AtomicI64::new(1),
            guest_counter: AtomicI64::new(1),
            reservation_counter: AtomicI64::new(1),
            payment_counter: AtomicI64::new(1),
            token_counter: AtomicI64::new(1),
        }
    }

    /// Backend with a demo account (`admin` / `admin1234`) and a few rooms,
    /// guests and reservations.
    pub fn seeded() -> Self {
        let backend = Self::new();
        backend.add_account("admin", "admin1234", StaffRole::Administrator);

        for (kind, status, rate) in [
            ("single", RoomStatus::Available, Decimal::new(8000, 2)),
            ("double", RoomStatus::Available, Decimal::new(12000, 2)),
            ("suite", RoomStatus::Occupied, Decimal::new(25000, 2)),
            ("double", RoomStatus::Maintenance, Decimal::new(12000, 2)),
        ] {
            backend.add_room(kind, status, rate);
        }

        let ana = backend.add_guest("Ana Torres", "40123456", "ana@example.com");
        let luis = backend.add_guest("Luis Pérez", "38999111", "luis@example.com");

        backend.add_reservation(ana.id, 3, "2024-06-01", "2024-06-04", ReservationStatus::Active);
        backend.add_reservation(luis.id, 2, "2024-07-10", "2024-07-12", ReservationStatus::Pending);

        backend
    }

    /// Register an account directly, bypassing validation.
    pub fn add_account(&self, username: &str, password: &str, role: StaffRole) {
        self.accounts.insert(
            username.to_string(),
            StoredAccount {
                password_digest: digest(password),
                role,
            },
        );
    }

    pub fn add_room(&self, kind: &str, status: RoomStatus, rate: Decimal) -> Room {
        let id = self.room_counter.fetch_add(1, Ordering::SeqCst);
        let room = Room::new(id, kind, status, rate);
        self.rooms.insert(id, room.clone());
        room
    }

    pub fn add_guest(&self, name: &str, document: &str, email: &str) -> Guest {
        let id = self.guest_counter.fetch_add(1, Ordering::SeqCst);
        let guest = Guest {
            id,
            name: name.to_string(),
            document: document.to_string(),
            email: email.to_string(),
            phone: String::new(),
        };
        self.guests.insert(id, guest.clone());
        guest
    }

    /// Insert a reservation with raw date strings, as a backend might hold them.
    pub fn add_reservation(
        &self,
        guest_id: i64,
        room_id: i64,
        start: &str,
        end: &str,
        status: ReservationStatus,
    ) -> Reservation {
        let id = self.reservation_counter.fetch_add(1, Ordering::SeqCst);
        let mut reservation = Reservation::new(id, guest_id, room_id, start, end);
        reservation.status = status;
        self.reservations.insert(id, reservation.clone());
        reservation
    }

    /// Issue a session token without a password check.
    pub fn issue_token(&self, username: &str) -> DomainResult<Credential> {
        let n = self.token_counter.fetch_add(1, Ordering::SeqCst);
        let raw = hex::encode(Sha256::digest(
            format!("{}:{}:{}", username, n, Utc::now().timestamp_nanos_opt().unwrap_or(0))
                .as_bytes(),
        ));
        self.tokens.insert(raw.clone(), username.to_string());
        Credential::new(raw).ok_or_else(|| DomainError::Storage("empty token".to_string()))
    }

    pub fn role_of(&self, username: &str) -> Option<StaffRole> {
        self.accounts.get(username).map(|a| a.role)
    }

    fn authorize(&self, auth: &Credential) -> DomainResult<()> {
        if self.tokens.contains_key(auth.secret()) {
            Ok(())
        } else {
            Err(DomainError::Unauthorized("Invalid token.".to_string()))
        }
    }

    fn is_paid(&self, reservation_id: i64) -> bool {
        self.payments
            .iter()
            .any(|p| p.reservation_id == Some(reservation_id))
    }

    fn summary_for(&self, reservation_id: i64) -> Option<ReservationSummary> {
        let reservation = self.reservations.get(&reservation_id)?;
        Some(ReservationSummary {
            guest_name: self
                .guests
                .get(&reservation.guest_id)
                .map(|g| g.name.clone()),
            room_id: Some(reservation.room_id),
        })
    }

    fn set_room_status(&self, room_id: i64, status: RoomStatus) {
        if let Some(mut room) = self.rooms.get_mut(&room_id) {
            room.status = status;
        }
    }

    fn reservation_from_draft(&self, id: i64, draft: &ReservationDraft) -> DomainResult<Reservation> {
        draft.validate()?;
        if !self.guests.contains_key(&draft.guest_id) {
            return Err(bad_request(format!("cliente {} does not exist", draft.guest_id)));
        }
        if !self.rooms.contains_key(&draft.room_id) {
            return Err(bad_request(format!("habitacion {} does not exist", draft.room_id)));
        }
        Ok(Reservation {
            id,
            guest_id: draft.guest_id,
            room_id: draft.room_id,
            start_date: draft.start_date.format(DATE_FORMAT).to_string(),
            end_date: draft.end_date.format(DATE_FORMAT).to_string(),
            status: draft.status.clone().unwrap_or(ReservationStatus::Pending),
        })
    }

    /// Whether a reservation blocks its room for `[start, end)`
    fn blocks(reservation: &Reservation, start: NaiveDate, end: NaiveDate) -> bool {
        if !matches!(
            reservation.status,
            ReservationStatus::Pending | ReservationStatus::Active
        ) {
            return false;
        }
        match (parse_date(&reservation.start_date), parse_date(&reservation.end_date)) {
            (Some(s), Some(e)) => s < end && start < e,
            // unreadable dates block conservatively
            _ => true,
        }
    }
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn digest(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    raw.get(..10)
        .and_then(|d| NaiveDate::parse_from_str(d, DATE_FORMAT).ok())
}

fn bad_request(body: impl Into<String>) -> DomainError {
    DomainError::Rejected {
        status: 400,
        body: body.into(),
    }
}

fn income_overflow() -> DomainError {
    DomainError::Storage("income total out of range".to_string())
}

fn sorted<T, K: Ord>(mut items: Vec<T>, key: impl Fn(&T) -> K) -> Vec<T> {
    items.sort_by_key(key);
    items
}

#[async_trait]
impl RoomRepository for InMemoryBackend {
    async fn list_rooms(&self, auth: &Credential) -> DomainResult<Vec<Room>> {
        self.authorize(auth)?;
        let rooms = self.rooms.iter().map(|r| r.value().clone()).collect();
        Ok(sorted(rooms, |r: &Room| r.id))
    }

    async fn get_room(&self, auth: &Credential, id: i64) -> DomainResult<Room> {
        self.authorize(auth)?;
        self.rooms
            .get(&id)
            .map(|r| r.value().clone())
            .ok_or_else(|| DomainError::not_found("room", id))
    }

    async fn list_rooms_free_between(
        &self,
        auth: &Credential,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DomainResult<Vec<Room>> {
        self.authorize(auth)?;
        if end <= start {
            return Err(bad_request("fecha_fin must be after fecha_inicio"));
        }
        let rooms = self
            .rooms
            .iter()
            .filter(|r| r.status != RoomStatus::Maintenance)
            .filter(|r| {
                !self
                    .reservations
                    .iter()
                    .any(|res| res.room_id == r.id && Self::blocks(&res, start, end))
            })
            .map(|r| r.value().clone())
            .collect();
        Ok(sorted(rooms, |r: &Room| r.id))
    }

    async fn create_room(&self, auth: &Credential, draft: &RoomDraft) -> DomainResult<Room> {
        self.authorize(auth)?;
        draft.validate()?;
        let room = self.add_room(&draft.kind, draft.status.clone(), draft.nightly_rate);
        debug!(room_id = room.id, "Room created");
        Ok(room)
    }

    async fn update_room(&self, auth: &Credential, id: i64, draft: &RoomDraft) -> DomainResult<Room> {
        self.authorize(auth)?;
        draft.validate()?;
        let mut room = self
            .rooms
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found("room", id))?;
        room.kind = draft.kind.clone();
        room.status = draft.status.clone();
        room.nightly_rate = Some(draft.nightly_rate);
        Ok(room.clone())
    }

    async fn delete_room(&self, auth: &Credential, id: i64) -> DomainResult<()> {
        self.authorize(auth)?;
        self.rooms
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found("room", id))
    }
}

#[async_trait]
impl GuestRepository for InMemoryBackend {
    async fn list_guests(&self, auth: &Credential, search: Option<&str>) -> DomainResult<Vec<Guest>> {
        self.authorize(auth)?;
        let needle = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);
        let guests = self
            .guests
            .iter()
            .filter(|g| match &needle {
                None => true,
                Some(n) => [&g.name, &g.document, &g.email]
                    .iter()
                    .any(|field| field.to_lowercase().contains(n.as_str())),
            })
            .map(|g| g.value().clone())
            .collect();
        Ok(sorted(guests, |g: &Guest| g.id))
    }

    async fn get_guest(&self, auth: &Credential, id: i64) -> DomainResult<Guest> {
        self.authorize(auth)?;
        self.guests
            .get(&id)
            .map(|g| g.value().clone())
            .ok_or_else(|| DomainError::not_found("guest", id))
    }

    async fn create_guest(&self, auth: &Credential, draft: &GuestDraft) -> DomainResult<Guest> {
        self.authorize(auth)?;
        draft.validate()?;
        if self.guests.iter().any(|g| g.document == draft.document) {
            return Err(bad_request(format!(
                "documento {} already registered",
                draft.document
            )));
        }
        let mut guest = self.add_guest(&draft.name, &draft.document, &draft.email);
        guest.phone = draft.phone.clone();
        self.guests.insert(guest.id, guest.clone());
        Ok(guest)
    }

    async fn update_guest(&self, auth: &Credential, id: i64, draft: &GuestDraft) -> DomainResult<Guest> {
        self.authorize(auth)?;
        draft.validate()?;
        let mut guest = self
            .guests
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found("guest", id))?;
        guest.name = draft.name.clone();
        guest.document = draft.document.clone();
        guest.email = draft.email.clone();
        guest.phone = draft.phone.clone();
        Ok(guest.clone())
    }

    async fn delete_guest(&self, auth: &Credential, id: i64) -> DomainResult<()> {
        self.authorize(auth)?;
        self.guests
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found("guest", id))
    }
}

#[async_trait]
impl ReservationRepository for InMemoryBackend {
    async fn list_reservations(
        &self,
        auth: &Credential,
        filter: &ReservationFilter,
    ) -> DomainResult<Vec<Reservation>> {
        self.authorize(auth)?;
        let reservations = self
            .reservations
            .iter()
            .filter(|r| {
                filter
                    .start_from
                    .map_or(true, |d| parse_date(&r.start_date).map_or(false, |s| s >= d))
            })
            .filter(|r| {
                filter
                    .end_until
                    .map_or(true, |d| parse_date(&r.end_date).map_or(false, |e| e <= d))
            })
            .filter(|r| filter.status.as_ref().map_or(true, |s| &r.status == s))
            .filter(|r| filter.guest_id.map_or(true, |g| r.guest_id == g))
            .filter(|r| filter.room_id.map_or(true, |room| r.room_id == room))
            .filter(|r| !filter.unpaid_only || !self.is_paid(r.id))
            .map(|r| r.value().clone())
            .collect();
        Ok(sorted(reservations, |r: &Reservation| r.id))
    }

    async fn get_reservation(&self, auth: &Credential, id: i64) -> DomainResult<Reservation> {
        self.authorize(auth)?;
        self.reservations
            .get(&id)
            .map(|r| r.value().clone())
            .ok_or_else(|| DomainError::not_found("reservation", id))
    }

    async fn create_reservation(
        &self,
        auth: &Credential,
        draft: &ReservationDraft,
    ) -> DomainResult<Reservation> {
        self.authorize(auth)?;
        let id = self.reservation_counter.fetch_add(1, Ordering::SeqCst);
        let mut reservation = self.reservation_from_draft(id, draft)?;
        reservation.status = ReservationStatus::Pending;
        self.reservations.insert(id, reservation.clone());
        debug!(reservation_id = id, "Reservation created");
        Ok(reservation)
    }

    async fn update_reservation(
        &self,
        auth: &Credential,
        id: i64,
        draft: &ReservationDraft,
    ) -> DomainResult<Reservation> {
        self.authorize(auth)?;
        let current = self
            .reservations
            .get(&id)
            .map(|r| r.status.clone())
            .ok_or_else(|| DomainError::not_found("reservation", id))?;
        let mut reservation = self.reservation_from_draft(id, draft)?;
        if draft.status.is_none() {
            reservation.status = current;
        }
        self.reservations.insert(id, reservation.clone());
        Ok(reservation)
    }

    async fn delete_reservation(&self, auth: &Credential, id: i64) -> DomainResult<()> {
        self.authorize(auth)?;
        self.reservations
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found("reservation", id))
    }

    async fn check_in(&self, auth: &Credential, id: i64) -> DomainResult<()> {
        self.authorize(auth)?;
        let room_id = {
            let mut reservation = self
                .reservations
                .get_mut(&id)
                .ok_or_else(|| DomainError::not_found("reservation", id))?;
            if reservation.status != ReservationStatus::Pending {
                return Err(bad_request(format!(
                    "check-in not allowed for a reservation in state '{}'",
                    reservation.status
                )));
            }
            reservation.status = ReservationStatus::Active;
            reservation.room_id
        };
        self.set_room_status(room_id, RoomStatus::Occupied);
        Ok(())
    }

    async fn check_out(&self, auth: &Credential, id: i64) -> DomainResult<()> {
        self.authorize(auth)?;
        let room_id = {
            let mut reservation = self
                .reservations
                .get_mut(&id)
                .ok_or_else(|| DomainError::not_found("reservation", id))?;
            if reservation.status != ReservationStatus::Active {
                return Err(bad_request(format!(
                    "check-out not allowed for a reservation in state '{}'",
                    reservation.status
                )));
            }
            reservation.status = ReservationStatus::Finished;
            reservation.room_id
        };
        self.set_room_status(room_id, RoomStatus::Available);
        Ok(())
    }
}

#[async_trait]
impl PaymentRepository for InMemoryBackend {
    async fn list_payments(
        &self,
        auth: &Credential,
        filter: &PaymentFilter,
    ) -> DomainResult<Vec<Payment>> {
        self.authorize(auth)?;
        let needle = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);
        let payments = self
            .payments
            .iter()
            .filter(|p| filter.method.as_ref().map_or(true, |m| &p.method == m))
            .filter(|p| filter.status.as_ref().map_or(true, |s| &p.status == s))
            .filter(|p| match (&needle, &p.summary) {
                (None, _) => true,
                (Some(n), Some(summary)) => {
                    summary
                        .guest_name
                        .as_deref()
                        .map_or(false, |g| g.to_lowercase().contains(n.as_str()))
                        || summary
                            .room_id
                            .map_or(false, |r| r.to_string().contains(n.as_str()))
                }
                (Some(_), None) => false,
            })
            .map(|p| p.value().clone())
            .collect();
        Ok(sorted(payments, |p: &Payment| p.id))
    }

    async fn get_payment(&self, auth: &Credential, id: i64) -> DomainResult<Payment> {
        self.authorize(auth)?;
        self.payments
            .get(&id)
            .map(|p| p.value().clone())
            .ok_or_else(|| DomainError::not_found("payment", id))
    }

    async fn create_payment(&self, auth: &Credential, payment: &NewPayment) -> DomainResult<Payment> {
        self.authorize(auth)?;
        let reservation_id = payment.reservation_id();
        if !self.reservations.contains_key(&reservation_id) {
            return Err(bad_request(format!("reserva {} does not exist", reservation_id)));
        }
        if self.is_paid(reservation_id) {
            return Err(bad_request(format!("reserva {} is already paid", reservation_id)));
        }
        let id = self.payment_counter.fetch_add(1, Ordering::SeqCst);
        let stored = Payment {
            id,
            reservation_id: Some(reservation_id),
            amount: Some(payment.amount()),
            method: payment.method().clone(),
            status: payment.status().clone(),
            paid_at: Some(Utc::now().format(DATE_FORMAT).to_string()),
            summary: self.summary_for(reservation_id),
        };
        self.payments.insert(id, stored.clone());
        debug!(payment_id = id, reservation_id, "Payment recorded");
        Ok(stored)
    }

    async fn update_payment(
        &self,
        auth: &Credential,
        id: i64,
        update: &PaymentUpdate,
    ) -> DomainResult<Payment> {
        self.authorize(auth)?;
        update.validate()?;
        if !self.reservations.contains_key(&update.reservation_id) {
            return Err(bad_request(format!(
                "reserva {} does not exist",
                update.reservation_id
            )));
        }
        let summary = self.summary_for(update.reservation_id);
        let mut payment = self
            .payments
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found("payment", id))?;
        payment.reservation_id = Some(update.reservation_id);
        payment.amount = Some(update.amount);
        payment.method = update.method.clone();
        payment.status = update.status.clone();
        payment.summary = summary;
        Ok(payment.clone())
    }

    async fn delete_payment(&self, auth: &Credential, id: i64) -> DomainResult<()> {
        self.authorize(auth)?;
        self.payments
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found("payment", id))
    }
}

#[async_trait]
impl ReportRepository for InMemoryBackend {
    async fn reservation_report(
        &self,
        auth: &Credential,
        filter: &ReservationReportFilter,
    ) -> DomainResult<Vec<ReservationReportRow>> {
        let listing = ReservationFilter {
            start_from: filter.start_from,
            end_until: filter.end_until,
            status: filter.status.clone(),
            ..ReservationFilter::default()
        };
        let reservations = self.list_reservations(auth, &listing).await?;
        Ok(reservations
            .into_iter()
            .map(|r| ReservationReportRow {
                guest_name: self
                    .guests
                    .get(&r.guest_id)
                    .map(|g| g.name.clone())
                    .unwrap_or_default(),
                room_kind: self
                    .rooms
                    .get(&r.room_id)
                    .map(|room| room.kind.clone())
                    .unwrap_or_default(),
                start_date: r.start_date,
                end_date: r.end_date,
                status: r.status,
            })
            .collect())
    }

    /// Sums successful payments only.
    async fn income_report(
        &self,
        auth: &Credential,
        filter: &IncomeReportFilter,
    ) -> DomainResult<IncomeReport> {
        self.authorize(auth)?;
        let mut report = IncomeReport::default();

        for method in [PaymentMethod::Cash, PaymentMethod::Card, PaymentMethod::Transfer] {
            if filter.method.as_ref().map_or(false, |m| m != &method) {
                continue;
            }
            let total: Decimal = self
                .payments
                .iter()
                .filter(|p| p.method == method && p.status == PaymentStatus::Successful)
                .filter(|p| {
                    let day = p.paid_at.as_deref().and_then(parse_date);
                    filter.start_from.map_or(true, |d| day.map_or(false, |x| x >= d))
                        && filter.end_until.map_or(true, |d| day.map_or(false, |x| x <= d))
                })
                .filter_map(|p| p.amount)
                .try_fold(Decimal::ZERO, |acc, amount| acc.checked_add(amount))
                .ok_or_else(income_overflow)?;
            if !total.is_zero() {
                report.total = report.total.checked_add(total).ok_or_else(income_overflow)?;
                report.by_method.push(IncomeLine { method, total });
            }
        }

        Ok(report)
    }
}

#[async_trait]
impl AccountRepository for InMemoryBackend {
    async fn obtain_token(&self, login: &LoginRequest) -> DomainResult<Credential> {
        login.validate()?;
        let matches = self
            .accounts
            .get(&login.username)
            .map_or(false, |a| a.password_digest == digest(&login.password));
        if !matches {
            return Err(bad_request("Unable to log in with provided credentials."));
        }
        self.issue_token(&login.username)
    }

    async fn register_account(&self, draft: &AccountDraft) -> DomainResult<()> {
        draft.validate()?;
        if self.accounts.contains_key(&draft.username) {
            return Err(bad_request(format!(
                "username {} already exists",
                draft.username
            )));
        }
        self.add_account(&draft.username, &draft.password, draft.role);
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    fn draft(guest_id: i64, room_id: i64, start: &str, end: &str) -> ReservationDraft {
        ReservationDraft {
            guest_id,
            room_id,
            start_date: date(start),
            end_date: date(end),
            status: None,
        }
    }

    #[tokio::test]
    async fn calls_need_a_known_token() {
        let backend = InMemoryBackend::seeded();
        let stranger = Credential::new("forged").unwrap();
        assert!(matches!(
            backend.list_rooms(&stranger).await,
            Err(DomainError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn login_checks_password() {
        let backend = InMemoryBackend::seeded();
        assert!(backend
            .obtain_token(&LoginRequest::new("admin", "wrong"))
            .await
            .is_err());
        let token = backend
            .obtain_token(&LoginRequest::new("admin", "admin1234"))
            .await
            .unwrap();
        assert!(backend.list_rooms(&token).await.is_ok());
    }

    #[tokio::test]
    async fn check_in_and_out_follow_status() {
        let backend = InMemoryBackend::seeded();
        let auth = backend.issue_token("admin").unwrap();
        let r = backend
            .create_reservation(&auth, &draft(1, 1, "2024-08-01", "2024-08-03"))
            .await
            .unwrap();

        assert!(backend.check_out(&auth, r.id).await.is_err());
        backend.check_in(&auth, r.id).await.unwrap();
        assert_eq!(backend.get_room(&auth, 1).await.unwrap().status, RoomStatus::Occupied);
        assert!(backend.check_in(&auth, r.id).await.is_err());
        backend.check_out(&auth, r.id).await.unwrap();

        let done = backend.get_reservation(&auth, r.id).await.unwrap();
        assert_eq!(done.status, ReservationStatus::Finished);
        assert_eq!(backend.get_room(&auth, 1).await.unwrap().status, RoomStatus::Available);
    }

    #[tokio::test]
    async fn unpaid_filter_hides_paid_reservations() {
        let backend = InMemoryBackend::seeded();
        let auth = backend.issue_token("admin").unwrap();
        let before = backend
            .list_reservations(&auth, &ReservationFilter::unpaid())
            .await
            .unwrap();
        assert_eq!(before.len(), 2);

        let payment = NewPayment::derived(
            before[0].id,
            Decimal::new(36000, 2),
            PaymentMethod::Card,
            PaymentStatus::Successful,
        );
        backend.create_payment(&auth, &payment).await.unwrap();
        assert!(backend.create_payment(&auth, &payment).await.is_err());

        let after = backend
            .list_reservations(&auth, &ReservationFilter::unpaid())
            .await
            .unwrap();
        assert_eq!(after.len(), 1);
    }

    #[tokio::test]
    async fn free_rooms_exclude_overlaps_and_maintenance() {
        let backend = InMemoryBackend::seeded();
        let auth = backend.issue_token("admin").unwrap();
        // room 2 is held 2024-07-10..12, room 3 2024-06-01..04, room 4 in maintenance
        let ids: Vec<i64> = backend
            .list_rooms_free_between(&auth, date("2024-07-11"), date("2024-07-13"))
            .await
            .unwrap()
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![1, 3]);

        let ids: Vec<i64> = backend
            .list_rooms_free_between(&auth, date("2024-07-12"), date("2024-07-13"))
            .await
            .unwrap()
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn reservation_filters_apply() {
        let backend = InMemoryBackend::seeded();
        let auth = backend.issue_token("admin").unwrap();
        let filter = ReservationFilter {
            start_from: Some(date("2024-07-01")),
            ..ReservationFilter::default()
        };
        let found = backend.list_reservations(&auth, &filter).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].room_id, 2);

        let filter = ReservationFilter {
            status: Some(ReservationStatus::Active),
            ..ReservationFilter::default()
        };
        assert_eq!(backend.list_reservations(&auth, &filter).await.unwrap()[0].room_id, 3);
    }

    #[tokio::test]
    async fn income_report_groups_successful_payments() {
        let backend = InMemoryBackend::seeded();
        let auth = backend.issue_token("admin").unwrap();
        for (rid, cents, method, status) in [
            (1, 36000, PaymentMethod::Card, PaymentStatus::Successful),
            (2, 24000, PaymentMethod::Cash, PaymentStatus::Failed),
        ] {
            let p = NewPayment::derived(rid, Decimal::new(cents, 2), method, status);
            backend.create_payment(&auth, &p).await.unwrap();
        }

        let report = backend
            .income_report(&auth, &IncomeReportFilter::default())
            .await
            .unwrap();
        assert_eq!(report.total, Decimal::new(36000, 2));
        assert_eq!(report.by_method.len(), 1);
        assert_eq!(report.by_method[0].method, PaymentMethod::Card);
    }

    #[tokio::test]
    async fn income_report_overflow_is_an_error() {
        let backend = InMemoryBackend::seeded();
        let auth = backend.issue_token("admin").unwrap();
        for rid in [1, 2] {
            let p = NewPayment::derived(rid, Decimal::MAX, PaymentMethod::Card, PaymentStatus::Successful);
            backend.create_payment(&auth, &p).await.unwrap();
        }

        assert!(matches!(
            backend.income_report(&auth, &IncomeReportFilter::default()).await,
            Err(DomainError::Storage(_))
        ));
    }

    #[tokio::test]
    async fn missing_ids_are_not_found() {
        let backend = InMemoryBackend::seeded();
        let auth = backend.issue_token("admin").unwrap();
        assert!(matches!(
            backend.get_room(&auth, 99).await,
            Err(DomainError::NotFound { entity: "room", id: 99 })
        ));
        assert!(matches!(
            backend.delete_payment(&auth, 5).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn register_rejects_duplicates() {
        let backend = InMemoryBackend::new();
        let account = AccountDraft {
            username: "recep1".into(),
            email: "recep1@example.com".into(),
            first_name: "Rita".into(),
            last_name: "Gómez".into(),
            role: StaffRole::Receptionist,
            password: "longenough".into(),
        };
        backend.register_account(&account).await.unwrap();
        assert_eq!(backend.role_of("recep1"), Some(StaffRole::Receptionist));
        assert!(backend.register_account(&account).await.is_err());
    }
}
