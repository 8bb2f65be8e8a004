//! Repository traits for the domain layer
//!
//! Contains:
//! - `HotelBackend`: everything the console needs from one backend
//! - `DomainResult`: standard result type for domain operations

use super::account::AccountRepository;
use super::guest::GuestRepository;
use super::payment::PaymentRepository;
use super::report::ReportRepository;
use super::reservation::ReservationRepository;
use super::room::RoomRepository;

pub use super::error::DomainResult;

// ── HotelBackend ────────────────────────────────────────────────

/// A backend implementing every per-aggregate repository.
///
/// Both the REST gateway and the in-memory backend qualify; services hold
/// one as `Arc<dyn HotelBackend>`.
pub trait HotelBackend:
    RoomRepository
    + GuestRepository
    + ReservationRepository
    + PaymentRepository
    + ReportRepository
    + AccountRepository
{
}

impl<T> HotelBackend for T where
    T: RoomRepository
        + GuestRepository
        + ReservationRepository
        + PaymentRepository
        + ReportRepository
        + AccountRepository
{
}
