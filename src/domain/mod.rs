//! Domain layer: entities, value types and repository interfaces

pub mod account;
pub mod error;
pub mod guest;
pub mod payment;
pub mod report;
pub mod repositories;
pub mod reservation;
pub mod room;

// Re-export commonly used types
pub use account::{AccountDraft, AccountRepository, Credential, LoginRequest, StaffRole};
pub use error::{DomainError, DomainResult};
pub use guest::{index_guests, Guest, GuestDraft, GuestIndex, GuestRepository};
pub use payment::{
    NewPayment, Payment, PaymentFilter, PaymentMethod, PaymentRepository, PaymentStatus,
    PaymentUpdate, ReservationSummary,
};
pub use report::{
    IncomeLine, IncomeReport, IncomeReportFilter, ReportRepository, ReservationReportFilter,
    ReservationReportRow,
};
pub use repositories::HotelBackend;
pub use reservation::{
    Reservation, ReservationAction, ReservationDraft, ReservationFilter, ReservationRepository,
    ReservationStatus,
};
pub use room::{index_rooms, Room, RoomDraft, RoomIndex, RoomRepository, RoomStatus};
