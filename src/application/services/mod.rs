//! Workflow services used by the console screens

mod booking;
mod catalog;
mod checkout;
mod front_desk;
mod identity;
mod ledger;
mod reports;

pub use booking::{BookingForm, BookingService};
pub use catalog::CatalogService;
pub use checkout::{CheckoutService, PaymentForm};
pub use front_desk::{FrontDeskService, ReservationLine};
pub use identity::IdentityService;
pub use ledger::LedgerService;
pub use reports::ReportService;
