//! Application layer: derivations, session state and workflow services

pub mod availability;
pub mod pricing;
pub mod search;
pub mod services;
pub mod session;

pub use availability::select_available;
pub use pricing::{derive_amount, quote, StayQuote, Unpriceable};
pub use search::{enrich_payments, PaymentRow, PaymentSearch, NOT_APPLICABLE_LABEL, UNKNOWN_LABEL};
pub use services::{
    BookingForm, BookingService, CatalogService, CheckoutService, FrontDeskService,
    IdentityService, LedgerService, PaymentForm, ReportService, ReservationLine,
};
pub use session::{SessionContext, TokenStore};
