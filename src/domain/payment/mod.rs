//! Payment aggregate

pub mod model;
pub mod repository;

pub use model::{
    NewPayment, Payment, PaymentFilter, PaymentMethod, PaymentStatus, PaymentUpdate,
    ReservationSummary,
};
pub use repository::PaymentRepository;
