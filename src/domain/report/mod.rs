//! Reporting read models

pub mod model;
pub mod repository;

pub use model::{
    IncomeLine, IncomeReport, IncomeReportFilter, ReservationReportFilter, ReservationReportRow,
};
pub use repository::ReportRepository;
