//! Report read models
//!
//! Aggregation happens in the backend; these types only carry the result.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::{PaymentMethod, ReservationStatus};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReservationReportFilter {
    pub start_from: Option<NaiveDate>,
    pub end_until: Option<NaiveDate>,
    pub status: Option<ReservationStatus>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReservationReportRow {
    pub guest_name: String,
    pub room_kind: String,
    pub start_date: String,
    pub end_date: String,
    pub status: ReservationStatus,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IncomeReportFilter {
    pub start_from: Option<NaiveDate>,
    pub end_until: Option<NaiveDate>,
    pub method: Option<PaymentMethod>,
}

/// Income total for one payment method
#[derive(Debug, Clone, PartialEq)]
pub struct IncomeLine {
    pub method: PaymentMethod,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct IncomeReport {
    pub total: Decimal,
    pub by_method: Vec<IncomeLine>,
}
