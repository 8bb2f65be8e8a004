//! Payment list enrichment and local search
//!
//! The payments endpoint returns bare payments. The list screen joins each
//! one to its reservation, guest and room for display, then narrows the
//! rows with a free-text term.
//!
//! Matching rule: the term matches a row when it is a case-insensitive
//! substring of the guest name label or of the room number label. A blank
//! term matches every row.

use std::collections::HashMap;

use crate::domain::{GuestIndex, Payment, Reservation, RoomIndex};

/// Label for a reservation whose guest or room is not in the loaded lists
pub const UNKNOWN_LABEL: &str = "Unknown";
/// Label for a payment whose reservation could not be resolved at all
pub const NOT_APPLICABLE_LABEL: &str = "N/A";

/// Payment joined with its display labels
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRow {
    pub payment: Payment,
    pub guest_name: String,
    pub room_number: String,
}

/// Join payments with the reservations, guests and rooms loaded alongside them.
pub fn enrich_payments(
    payments: Vec<Payment>,
    reservations: &HashMap<i64, Reservation>,
    guests: &GuestIndex,
    rooms: &RoomIndex,
) -> Vec<PaymentRow> {
    payments
        .into_iter()
        .map(|payment| {
            let reservation = payment.reservation_id.and_then(|id| reservations.get(&id));

            let (guest_name, room_number) = match reservation {
                Some(r) => (
                    guests
                        .get(&r.guest_id)
                        .map(|g| g.name.clone())
                        .unwrap_or_else(|| UNKNOWN_LABEL.to_string()),
                    rooms
                        .get(&r.room_id)
                        .map(|room| room.id.to_string())
                        .unwrap_or_else(|| UNKNOWN_LABEL.to_string()),
                ),
                None => match &payment.summary {
                    Some(summary) => (
                        summary
                            .guest_name
                            .clone()
                            .unwrap_or_else(|| UNKNOWN_LABEL.to_string()),
                        summary
                            .room_id
                            .map(|id| id.to_string())
                            .unwrap_or_else(|| UNKNOWN_LABEL.to_string()),
                    ),
                    None => (
                        NOT_APPLICABLE_LABEL.to_string(),
                        NOT_APPLICABLE_LABEL.to_string(),
                    ),
                },
            };

            PaymentRow {
                payment,
                guest_name,
                room_number,
            }
        })
        .collect()
}

/// Free-text filter over guest name and room number
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentSearch {
    needle: Option<String>,
}

impl PaymentSearch {
    pub fn new(term: Option<&str>) -> Self {
        let needle = term
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase);
        Self { needle }
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_none()
    }

    pub fn matches(&self, row: &PaymentRow) -> bool {
        match &self.needle {
            None => true,
            Some(needle) => {
                row.guest_name.to_lowercase().contains(needle.as_str())
                    || row.room_number.to_lowercase().contains(needle.as_str())
            }
        }
    }

    pub fn apply(&self, rows: Vec<PaymentRow>) -> Vec<PaymentRow> {
        rows.into_iter().filter(|row| self.matches(row)).collect()
    }
}
