//! Reservation domain entity

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use validator::{Validate, ValidationError};

use crate::domain::DomainError;

/// Reservation status as labelled by the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReservationStatus {
    /// Booked, guest not yet arrived
    Pending,
    /// Guest checked in
    Active,
    /// Guest checked out
    Finished,
    Cancelled,
    Unknown(String),
}

impl ReservationStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pendiente",
            Self::Active => "activa",
            Self::Finished => "finalizada",
            Self::Cancelled => "cancelada",
            Self::Unknown(raw) => raw,
        }
    }

    pub fn from_wire(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "pendiente" => Self::Pending,
            "activa" => Self::Active,
            "finalizada" => Self::Finished,
            "cancelada" => Self::Cancelled,
            _ => Self::Unknown(s.to_string()),
        }
    }

    /// Actions the console offers for a reservation in this status.
    ///
    /// This only hides buttons that cannot apply; the backend still decides
    /// whether a transition is legal.
    pub fn offered_actions(&self) -> Vec<ReservationAction> {
        let mut actions = Vec::with_capacity(3);
        match self {
            Self::Pending => actions.push(ReservationAction::CheckIn),
            Self::Active => actions.push(ReservationAction::CheckOut),
            _ => {}
        }
        actions.push(ReservationAction::Edit);
        actions.push(ReservationAction::Delete);
        actions
    }
}

impl FromStr for ReservationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "active" => Ok(Self::Active),
            "finished" => Ok(Self::Finished),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            _ => match Self::from_wire(s) {
                Self::Unknown(raw) => Err(DomainError::Validation(format!(
                    "unknown reservation status '{}'",
                    raw
                ))),
                known => Ok(known),
            },
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Workflow action on a reservation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationAction {
    CheckIn,
    CheckOut,
    Edit,
    Delete,
}

impl fmt::Display for ReservationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::CheckIn => "check-in",
            Self::CheckOut => "check-out",
            Self::Edit => "edit",
            Self::Delete => "delete",
        };
        write!(f, "{}", label)
    }
}

/// Room reservation
///
/// Dates are kept exactly as the backend sent them; they are parsed when
/// needed (see `application::pricing`).
#[derive(Debug, Clone, PartialEq)]
pub struct Reservation {
    pub id: i64,
    pub guest_id: i64,
    pub room_id: i64,
    pub start_date: String,
    pub end_date: String,
    pub status: ReservationStatus,
}

impl Reservation {
    pub fn new(
        id: i64,
        guest_id: i64,
        room_id: i64,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
    ) -> Self {
        Self {
            id,
            guest_id,
            room_id,
            start_date: start_date.into(),
            end_date: end_date.into(),
            status: ReservationStatus::Pending,
        }
    }

    pub fn offered_actions(&self) -> Vec<ReservationAction> {
        self.status.offered_actions()
    }
}

fn stay_is_not_empty(draft: &ReservationDraft) -> Result<(), ValidationError> {
    if draft.end_date <= draft.start_date {
        let mut err = ValidationError::new("date_range");
        err.message = Some("end date must be after start date".into());
        return Err(err);
    }
    Ok(())
}

/// Reservation create/update form
#[derive(Debug, Clone, Validate)]
#[validate(schema(function = "stay_is_not_empty"))]
pub struct ReservationDraft {
    pub guest_id: i64,
    pub room_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Only sent on update; the backend assigns the initial status
    pub status: Option<ReservationStatus>,
}

/// Server-side reservation list filter
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReservationFilter {
    /// Stays starting on or after this date
    pub start_from: Option<NaiveDate>,
    /// Stays ending on or before this date
    pub end_until: Option<NaiveDate>,
    pub status: Option<ReservationStatus>,
    pub guest_id: Option<i64>,
    pub room_id: Option<i64>,
    /// Only reservations that have no payment yet
    pub unpaid_only: bool,
}

impl ReservationFilter {
    pub fn unpaid() -> Self {
        Self {
            unpaid_only: true,
            ..Self::default()
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────
