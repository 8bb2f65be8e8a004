//! Room domain entity

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use validator::{Validate, ValidationError};

use crate::domain::DomainError;

/// Room status
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomStatus {
    /// Free to be booked
    Available,
    Occupied,
    Maintenance,
    /// Label the console does not recognise; never bookable
    Unknown(String),
}

impl RoomStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Available => "disponible",
            Self::Occupied => "ocupada",
            Self::Maintenance => "mantenimiento",
            Self::Unknown(raw) => raw,
        }
    }

    /// Parse a backend label. Matching is case-insensitive and never fails.
    pub fn from_wire(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "disponible" => Self::Available,
            "ocupada" => Self::Occupied,
            "mantenimiento" => Self::Maintenance,
            _ => Self::Unknown(s.to_string()),
        }
    }

    pub fn is_available(&self) -> bool {
        *self == Self::Available
    }
}

impl FromStr for RoomStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "available" => Ok(Self::Available),
            "occupied" => Ok(Self::Occupied),
            "maintenance" => Ok(Self::Maintenance),
            _ => match Self::from_wire(s) {
                Self::Unknown(raw) => Err(DomainError::Validation(format!(
                    "unknown room status '{}'",
                    raw
                ))),
                known => Ok(known),
            },
        }
    }
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Hotel room
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub id: i64,
    /// Room type, e.g. "single", "suite"
    pub kind: String,
    pub status: RoomStatus,
    /// Price per night. `None` when the backend sent something that is not a number.
    pub nightly_rate: Option<Decimal>,
}

impl Room {
    pub fn new(id: i64, kind: impl Into<String>, status: RoomStatus, nightly_rate: Decimal) -> Self {
        Self {
            id,
            kind: kind.into(),
            status,
            nightly_rate: Some(nightly_rate),
        }
    }

    pub fn label(&self) -> String {
        format!("Room {} - {}", self.id, self.kind)
    }
}

/// Rooms keyed by ID
pub type RoomIndex = HashMap<i64, Room>;

pub fn index_rooms(rooms: &[Room]) -> RoomIndex {
    rooms.iter().map(|r| (r.id, r.clone())).collect()
}

fn non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        let mut err = ValidationError::new("range");
        err.message = Some("must not be negative".into());
        return Err(err);
    }
    Ok(())
}

/// Room create/update form
#[derive(Debug, Clone, Validate)]
pub struct RoomDraft {
    #[validate(length(min = 1, message = "room type is required"))]
    pub kind: String,
    pub status: RoomStatus,
    #[validate(custom(function = "non_negative"))]
    pub nightly_rate: Decimal,
}

// ── Tests ──────────────────────────────────────────────────────
