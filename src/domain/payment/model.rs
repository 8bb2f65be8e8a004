//! Payment domain entity

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::domain::{DomainError, DomainResult};

/// How the guest paid
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
    Transfer,
    Unknown(String),
}

impl PaymentMethod {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Cash => "Efectivo",
            Self::Card => "Tarjeta",
            Self::Transfer => "Transferencia",
            Self::Unknown(raw) => raw,
        }
    }

    pub fn from_wire(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "efectivo" => Self::Cash,
            "tarjeta" => Self::Card,
            "transferencia" => Self::Transfer,
            _ => Self::Unknown(s.to_string()),
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cash" => Ok(Self::Cash),
            "card" => Ok(Self::Card),
            "transfer" => Ok(Self::Transfer),
            _ => match Self::from_wire(s) {
                Self::Unknown(raw) => Err(DomainError::Validation(format!(
                    "unknown payment method '{}'",
                    raw
                ))),
                known => Ok(known),
            },
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payment outcome
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PaymentStatus {
    #[default]
    Successful,
    Pending,
    Failed,
    Unknown(String),
}

impl PaymentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Successful => "exitoso",
            Self::Pending => "pendiente",
            Self::Failed => "fallido",
            Self::Unknown(raw) => raw,
        }
    }

    pub fn from_wire(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "exitoso" => Self::Successful,
            "pendiente" => Self::Pending,
            "fallido" => Self::Failed,
            _ => Self::Unknown(s.to_string()),
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "successful" | "success" => Ok(Self::Successful),
            "pending" => Ok(Self::Pending),
            "failed" => Ok(Self::Failed),
            _ => match Self::from_wire(s) {
                Self::Unknown(raw) => Err(DomainError::Validation(format!(
                    "unknown payment status '{}'",
                    raw
                ))),
                known => Ok(known),
            },
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Backend-provided summary of the paid reservation
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReservationSummary {
    pub guest_name: Option<String>,
    pub room_id: Option<i64>,
}

/// Recorded payment
#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
    pub id: i64,
    pub reservation_id: Option<i64>,
    /// `None` when the backend value is not a number
    pub amount: Option<Decimal>,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub paid_at: Option<String>,
    pub summary: Option<ReservationSummary>,
}

/// Payment about to be created.
///
/// The amount is always derived from the reservation, never typed in, so
/// this type is only built by the checkout workflow.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPayment {
    reservation_id: i64,
    amount: Decimal,
    method: PaymentMethod,
    status: PaymentStatus,
}

impl NewPayment {
    pub(crate) fn derived(
        reservation_id: i64,
        amount: Decimal,
        method: PaymentMethod,
        status: PaymentStatus,
    ) -> Self {
        Self {
            reservation_id,
            amount,
            method,
            status,
        }
    }

    pub fn reservation_id(&self) -> i64 {
        self.reservation_id
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn method(&self) -> &PaymentMethod {
        &self.method
    }

    pub fn status(&self) -> &PaymentStatus {
        &self.status
    }
}

/// Edit form for an existing payment
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentUpdate {
    pub reservation_id: i64,
    pub amount: Decimal,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
}

impl PaymentUpdate {
    /// Start an edit from the stored payment
    pub fn from_payment(payment: &Payment) -> DomainResult<Self> {
        let reservation_id = payment.reservation_id.ok_or_else(|| {
            DomainError::Validation(format!("payment {} has no reservation", payment.id))
        })?;
        let amount = payment.amount.ok_or_else(|| {
            DomainError::Validation(format!("payment {} has no valid amount", payment.id))
        })?;
        Ok(Self {
            reservation_id,
            amount,
            method: payment.method.clone(),
            status: payment.status.clone(),
        })
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.amount.is_sign_negative() && !self.amount.is_zero() {
            return Err(DomainError::Validation(
                "amount: must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// Payment list filter
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentFilter {
    pub method: Option<PaymentMethod>,
    pub status: Option<PaymentStatus>,
    /// Guest name or room number fragment
    pub search: Option<String>,
}

// ── Tests ──────────────────────────────────────────────────────
