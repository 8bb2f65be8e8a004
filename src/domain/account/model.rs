//! Account domain types

use std::fmt;
use std::str::FromStr;

use sha2::{Digest, Sha256};
use validator::Validate;

use crate::domain::DomainError;

/// Opaque session token issued by the backend.
///
/// Passed explicitly to every outbound call. The secret never appears in
/// `Debug` output; logs use [`Credential::fingerprint`] instead.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a raw token. Blank tokens are rejected.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into().trim().to_string();
        if token.is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    pub fn secret(&self) -> &str {
        &self.0
    }

    /// Value of the `Authorization` header
    pub fn authorization_header(&self) -> String {
        format!("Token {}", self.0)
    }

    /// Short SHA-256 fingerprint used to identify the session in logs
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.0.as_bytes());
        hex::encode(&digest[..6])
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential({})", self.fingerprint())
    }
}

/// Login form
#[derive(Debug, Clone, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

impl LoginRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Staff role assigned at registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StaffRole {
    Administrator,
    #[default]
    Receptionist,
    Manager,
}

impl StaffRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Administrator => "administrador",
            Self::Receptionist => "recepcionista",
            Self::Manager => "gerente",
        }
    }
}

impl FromStr for StaffRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "administrador" | "administrator" | "admin" => Ok(Self::Administrator),
            "recepcionista" | "receptionist" => Ok(Self::Receptionist),
            "gerente" | "manager" => Ok(Self::Manager),
            other => Err(DomainError::Validation(format!("unknown role '{}'", other))),
        }
    }
}

impl fmt::Display for StaffRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Registration form
#[derive(Debug, Clone, Validate)]
pub struct AccountDraft {
    #[validate(length(min = 3, max = 50, message = "must be 3-50 characters"))]
    pub username: String,
    #[validate(email(message = "invalid email address"))]
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: StaffRole,
    #[validate(length(min = 8, message = "must be at least 8 characters"))]
    pub password: String,
}
