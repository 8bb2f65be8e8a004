//! Domain errors

use thiserror::Error;

/// Domain-level error types
#[derive(Debug, Error)]
pub enum DomainError {
    /// No session token; the caller must log in before any remote call.
    #[error("Not authenticated: log in first")]
    MissingCredential,

    #[error("Not found: {entity} with id={id}")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The backend answered with a non-success status.
    #[error("Rejected by server ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("Transport: {0}")]
    Transport(String),

    /// The payment amount could not be derived, so the form must not be submitted.
    #[error("Amount unavailable: {0}")]
    AmountUnavailable(String),

    #[error("Storage: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound { entity, id }
    }

    /// Message suitable for showing to the operator.
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingCredential => "No session token. Please log in.".to_string(),
            Self::Rejected { body, .. } if !body.is_empty() => format!("Error: {}", body),
            other => other.to_string(),
        }
    }
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    let msg = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string());
                    if *field == "__all__" {
                        msg
                    } else {
                        format!("{}: {}", field, msg)
                    }
                })
            })
            .collect();
        messages.sort();

        if messages.is_empty() {
            Self::Validation("validation failed".to_string())
        } else {
            Self::Validation(messages.join("; "))
        }
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_message_shows_server_body() {
        let err = DomainError::Rejected {
            status: 400,
            body: r#"{"fecha_fin":["invalid"]}"#.into(),
        };
        assert_eq!(err.user_message(), r#"Error: {"fecha_fin":["invalid"]}"#);
    }

    #[test]
    fn missing_credential_asks_for_login() {
        assert!(DomainError::MissingCredential.user_message().contains("log in"));
    }
}
