//! Infrastructure errors and their mapping onto domain errors

use thiserror::Error;

use crate::domain::DomainError;

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl From<InfraError> for DomainError {
    fn from(err: InfraError) -> Self {
        match err {
            InfraError::Http(e) => DomainError::Transport(e.to_string()),
            InfraError::Serialization(e) => {
                DomainError::Transport(format!("unexpected response: {}", e))
            }
            InfraError::InvalidUrl(e) => DomainError::Transport(format!("invalid URL: {}", e)),
            InfraError::Io(e) => DomainError::Storage(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_become_storage_errors() {
        let err: DomainError =
            InfraError::from(std::io::Error::new(std::io::ErrorKind::Other, "disk full")).into();
        assert!(matches!(err, DomainError::Storage(msg) if msg.contains("disk full")));
    }

    #[test]
    fn bad_url_is_a_transport_error() {
        let err: DomainError = InfraError::from(url::Url::parse("not a url").unwrap_err()).into();
        assert!(matches!(err, DomainError::Transport(_)));
    }
}
