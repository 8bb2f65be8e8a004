//! Login, logout and staff registration

use std::sync::Arc;

use tracing::info;
use validator::Validate;

use crate::application::session::{SessionContext, TokenStore};
use crate::domain::{AccountDraft, DomainResult, HotelBackend, LoginRequest};

pub struct IdentityService {
    backend: Arc<dyn HotelBackend>,
}

impl IdentityService {
    pub fn new(backend: Arc<dyn HotelBackend>) -> Self {
        Self { backend }
    }

    /// Exchange credentials for a token and start the session with it.
    pub async fn login<S: TokenStore>(
        &self,
        session: &mut SessionContext<S>,
        login: &LoginRequest,
    ) -> DomainResult<()> {
        login.validate()?;
        let credential = self.backend.obtain_token(login).await?;
        session.begin(credential)?;
        info!(user = %login.username, "Logged in");
        Ok(())
    }

    /// Drop the session token. Returns whether a session was active.
    pub fn logout<S: TokenStore>(&self, session: &mut SessionContext<S>) -> DomainResult<bool> {
        session.end()
    }

    /// Create a staff account. No session is needed.
    pub async fn register(&self, draft: &AccountDraft) -> DomainResult<()> {
        draft.validate()?;
        self.backend.register_account(draft).await?;
        info!(user = %draft.username, role = %draft.role, "Account registered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DomainError, RoomRepository, StaffRole};
    use crate::infrastructure::{InMemoryBackend, MemoryTokenStore};

    #[tokio::test]
    async fn login_sets_credential_usable_for_calls() {
        let backend = Arc::new(InMemoryBackend::seeded());
        let service = IdentityService::new(backend.clone());
        let mut session = SessionContext::restore(MemoryTokenStore::default()).unwrap();

        service
            .login(&mut session, &LoginRequest::new("admin", "admin1234"))
            .await
            .unwrap();
        let auth = session.credential().unwrap();
        assert_eq!(backend.list_rooms(auth).await.unwrap().len(), 4);

        assert!(service.logout(&mut session).unwrap());
        assert!(matches!(session.credential(), Err(DomainError::MissingCredential)));
    }

    #[tokio::test]
    async fn failed_login_leaves_session_empty() {
        let service = IdentityService::new(Arc::new(InMemoryBackend::seeded()));
        let mut session = SessionContext::restore(MemoryTokenStore::default()).unwrap();
        let err = service
            .login(&mut session, &LoginRequest::new("admin", "nope"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Rejected { status: 400, .. }));
        assert!(!session.is_active());
    }

    #[tokio::test]
    async fn blank_login_is_refused_locally() {
        let service = IdentityService::new(Arc::new(InMemoryBackend::seeded()));
        let mut session = SessionContext::restore(MemoryTokenStore::default()).unwrap();
        assert!(matches!(
            service.login(&mut session, &LoginRequest::new("", "")).await,
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn registered_account_can_log_in() {
        let service = IdentityService::new(Arc::new(InMemoryBackend::new()));
        let draft = AccountDraft {
            username: "gerente1".into(),
            email: "g1@example.com".into(),
            first_name: "Gina".into(),
            last_name: "López".into(),
            role: StaffRole::Manager,
            password: "supersecret".into(),
        };
        service.register(&draft).await.unwrap();

        let mut session = SessionContext::restore(MemoryTokenStore::default()).unwrap();
        service
            .login(&mut session, &LoginRequest::new("gerente1", "supersecret"))
            .await
            .unwrap();
        assert!(session.is_active());
    }
}
