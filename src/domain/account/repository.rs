//! Account repository interface

use async_trait::async_trait;

use super::model::{AccountDraft, Credential, LoginRequest};
use crate::domain::DomainResult;

#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Exchange username and password for a session token
    async fn obtain_token(&self, login: &LoginRequest) -> DomainResult<Credential>;

    /// Register a new staff account (no session required)
    async fn register_account(&self, draft: &AccountDraft) -> DomainResult<()>;
}
