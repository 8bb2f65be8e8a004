//! Payment repository interface

use async_trait::async_trait;

use super::model::{NewPayment, Payment, PaymentFilter, PaymentUpdate};
use crate::domain::{Credential, DomainResult};

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// List payments; method/status/search are applied by the backend
    async fn list_payments(
        &self,
        auth: &Credential,
        filter: &PaymentFilter,
    ) -> DomainResult<Vec<Payment>>;

    async fn get_payment(&self, auth: &Credential, id: i64) -> DomainResult<Payment>;

    async fn create_payment(&self, auth: &Credential, payment: &NewPayment)
        -> DomainResult<Payment>;

    async fn update_payment(
        &self,
        auth: &Credential,
        id: i64,
        update: &PaymentUpdate,
    ) -> DomainResult<Payment>;

    async fn delete_payment(&self, auth: &Credential, id: i64) -> DomainResult<()>;
}
