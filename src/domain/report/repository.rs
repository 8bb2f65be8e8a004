//! Report repository interface

use async_trait::async_trait;

use super::model::{IncomeReport, IncomeReportFilter, ReservationReportFilter, ReservationReportRow};
use crate::domain::{Credential, DomainResult};

#[async_trait]
pub trait ReportRepository: Send + Sync {
    async fn reservation_report(
        &self,
        auth: &Credential,
        filter: &ReservationReportFilter,
    ) -> DomainResult<Vec<ReservationReportRow>>;

    async fn income_report(
        &self,
        auth: &Credential,
        filter: &IncomeReportFilter,
    ) -> DomainResult<IncomeReport>;
}
