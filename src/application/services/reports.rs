//! Reservation and income reports

use std::sync::Arc;

use tracing::debug;

use crate::domain::{
    Credential, DomainResult, HotelBackend, IncomeReport, IncomeReportFilter,
    ReservationReportFilter, ReservationReportRow,
};

pub struct ReportService {
    backend: Arc<dyn HotelBackend>,
}

impl ReportService {
    pub fn new(backend: Arc<dyn HotelBackend>) -> Self {
        Self { backend }
    }

    pub async fn reservations(
        &self,
        auth: &Credential,
        filter: &ReservationReportFilter,
    ) -> DomainResult<Vec<ReservationReportRow>> {
        let rows = self.backend.reservation_report(auth, filter).await?;
        debug!(rows = rows.len(), "Reservation report loaded");
        Ok(rows)
    }

    pub async fn income(&self, auth: &Credential, filter: &IncomeReportFilter) -> DomainResult<IncomeReport> {
        let report = self.backend.income_report(auth, filter).await?;
        debug!(total = %report.total, lines = report.by_method.len(), "Income report loaded");
        Ok(report)
    }
}
