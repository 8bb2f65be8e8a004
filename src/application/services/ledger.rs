//! Payment listing and maintenance

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info};

use crate::application::search::{enrich_payments, PaymentRow, PaymentSearch};
use crate::domain::{
    index_guests, index_rooms, Credential, DomainResult, HotelBackend, Payment, PaymentFilter,
    PaymentUpdate, ReservationFilter,
};

pub struct LedgerService {
    backend: Arc<dyn HotelBackend>,
}

impl LedgerService {
    pub fn new(backend: Arc<dyn HotelBackend>) -> Self {
        Self { backend }
    }

    /// Payments with guest and room labels.
    ///
    /// Method and status are filtered by the backend. The search term is
    /// sent along and also re-applied locally to the labelled rows, so the
    /// result is the same whether or not the backend honours it.
    pub async fn list(&self, auth: &Credential, filter: &PaymentFilter) -> DomainResult<Vec<PaymentRow>> {
        let all = ReservationFilter::default();
        let (payments, reservations, guests, rooms) = tokio::try_join!(
            self.backend.list_payments(auth, filter),
            self.backend.list_reservations(auth, &all),
            self.backend.list_guests(auth, None),
            self.backend.list_rooms(auth),
        )?;

        let reservations: HashMap<_, _> = reservations.into_iter().map(|r| (r.id, r)).collect();
        let rows = enrich_payments(payments, &reservations, &index_guests(&guests), &index_rooms(&rooms));
        let fetched = rows.len();

        let rows = PaymentSearch::new(filter.search.as_deref()).apply(rows);
        debug!(fetched, shown = rows.len(), "Payments listed");
        Ok(rows)
    }

    pub async fn get(&self, auth: &Credential, id: i64) -> DomainResult<Payment> {
        self.backend.get_payment(auth, id).await
    }

    pub async fn update(&self, auth: &Credential, id: i64, update: &PaymentUpdate) -> DomainResult<Payment> {
        update.validate()?;
        let payment = self.backend.update_payment(auth, id, update).await?;
        info!(payment_id = id, status = %payment.status, "Payment updated");
        Ok(payment)
    }

    pub async fn delete(&self, auth: &Credential, id: i64) -> DomainResult<()> {
        self.backend.delete_payment(auth, id).await?;
        info!(payment_id = id, "Payment deleted");
        Ok(())
    }
}
