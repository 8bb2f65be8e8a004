//! REST implementation of the domain repositories

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Method;
use tracing::info;

use super::client::{missing, ApiClient};
use super::dto::{
    free_rooms_query, guest_query, income_report_query, payment_query, reservation_query,
    reservation_report_query, AccountBody, GuestBody, GuestDto, IncomeReportDto, Listing,
    LoginBody, PaymentBody, PaymentDto, ReservationBody, ReservationDto, ReservationReportRowDto,
    RoomBody, RoomDto, TokenDto,
};
use crate::domain::{
    AccountDraft, AccountRepository, Credential, DomainError, DomainResult, Guest, GuestDraft,
    GuestRepository, IncomeReport, IncomeReportFilter, LoginRequest, NewPayment, Payment,
    PaymentFilter, PaymentRepository, PaymentUpdate, ReportRepository, Reservation,
    ReservationDraft, ReservationFilter, ReservationReportFilter, ReservationReportRow,
    ReservationRepository, Room, RoomDraft, RoomRepository,
};
use crate::infrastructure::InfraError;

/// Hotel backend reached over HTTP
#[derive(Debug, Clone)]
pub struct RestGateway {
    api: ApiClient,
}

impl RestGateway {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, InfraError> {
        Ok(Self {
            api: ApiClient::new(base_url, timeout)?,
        })
    }

    pub fn base_url(&self) -> &str {
        self.api.base_url().as_str()
    }

    async fn list<T, D>(&self, auth: &Credential, path: &str, query: &[(&'static str, String)]) -> DomainResult<Vec<T>>
    where
        D: serde::de::DeserializeOwned + Into<T>,
    {
        let listing: Listing<D> = self.api.get(Some(auth), path, query).await?;
        Ok(listing.into_items().into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl RoomRepository for RestGateway {
    async fn list_rooms(&self, auth: &Credential) -> DomainResult<Vec<Room>> {
        self.list::<Room, RoomDto>(auth, "habitaciones/", &[]).await
    }

    async fn get_room(&self, auth: &Credential, id: i64) -> DomainResult<Room> {
        let dto: RoomDto = self
            .api
            .get(Some(auth), &format!("habitaciones/{}/", id), &[])
            .await
            .map_err(missing("room", id))?;
        Ok(dto.into())
    }

    async fn list_rooms_free_between(
        &self,
        auth: &Credential,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DomainResult<Vec<Room>> {
        self.list::<Room, RoomDto>(auth, "habitaciones/disponibles/", &free_rooms_query(start, end))
            .await
    }

    async fn create_room(&self, auth: &Credential, draft: &RoomDraft) -> DomainResult<Room> {
        let dto: RoomDto = self
            .api
            .send(Method::POST, Some(auth), "habitaciones/", &RoomBody::from(draft))
            .await?;
        Ok(dto.into())
    }

    async fn update_room(&self, auth: &Credential, id: i64, draft: &RoomDraft) -> DomainResult<Room> {
        let dto: RoomDto = self
            .api
            .send(Method::PUT, Some(auth), &format!("habitaciones/{}/", id), &RoomBody::from(draft))
            .await
            .map_err(missing("room", id))?;
        Ok(dto.into())
    }

    async fn delete_room(&self, auth: &Credential, id: i64) -> DomainResult<()> {
        self.api
            .call(Method::DELETE, Some(auth), &format!("habitaciones/{}/", id))
            .await
            .map_err(missing("room", id))
    }
}

#[async_trait]
impl GuestRepository for RestGateway {
    async fn list_guests(&self, auth: &Credential, search: Option<&str>) -> DomainResult<Vec<Guest>> {
        self.list::<Guest, GuestDto>(auth, "clientes/", &guest_query(search)).await
    }

    async fn get_guest(&self, auth: &Credential, id: i64) -> DomainResult<Guest> {
        let dto: GuestDto = self
            .api
            .get(Some(auth), &format!("clientes/{}/", id), &[])
            .await
            .map_err(missing("guest", id))?;
        Ok(dto.into())
    }

    async fn create_guest(&self, auth: &Credential, draft: &GuestDraft) -> DomainResult<Guest> {
        let dto: GuestDto = self
            .api
            .send(Method::POST, Some(auth), "clientes/", &GuestBody::from(draft))
            .await?;
        Ok(dto.into())
    }

    async fn update_guest(&self, auth: &Credential, id: i64, draft: &GuestDraft) -> DomainResult<Guest> {
        let dto: GuestDto = self
            .api
            .send(Method::PUT, Some(auth), &format!("clientes/{}/", id), &GuestBody::from(draft))
            .await
            .map_err(missing("guest", id))?;
        Ok(dto.into())
    }

    async fn delete_guest(&self, auth: &Credential, id: i64) -> DomainResult<()> {
        self.api
            .call(Method::DELETE, Some(auth), &format!("clientes/{}/", id))
            .await
            .map_err(missing("guest", id))
    }
}

#[async_trait]
impl ReservationRepository for RestGateway {
    async fn list_reservations(
        &self,
        auth: &Credential,
        filter: &ReservationFilter,
    ) -> DomainResult<Vec<Reservation>> {
        self.list::<Reservation, ReservationDto>(auth, "reservas/", &reservation_query(filter))
            .await
    }

    async fn get_reservation(&self, auth: &Credential, id: i64) -> DomainResult<Reservation> {
        let dto: ReservationDto = self
            .api
            .get(Some(auth), &format!("reservas/{}/", id), &[])
            .await
            .map_err(missing("reservation", id))?;
        Ok(dto.into())
    }

    async fn create_reservation(
        &self,
        auth: &Credential,
        draft: &ReservationDraft,
    ) -> DomainResult<Reservation> {
        let dto: ReservationDto = self
            .api
            .send(Method::POST, Some(auth), "reservas/", &ReservationBody::from(draft))
            .await?;
        Ok(dto.into())
    }

    async fn update_reservation(
        &self,
        auth: &Credential,
        id: i64,
        draft: &ReservationDraft,
    ) -> DomainResult<Reservation> {
        let dto: ReservationDto = self
            .api
            .send(
                Method::PUT,
                Some(auth),
                &format!("reservas/{}/", id),
                &ReservationBody::from(draft),
            )
            .await
            .map_err(missing("reservation", id))?;
        Ok(dto.into())
    }

    async fn delete_reservation(&self, auth: &Credential, id: i64) -> DomainResult<()> {
        self.api
            .call(Method::DELETE, Some(auth), &format!("reservas/{}/", id))
            .await
            .map_err(missing("reservation", id))
    }

    async fn check_in(&self, auth: &Credential, id: i64) -> DomainResult<()> {
        self.api
            .call(Method::POST, Some(auth), &format!("reservas/{}/checkin/", id))
            .await
            .map_err(missing("reservation", id))
    }

    async fn check_out(&self, auth: &Credential, id: i64) -> DomainResult<()> {
        self.api
            .call(Method::POST, Some(auth), &format!("reservas/{}/checkout/", id))
            .await
            .map_err(missing("reservation", id))
    }
}

#[async_trait]
impl PaymentRepository for RestGateway {
    async fn list_payments(
        &self,
        auth: &Credential,
        filter: &PaymentFilter,
    ) -> DomainResult<Vec<Payment>> {
        self.list::<Payment, PaymentDto>(auth, "pagos/", &payment_query(filter)).await
    }

    async fn get_payment(&self, auth: &Credential, id: i64) -> DomainResult<Payment> {
        let dto: PaymentDto = self
            .api
            .get(Some(auth), &format!("pagos/{}/", id), &[])
            .await
            .map_err(missing("payment", id))?;
        Ok(dto.into())
    }

    async fn create_payment(&self, auth: &Credential, payment: &NewPayment) -> DomainResult<Payment> {
        let dto: PaymentDto = self
            .api
            .send(Method::POST, Some(auth), "pagos/", &PaymentBody::from(payment))
            .await?;
        Ok(dto.into())
    }

    async fn update_payment(
        &self,
        auth: &Credential,
        id: i64,
        update: &PaymentUpdate,
    ) -> DomainResult<Payment> {
        let dto: PaymentDto = self
            .api
            .send(Method::PUT, Some(auth), &format!("pagos/{}/", id), &PaymentBody::from(update))
            .await
            .map_err(missing("payment", id))?;
        Ok(dto.into())
    }

    async fn delete_payment(&self, auth: &Credential, id: i64) -> DomainResult<()> {
        self.api
            .call(Method::DELETE, Some(auth), &format!("pagos/{}/", id))
            .await
            .map_err(missing("payment", id))
    }
}

#[async_trait]
impl ReportRepository for RestGateway {
    async fn reservation_report(
        &self,
        auth: &Credential,
        filter: &ReservationReportFilter,
    ) -> DomainResult<Vec<ReservationReportRow>> {
        self.list::<ReservationReportRow, ReservationReportRowDto>(
            auth,
            "reportes/reservas/",
            &reservation_report_query(filter),
        )
        .await
    }

    async fn income_report(
        &self,
        auth: &Credential,
        filter: &IncomeReportFilter,
    ) -> DomainResult<IncomeReport> {
        let dto: IncomeReportDto = self
            .api
            .get(Some(auth), "reportes/ingresos/", &income_report_query(filter))
            .await?;
        Ok(dto.into())
    }
}

#[async_trait]
impl AccountRepository for RestGateway {
    async fn obtain_token(&self, login: &LoginRequest) -> DomainResult<Credential> {
        let reply: TokenDto = self
            .api
            .send(Method::POST, None, "api-token-auth/", &LoginBody::from(login))
            .await?;
        let credential = Credential::new(reply.token)
            .ok_or_else(|| DomainError::Transport("server returned an empty token".to_string()))?;
        info!(user = %login.username, session = %credential.fingerprint(), "Token obtained");
        Ok(credential)
    }

    async fn register_account(&self, draft: &AccountDraft) -> DomainResult<()> {
        self.api
            .send_ignoring_reply(Method::POST, None, "usuarios/", &AccountBody::from(draft))
            .await
    }
}
