//! Wire formats of the hotel REST API
//!
//! Field names follow the backend (Spanish). Conversions into domain types
//! are lenient: unknown status labels are preserved and unparsable money
//! values become `None`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::client::Query;
use crate::domain::{
    AccountDraft, Guest, GuestDraft, IncomeLine, IncomeReport, IncomeReportFilter, LoginRequest,
    NewPayment, Payment, PaymentFilter, PaymentMethod, PaymentStatus, PaymentUpdate, Reservation,
    ReservationDraft, ReservationFilter, ReservationReportFilter, ReservationReportRow,
    ReservationStatus, ReservationSummary, Room, RoomDraft, RoomStatus,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Accept a decimal sent as a JSON number or string; anything else is `None`.
fn lenient_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::Number(n) => parse_decimal(&n.to_string()),
        Value::String(s) => parse_decimal(&s),
        _ => None,
    }))
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    raw.parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::from_scientific(raw).ok())
}

fn day(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// List endpoints may answer with a bare array or a paginated envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Plain(Vec<T>),
    Paged { results: Vec<T> },
}

impl<T> Listing<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Plain(items) | Self::Paged { results: items } => items,
        }
    }
}

// ── Rooms ──────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RoomDto {
    pub id: i64,
    #[serde(default)]
    pub tipo: String,
    #[serde(default)]
    pub estado: String,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub precio: Option<Decimal>,
}

impl From<RoomDto> for Room {
    fn from(dto: RoomDto) -> Self {
        Room {
            id: dto.id,
            kind: dto.tipo,
            status: RoomStatus::from_wire(&dto.estado),
            nightly_rate: dto.precio,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RoomBody<'a> {
    pub tipo: &'a str,
    pub estado: &'a str,
    pub precio: Decimal,
}

impl<'a> From<&'a RoomDraft> for RoomBody<'a> {
    fn from(draft: &'a RoomDraft) -> Self {
        Self {
            tipo: &draft.kind,
            estado: draft.status.as_str(),
            precio: draft.nightly_rate,
        }
    }
}

pub fn free_rooms_query(start: NaiveDate, end: NaiveDate) -> Query {
    vec![("fecha_inicio", day(start)), ("fecha_fin", day(end))]
}

// ── Guests ─────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GuestDto {
    pub id: i64,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub documento: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub telefono: Option<String>,
}

impl From<GuestDto> for Guest {
    fn from(dto: GuestDto) -> Self {
        Guest {
            id: dto.id,
            name: dto.nombre,
            document: dto.documento,
            email: dto.email,
            phone: dto.telefono.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GuestBody<'a> {
    pub nombre: &'a str,
    pub documento: &'a str,
    pub email: &'a str,
    pub telefono: &'a str,
}

impl<'a> From<&'a GuestDraft> for GuestBody<'a> {
    fn from(draft: &'a GuestDraft) -> Self {
        Self {
            nombre: &draft.name,
            documento: &draft.document,
            email: &draft.email,
            telefono: &draft.phone,
        }
    }
}

pub fn guest_query(search: Option<&str>) -> Query {
    search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| vec![("search", s.to_string())])
        .unwrap_or_default()
}

// ── Reservations ───────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ReservationDto {
    pub id: i64,
    pub cliente: i64,
    pub habitacion: i64,
    #[serde(default)]
    pub fecha_inicio: String,
    #[serde(default)]
    pub fecha_fin: String,
    #[serde(default)]
    pub estado: String,
}

impl From<ReservationDto> for Reservation {
    fn from(dto: ReservationDto) -> Self {
        Reservation {
            id: dto.id,
            guest_id: dto.cliente,
            room_id: dto.habitacion,
            start_date: dto.fecha_inicio,
            end_date: dto.fecha_fin,
            status: ReservationStatus::from_wire(&dto.estado),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReservationBody<'a> {
    pub cliente: i64,
    pub habitacion: i64,
    pub fecha_inicio: String,
    pub fecha_fin: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estado: Option<&'a str>,
}

impl<'a> From<&'a ReservationDraft> for ReservationBody<'a> {
    fn from(draft: &'a ReservationDraft) -> Self {
        Self {
            cliente: draft.guest_id,
            habitacion: draft.room_id,
            fecha_inicio: day(draft.start_date),
            fecha_fin: day(draft.end_date),
            estado: draft.status.as_ref().map(|s| s.as_str()),
        }
    }
}

pub fn reservation_query(filter: &ReservationFilter) -> Query {
    let mut query = Query::new();
    if let Some(d) = filter.start_from {
        query.push(("fecha_inicio", day(d)));
    }
    if let Some(d) = filter.end_until {
        query.push(("fecha_fin", day(d)));
    }
    if let Some(status) = &filter.status {
        query.push(("estado", status.as_str().to_string()));
    }
    if let Some(id) = filter.guest_id {
        query.push(("cliente", id.to_string()));
    }
    if let Some(id) = filter.room_id {
        query.push(("habitacion", id.to_string()));
    }
    if filter.unpaid_only {
        query.push(("pago__isnull", "true".to_string()));
    }
    query
}

// ── Payments ───────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SummaryDto {
    #[serde(default)]
    pub cliente_nombre: Option<String>,
    #[serde(default)]
    pub habitacion_id: Option<i64>,
}

/// Payment as listed. Older endpoints send `reserva_id` and `fecha`
/// instead of `reserva` and `fecha_pago`.
#[derive(Debug, Deserialize)]
pub struct PaymentDto {
    pub id: i64,
    #[serde(default)]
    pub reserva: Option<i64>,
    #[serde(default)]
    pub reserva_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub monto: Option<Decimal>,
    #[serde(default)]
    pub tipo_pago: String,
    #[serde(default)]
    pub estado: String,
    #[serde(default)]
    pub fecha_pago: Option<String>,
    #[serde(default)]
    pub fecha: Option<String>,
    #[serde(default)]
    pub reserva_resumen: Option<SummaryDto>,
}

impl From<PaymentDto> for Payment {
    fn from(dto: PaymentDto) -> Self {
        Payment {
            id: dto.id,
            reservation_id: dto.reserva.or(dto.reserva_id),
            amount: dto.monto,
            method: PaymentMethod::from_wire(&dto.tipo_pago),
            status: PaymentStatus::from_wire(&dto.estado),
            paid_at: dto.fecha_pago.or(dto.fecha),
            summary: dto.reserva_resumen.map(|s| ReservationSummary {
                guest_name: s.cliente_nombre,
                room_id: s.habitacion_id,
            }),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PaymentBody<'a> {
    pub reserva: i64,
    pub monto: Decimal,
    pub tipo_pago: &'a str,
    pub estado: &'a str,
}

impl<'a> From<&'a NewPayment> for PaymentBody<'a> {
    fn from(payment: &'a NewPayment) -> Self {
        Self {
            reserva: payment.reservation_id(),
            monto: payment.amount(),
            tipo_pago: payment.method().as_str(),
            estado: payment.status().as_str(),
        }
    }
}

impl<'a> From<&'a PaymentUpdate> for PaymentBody<'a> {
    fn from(update: &'a PaymentUpdate) -> Self {
        Self {
            reserva: update.reservation_id,
            monto: update.amount,
            tipo_pago: update.method.as_str(),
            estado: update.status.as_str(),
        }
    }
}

pub fn payment_query(filter: &PaymentFilter) -> Query {
    let mut query = Query::new();
    if let Some(method) = &filter.method {
        query.push(("tipo_pago", method.as_str().to_string()));
    }
    if let Some(status) = &filter.status {
        query.push(("estado", status.as_str().to_string()));
    }
    if let Some(term) = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        query.push(("search", term.to_string()));
    }
    query
}

// ── Reports ────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ReservationReportRowDto {
    #[serde(rename = "cliente__nombre", default)]
    pub guest_name: Option<String>,
    #[serde(rename = "habitacion__tipo", default)]
    pub room_kind: Option<String>,
    #[serde(default)]
    pub fecha_inicio: String,
    #[serde(default)]
    pub fecha_fin: String,
    #[serde(default)]
    pub estado: String,
}

impl From<ReservationReportRowDto> for ReservationReportRow {
    fn from(dto: ReservationReportRowDto) -> Self {
        ReservationReportRow {
            guest_name: dto.guest_name.unwrap_or_default(),
            room_kind: dto.room_kind.unwrap_or_default(),
            start_date: dto.fecha_inicio,
            end_date: dto.fecha_fin,
            status: ReservationStatus::from_wire(&dto.estado),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct IncomeLineDto {
    #[serde(default)]
    pub tipo_pago: String,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub total: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
pub struct IncomeReportDto {
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub total_general: Option<Decimal>,
    #[serde(default)]
    pub detalle_por_tipo: Vec<IncomeLineDto>,
}

impl From<IncomeReportDto> for IncomeReport {
    fn from(dto: IncomeReportDto) -> Self {
        IncomeReport {
            total: dto.total_general.unwrap_or_default(),
            by_method: dto
                .detalle_por_tipo
                .into_iter()
                .map(|line| IncomeLine {
                    method: PaymentMethod::from_wire(&line.tipo_pago),
                    total: line.total.unwrap_or_default(),
                })
                .collect(),
        }
    }
}

pub fn reservation_report_query(filter: &ReservationReportFilter) -> Query {
    let mut query = Query::new();
    if let Some(d) = filter.start_from {
        query.push(("fecha_inicio", day(d)));
    }
    if let Some(d) = filter.end_until {
        query.push(("fecha_fin", day(d)));
    }
    if let Some(status) = &filter.status {
        query.push(("estado", status.as_str().to_string()));
    }
    query
}

pub fn income_report_query(filter: &IncomeReportFilter) -> Query {
    let mut query = Query::new();
    if let Some(d) = filter.start_from {
        query.push(("fecha_inicio", day(d)));
    }
    if let Some(d) = filter.end_until {
        query.push(("fecha_fin", day(d)));
    }
    if let Some(method) = &filter.method {
        query.push(("tipo_pago", method.as_str().to_string()));
    }
    query
}

// ── Accounts ───────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct LoginBody<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

impl<'a> From<&'a LoginRequest> for LoginBody<'a> {
    fn from(login: &'a LoginRequest) -> Self {
        Self {
            username: &login.username,
            password: &login.password,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TokenDto {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct AccountBody<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub rol: &'a str,
    pub password: &'a str,
}

impl<'a> From<&'a AccountDraft> for AccountBody<'a> {
    fn from(draft: &'a AccountDraft) -> Self {
        Self {
            username: &draft.username,
            email: &draft.email,
            first_name: &draft.first_name,
            last_name: &draft.last_name,
            rol: draft.role.as_str(),
            password: &draft.password,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────
