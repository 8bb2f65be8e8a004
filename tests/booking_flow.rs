//! Front-desk workflows against the in-memory backend

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use hotel_console::application::{
    BookingService, CheckoutService, FrontDeskService, IdentityService, LedgerService,
    ReportService, SessionContext,
};
use hotel_console::domain::{
    DomainError, IncomeReportFilter, LoginRequest, PaymentFilter, PaymentMethod,
    ReservationDraft, ReservationFilter, ReservationStatus,
};
use hotel_console::infrastructure::{InMemoryBackend, MemoryTokenStore};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn draft(guest_id: i64, room_id: i64, start: &str, end: &str) -> ReservationDraft {
    ReservationDraft {
        guest_id,
        room_id,
        start_date: date(start),
        end_date: date(end),
        status: None,
    }
}

async fn logged_in(backend: Arc<InMemoryBackend>) -> SessionContext<MemoryTokenStore> {
    let mut session = SessionContext::restore(MemoryTokenStore::default()).unwrap();
    IdentityService::new(backend)
        .login(&mut session, &LoginRequest::new("admin", "admin1234"))
        .await
        .unwrap();
    session
}

#[tokio::test]
async fn book_pay_and_stay() {
    let backend = Arc::new(InMemoryBackend::seeded());
    let session = logged_in(backend.clone()).await;
    let auth = session.credential().unwrap();

    let booking = BookingService::new(backend.clone());
    let form = booking.load_form(auth).await.unwrap();
    let offered: Vec<i64> = form.rooms.iter().map(|r| r.id).collect();
    assert_eq!(offered, vec![1, 2]);

    let reservation = booking
        .book(auth, &draft(1, 1, "2024-08-01", "2024-08-04"))
        .await
        .unwrap();
    assert_eq!(reservation.status, ReservationStatus::Pending);

    // handoff straight into the payment form
    let checkout = CheckoutService::new(backend.clone());
    let mut pay = checkout.open(auth, Some(reservation.id)).await.unwrap();
    assert!(pay.is_locked());
    assert_eq!(pay.amount(), Some(Decimal::new(24000, 2)));
    pay.method = PaymentMethod::Card;
    let payment = checkout.submit(auth, &pay).await.unwrap();
    assert_eq!(payment.reservation_id, Some(reservation.id));

    let unpaid = checkout.open(auth, None).await.unwrap();
    assert!(unpaid.reservations().iter().all(|r| r.id != reservation.id));
    assert!(!unpaid.is_locked());

    let rows = LedgerService::new(backend.clone())
        .list(
            auth,
            &PaymentFilter {
                search: Some("TORRES".into()),
                ..PaymentFilter::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].guest_name, "Ana Torres");
    assert_eq!(rows[0].room_number, "1");

    let desk = FrontDeskService::new(backend.clone());
    desk.check_in(auth, reservation.id).await.unwrap();
    desk.check_out(auth, reservation.id).await.unwrap();
    let done = desk.get(auth, reservation.id).await.unwrap();
    assert_eq!(done.status, ReservationStatus::Finished);

    let income = ReportService::new(backend)
        .income(auth, &IncomeReportFilter::default())
        .await
        .unwrap();
    assert_eq!(income.total, Decimal::new(24000, 2));
}

#[tokio::test]
async fn unpriceable_reservation_cannot_be_paid() {
    let backend = Arc::new(InMemoryBackend::seeded());
    let session = logged_in(backend.clone()).await;
    let auth = session.credential().unwrap();

    // room 99 is not in the room list, so there is no rate to price with
    let orphan = backend.add_reservation(1, 99, "2024-09-01", "2024-09-03", ReservationStatus::Pending);
    let checkout = CheckoutService::new(backend.clone());
    let form = checkout.open(auth, Some(orphan.id)).await.unwrap();
    assert_eq!(form.amount(), None);
    assert!(matches!(
        checkout.submit(auth, &form).await,
        Err(DomainError::AmountUnavailable(_))
    ));

    let ledger = LedgerService::new(backend);
    assert!(ledger.list(auth, &PaymentFilter::default()).await.unwrap().is_empty());
}

#[tokio::test]
async fn second_payment_for_same_reservation_is_rejected() {
    let backend = Arc::new(InMemoryBackend::seeded());
    let session = logged_in(backend.clone()).await;
    let auth = session.credential().unwrap();

    let checkout = CheckoutService::new(backend);
    let form = checkout.open(auth, Some(2)).await.unwrap();
    assert_eq!(form.amount(), Some(Decimal::new(24000, 2)));
    checkout.submit(auth, &form).await.unwrap();
    assert!(matches!(
        checkout.submit(auth, &form).await,
        Err(DomainError::Rejected { status: 400, .. })
    ));
}

#[tokio::test]
async fn inverted_dates_never_reach_the_backend() {
    let backend = Arc::new(InMemoryBackend::seeded());
    let session = logged_in(backend.clone()).await;
    let auth = session.credential().unwrap();

    let result = BookingService::new(backend.clone())
        .book(auth, &draft(1, 1, "2024-08-04", "2024-08-01"))
        .await;
    assert!(matches!(result, Err(DomainError::Validation(_))));

    let lines = FrontDeskService::new(backend)
        .list(auth, &ReservationFilter::default())
        .await
        .unwrap();
    assert_eq!(lines.len(), 2);
}

#[tokio::test]
async fn logout_revokes_access_to_every_view() {
    let backend = Arc::new(InMemoryBackend::seeded());
    let mut session = logged_in(backend.clone()).await;
    assert!(session.is_active());

    let identity = IdentityService::new(backend);
    assert!(identity.logout(&mut session).unwrap());
    assert!(!identity.logout(&mut session).unwrap());
    assert!(matches!(session.credential(), Err(DomainError::MissingCredential)));
}

#[tokio::test]
async fn wrong_password_leaves_session_empty() {
    let backend = Arc::new(InMemoryBackend::seeded());
    let mut session = SessionContext::restore(MemoryTokenStore::default()).unwrap();
    let result = IdentityService::new(backend)
        .login(&mut session, &LoginRequest::new("admin", "nope"))
        .await;
    assert!(matches!(result, Err(DomainError::Rejected { status: 400, .. })));
    assert!(!session.is_active());
}
