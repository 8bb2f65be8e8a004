//! Subcommands and their execution

use std::sync::Arc;

use chrono::NaiveDate;
use clap::{Args, Subcommand};
use rust_decimal::Decimal;
use tracing::info;

use hotel_console::application::{
    BookingService, CatalogService, CheckoutService, FrontDeskService, IdentityService,
    LedgerService, PaymentForm, ReportService, SessionContext, TokenStore,
};
use hotel_console::domain::{
    AccountDraft, DomainResult, GuestDraft, HotelBackend, IncomeReportFilter, LoginRequest,
    PaymentFilter, PaymentMethod, PaymentStatus, PaymentUpdate, ReservationDraft,
    ReservationFilter, ReservationReportFilter, ReservationStatus, RoomDraft, RoomStatus,
    StaffRole,
};

use crate::render;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in and keep the session token for later commands.
    Login {
        username: String,
        #[arg(long, env = "HOTEL_CONSOLE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the session token.
    Logout,
    /// Create a staff account (no login needed).
    Register(RegisterArgs),
    /// Rooms.
    #[command(subcommand)]
    Rooms(RoomsCommand),
    /// Guests.
    #[command(subcommand)]
    Guests(GuestsCommand),
    /// Reservations.
    #[command(subcommand)]
    Reservations(ReservationsCommand),
    /// Payments.
    #[command(subcommand)]
    Payments(PaymentsCommand),
    /// Reports.
    #[command(subcommand)]
    Reports(ReportsCommand),
    /// Validate the configuration file and exit.
    Check,
}

#[derive(Args, Debug)]
pub struct RegisterArgs {
    username: String,
    #[arg(long)]
    email: String,
    #[arg(long, env = "HOTEL_CONSOLE_PASSWORD", hide_env_values = true)]
    password: String,
    #[arg(long, default_value = "")]
    first_name: String,
    #[arg(long, default_value = "")]
    last_name: String,
    /// administrator, receptionist or manager
    #[arg(long, default_value = "receptionist")]
    role: StaffRole,
}

#[derive(Args, Debug)]
pub struct RoomArgs {
    /// Room type, e.g. single, double, suite
    #[arg(long)]
    kind: String,
    #[arg(long)]
    rate: Decimal,
    /// available, occupied or maintenance
    #[arg(long, default_value = "available")]
    status: RoomStatus,
}

impl From<RoomArgs> for RoomDraft {
    fn from(args: RoomArgs) -> Self {
        RoomDraft {
            kind: args.kind,
            status: args.status,
            nightly_rate: args.rate,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum RoomsCommand {
    List,
    Show { id: i64 },
    /// Rooms that can be booked now.
    Eligible,
    /// Rooms the backend reports free for a date range.
    Free {
        #[arg(long)]
        start: NaiveDate,
        #[arg(long)]
        end: NaiveDate,
    },
    Create(RoomArgs),
    Update {
        id: i64,
        #[command(flatten)]
        room: RoomArgs,
    },
    Delete { id: i64 },
}

#[derive(Args, Debug)]
pub struct GuestArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    document: String,
    #[arg(long)]
    email: String,
    #[arg(long, default_value = "")]
    phone: String,
}

impl From<GuestArgs> for GuestDraft {
    fn from(args: GuestArgs) -> Self {
        GuestDraft {
            name: args.name,
            document: args.document,
            email: args.email,
            phone: args.phone,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum GuestsCommand {
    List {
        /// Name, document or email fragment
        #[arg(long)]
        search: Option<String>,
    },
    Show { id: i64 },
    Create(GuestArgs),
    Update {
        id: i64,
        #[command(flatten)]
        guest: GuestArgs,
    },
    Delete { id: i64 },
}

#[derive(Args, Debug)]
pub struct StayArgs {
    #[arg(long)]
    guest: i64,
    #[arg(long)]
    room: i64,
    #[arg(long)]
    start: NaiveDate,
    #[arg(long)]
    end: NaiveDate,
}

#[derive(Subcommand, Debug)]
pub enum ReservationsCommand {
    List {
        /// Stays starting on or after this date
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Stays ending on or before this date
        #[arg(long)]
        until: Option<NaiveDate>,
        #[arg(long)]
        status: Option<ReservationStatus>,
        #[arg(long)]
        guest: Option<i64>,
        #[arg(long)]
        room: Option<i64>,
        #[arg(long)]
        unpaid: bool,
    },
    Show { id: i64 },
    /// Book a room; with --pay, record the payment right away.
    Create {
        #[command(flatten)]
        stay: StayArgs,
        /// cash, card or transfer
        #[arg(long)]
        pay: Option<PaymentMethod>,
        #[arg(long, default_value = "successful")]
        payment_status: PaymentStatus,
    },
    Update {
        id: i64,
        #[command(flatten)]
        stay: StayArgs,
        #[arg(long)]
        status: Option<ReservationStatus>,
    },
    Delete { id: i64 },
    CheckIn { id: i64 },
    CheckOut { id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum PaymentsCommand {
    List {
        #[arg(long)]
        method: Option<PaymentMethod>,
        #[arg(long)]
        status: Option<PaymentStatus>,
        /// Guest name or room number fragment
        #[arg(long)]
        search: Option<String>,
    },
    Show { id: i64 },
    /// Record a payment; the amount is derived from the reservation.
    /// Without --reservation, lists the unpaid reservations.
    New {
        #[arg(long)]
        reservation: Option<i64>,
        #[arg(long, default_value = "cash")]
        method: PaymentMethod,
        #[arg(long, default_value = "successful")]
        status: PaymentStatus,
    },
    Update {
        id: i64,
        #[arg(long)]
        method: Option<PaymentMethod>,
        #[arg(long)]
        status: Option<PaymentStatus>,
        #[arg(long)]
        amount: Option<Decimal>,
    },
    Delete { id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum ReportsCommand {
    Reservations {
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        until: Option<NaiveDate>,
        #[arg(long)]
        status: Option<ReservationStatus>,
    },
    Income {
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        until: Option<NaiveDate>,
        #[arg(long)]
        method: Option<PaymentMethod>,
    },
}

/// Services and session shared by all commands
pub struct Context<S: TokenStore> {
    session: SessionContext<S>,
    identity: IdentityService,
    catalog: CatalogService,
    booking: BookingService,
    checkout: CheckoutService,
    front_desk: FrontDeskService,
    ledger: LedgerService,
    reports: ReportService,
}

impl<S: TokenStore> Context<S> {
    pub fn new(backend: Arc<dyn HotelBackend>, session: SessionContext<S>) -> Self {
        Self {
            session,
            identity: IdentityService::new(backend.clone()),
            catalog: CatalogService::new(backend.clone()),
            booking: BookingService::new(backend.clone()),
            checkout: CheckoutService::new(backend.clone()),
            front_desk: FrontDeskService::new(backend.clone()),
            ledger: LedgerService::new(backend.clone()),
            reports: ReportService::new(backend),
        }
    }
}

pub async fn dispatch<S: TokenStore>(ctx: &mut Context<S>, command: Command) -> DomainResult<()> {
    match command {
        Command::Login { username, password } => {
            let login = LoginRequest::new(username, password);
            ctx.identity.login(&mut ctx.session, &login).await?;
            println!("Logged in as {}.", login.username);
            Ok(())
        }
        Command::Logout => {
            if ctx.identity.logout(&mut ctx.session)? {
                println!("Logged out.");
            } else {
                println!("No active session.");
            }
            Ok(())
        }
        Command::Register(args) => {
            let draft = AccountDraft {
                username: args.username,
                email: args.email,
                first_name: args.first_name,
                last_name: args.last_name,
                role: args.role,
                password: args.password,
            };
            ctx.identity.register(&draft).await?;
            println!("Account {} created ({}).", draft.username, draft.role);
            Ok(())
        }
        Command::Rooms(cmd) => rooms(ctx, cmd).await,
        Command::Guests(cmd) => guests(ctx, cmd).await,
        Command::Reservations(cmd) => reservations(ctx, cmd).await,
        Command::Payments(cmd) => payments(ctx, cmd).await,
        Command::Reports(cmd) => reports(ctx, cmd).await,
        // handled before a backend is built
        Command::Check => Ok(()),
    }
}

async fn rooms<S: TokenStore>(ctx: &Context<S>, cmd: RoomsCommand) -> DomainResult<()> {
    let auth = ctx.session.credential()?;
    match cmd {
        RoomsCommand::List => render::rooms(&ctx.catalog.rooms(auth).await?),
        RoomsCommand::Show { id } => render::rooms(&[ctx.catalog.room(auth, id).await?]),
        RoomsCommand::Eligible => render::rooms(&ctx.catalog.eligible_rooms(auth).await?),
        RoomsCommand::Free { start, end } => {
            render::rooms(&ctx.catalog.free_between(auth, start, end).await?)
        }
        RoomsCommand::Create(args) => {
            let room = ctx.catalog.create_room(auth, &args.into()).await?;
            println!("Created {}.", room.label());
        }
        RoomsCommand::Update { id, room } => {
            let room = ctx.catalog.update_room(auth, id, &room.into()).await?;
            println!("Updated {}.", room.label());
        }
        RoomsCommand::Delete { id } => {
            ctx.catalog.delete_room(auth, id).await?;
            println!("Deleted room {}.", id);
        }
    }
    Ok(())
}

async fn guests<S: TokenStore>(ctx: &Context<S>, cmd: GuestsCommand) -> DomainResult<()> {
    let auth = ctx.session.credential()?;
    match cmd {
        GuestsCommand::List { search } => {
            render::guests(&ctx.catalog.guests(auth, search.as_deref()).await?)
        }
        GuestsCommand::Show { id } => render::guests(&[ctx.catalog.guest(auth, id).await?]),
        GuestsCommand::Create(args) => {
            let guest = ctx.catalog.create_guest(auth, &args.into()).await?;
            println!("Registered guest #{} {}.", guest.id, guest.name);
        }
        GuestsCommand::Update { id, guest } => {
            let guest = ctx.catalog.update_guest(auth, id, &guest.into()).await?;
            println!("Updated guest #{} {}.", guest.id, guest.name);
        }
        GuestsCommand::Delete { id } => {
            ctx.catalog.delete_guest(auth, id).await?;
            println!("Deleted guest {}.", id);
        }
    }
    Ok(())
}

async fn reservations<S: TokenStore>(ctx: &Context<S>, cmd: ReservationsCommand) -> DomainResult<()> {
    let auth = ctx.session.credential()?;
    match cmd {
        ReservationsCommand::List {
            from,
            until,
            status,
            guest,
            room,
            unpaid,
        } => {
            let filter = ReservationFilter {
                start_from: from,
                end_until: until,
                status,
                guest_id: guest,
                room_id: room,
                unpaid_only: unpaid,
            };
            render::reservations(&ctx.front_desk.list(auth, &filter).await?);
        }
        ReservationsCommand::Show { id } => {
            render::reservation(&ctx.front_desk.get(auth, id).await?);
        }
        ReservationsCommand::Create {
            stay,
            pay,
            payment_status,
        } => {
            let draft = ReservationDraft {
                guest_id: stay.guest,
                room_id: stay.room,
                start_date: stay.start,
                end_date: stay.end,
                status: None,
            };
            let reservation = ctx.booking.book(auth, &draft).await?;
            println!("Reservation #{} created.", reservation.id);

            if let Some(method) = pay {
                info!(reservation_id = reservation.id, "Continuing to payment");
                let mut form = ctx.checkout.open(auth, Some(reservation.id)).await?;
                form.method = method;
                form.status = payment_status;
                submit_payment(ctx, &form).await?;
            }
        }
        ReservationsCommand::Update { id, stay, status } => {
            let draft = ReservationDraft {
                guest_id: stay.guest,
                room_id: stay.room,
                start_date: stay.start,
                end_date: stay.end,
                status,
            };
            let r = ctx.front_desk.update(auth, id, &draft).await?;
            println!("Reservation #{} updated ({}).", r.id, r.status);
        }
        ReservationsCommand::Delete { id } => {
            ctx.front_desk.delete(auth, id).await?;
            println!("Reservation #{} deleted.", id);
        }
        ReservationsCommand::CheckIn { id } => {
            ctx.front_desk.check_in(auth, id).await?;
            println!("Reservation #{} checked in.", id);
        }
        ReservationsCommand::CheckOut { id } => {
            ctx.front_desk.check_out(auth, id).await?;
            println!("Reservation #{} checked out.", id);
        }
    }
    Ok(())
}

async fn submit_payment<S: TokenStore>(ctx: &Context<S>, form: &PaymentForm) -> DomainResult<()> {
    let auth = ctx.session.credential()?;
    render::payment_form(form);
    let payment = ctx.checkout.submit(auth, form).await?;
    println!("Payment #{} recorded.", payment.id);
    Ok(())
}

async fn payments<S: TokenStore>(ctx: &Context<S>, cmd: PaymentsCommand) -> DomainResult<()> {
    let auth = ctx.session.credential()?;
    match cmd {
        PaymentsCommand::List {
            method,
            status,
            search,
        } => {
            let filter = PaymentFilter {
                method,
                status,
                search,
            };
            render::payment_rows(&ctx.ledger.list(auth, &filter).await?);
        }
        PaymentsCommand::Show { id } => {
            let payment = ctx.ledger.get(auth, id).await?;
            render::payment(&payment);
        }
        PaymentsCommand::New {
            reservation,
            method,
            status,
        } => {
            let mut form = ctx.checkout.open(auth, None).await?;
            match reservation {
                None => render::unpaid(&form),
                Some(id) => {
                    form.select(id)?;
                    form.method = method;
                    form.status = status;
                    submit_payment(ctx, &form).await?;
                }
            }
        }
        PaymentsCommand::Update {
            id,
            method,
            status,
            amount,
        } => {
            let stored = ctx.ledger.get(auth, id).await?;
            let mut update = PaymentUpdate::from_payment(&stored)?;
            if let Some(method) = method {
                update.method = method;
            }
            if let Some(status) = status {
                update.status = status;
            }
            if let Some(amount) = amount {
                update.amount = amount;
            }
            let payment = ctx.ledger.update(auth, id, &update).await?;
            render::payment(&payment);
        }
        PaymentsCommand::Delete { id } => {
            ctx.ledger.delete(auth, id).await?;
            println!("Payment #{} deleted.", id);
        }
    }
    Ok(())
}

async fn reports<S: TokenStore>(ctx: &Context<S>, cmd: ReportsCommand) -> DomainResult<()> {
    let auth = ctx.session.credential()?;
    match cmd {
        ReportsCommand::Reservations {
            from,
            until,
            status,
        } => {
            let filter = ReservationReportFilter {
                start_from: from,
                end_until: until,
                status,
            };
            render::reservation_report(&ctx.reports.reservations(auth, &filter).await?);
        }
        ReportsCommand::Income {
            from,
            until,
            method,
        } => {
            let filter = IncomeReportFilter {
                start_from: from,
                end_until: until,
                method,
            };
            render::income_report(&ctx.reports.income(auth, &filter).await?);
        }
    }
    Ok(())
}
