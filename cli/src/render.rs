//! Plain-text tables on stdout

use hotel_console::application::{PaymentForm, PaymentRow, ReservationLine};
use hotel_console::domain::{
    Guest, IncomeReport, Payment, Reservation, ReservationReportRow, Room,
};
use rust_decimal::Decimal;

const NONE: &str = "-";

fn money(value: Option<Decimal>) -> String {
    value.map(|v| format!("{:.2}", v)).unwrap_or_else(|| NONE.to_string())
}

fn empty(rows: usize) -> bool {
    if rows == 0 {
        println!("(none)");
    }
    rows == 0
}

pub fn rooms(rooms: &[Room]) {
    if empty(rooms.len()) {
        return;
    }
    println!("{:>5}  {:<14} {:<14} {:>10}", "ID", "TYPE", "STATUS", "RATE");
    for room in rooms {
        println!(
            "{:>5}  {:<14} {:<14} {:>10}",
            room.id,
            room.kind,
            room.status.to_string(),
            money(room.nightly_rate)
        );
    }
}

pub fn guests(guests: &[Guest]) {
    if empty(guests.len()) {
        return;
    }
    println!("{:>5}  {:<24} {:<12} {:<28} {}", "ID", "NAME", "DOCUMENT", "EMAIL", "PHONE");
    for g in guests {
        println!(
            "{:>5}  {:<24} {:<12} {:<28} {}",
            g.id, g.name, g.document, g.email, g.phone
        );
    }
}

pub fn reservation(r: &Reservation) {
    println!("Reservation #{}", r.id);
    println!("  guest   : {}", r.guest_id);
    println!("  room    : {}", r.room_id);
    println!("  from    : {}", r.start_date);
    println!("  until   : {}", r.end_date);
    println!("  status  : {}", r.status);
    let actions: Vec<String> = r.offered_actions().iter().map(|a| a.to_string()).collect();
    println!("  actions : {}", actions.join(", "));
}

pub fn reservations(lines: &[ReservationLine]) {
    if empty(lines.len()) {
        return;
    }
    println!(
        "{:>5}  {:<22} {:<20} {:<12} {:<12} {:<11} {}",
        "ID", "GUEST", "ROOM", "FROM", "UNTIL", "STATUS", "ACTIONS"
    );
    for line in lines {
        let r = &line.reservation;
        let actions: Vec<String> = line.actions.iter().map(|a| a.to_string()).collect();
        println!(
            "{:>5}  {:<22} {:<20} {:<12} {:<12} {:<11} {}",
            r.id,
            line.guest_name,
            line.room_label,
            r.start_date,
            r.end_date,
            r.status.to_string(),
            actions.join(", ")
        );
    }
}

pub fn payment_rows(rows: &[PaymentRow]) {
    if empty(rows.len()) {
        return;
    }
    println!(
        "{:>5}  {:<22} {:<6} {:>10} {:<14} {:<10} {}",
        "ID", "GUEST", "ROOM", "AMOUNT", "METHOD", "STATUS", "DATE"
    );
    for row in rows {
        let p = &row.payment;
        println!(
            "{:>5}  {:<22} {:<6} {:>10} {:<14} {:<10} {}",
            p.id,
            row.guest_name,
            row.room_number,
            money(p.amount),
            p.method.to_string(),
            p.status.to_string(),
            p.paid_at.as_deref().unwrap_or(NONE)
        );
    }
}

pub fn payment(p: &Payment) {
    println!("Payment #{}", p.id);
    println!(
        "  reservation : {}",
        p.reservation_id.map(|id| id.to_string()).unwrap_or_else(|| NONE.to_string())
    );
    println!("  amount      : {}", money(p.amount));
    println!("  method      : {}", p.method);
    println!("  status      : {}", p.status);
    println!("  date        : {}", p.paid_at.as_deref().unwrap_or(NONE));
}

pub fn payment_form(form: &PaymentForm) {
    if let Some(r) = form.selected() {
        println!("Paying {}", form.describe(r));
    }
    match form.pricing() {
        Some(Ok(q)) => println!(
            "  {} night(s) x {:.2} = {:.2}",
            q.nights, q.nightly_rate, q.amount
        ),
        Some(Err(reason)) => println!("  amount unavailable: {}", reason),
        None => {}
    }
    println!("  method {} / status {}", form.method, form.status);
}

/// Unpaid reservations with the amount each would be charged
pub fn unpaid(form: &PaymentForm) {
    if empty(form.reservations().len()) {
        return;
    }
    let mut trial = form.clone();
    println!("{:<60} {:>10}", "UNPAID RESERVATION", "AMOUNT");
    for r in form.reservations() {
        let amount = trial.select(r.id).ok().and_then(|_| trial.amount());
        println!("{:<60} {:>10}", form.describe(r), money(amount));
    }
}

pub fn reservation_report(rows: &[ReservationReportRow]) {
    if empty(rows.len()) {
        return;
    }
    println!(
        "{:<24} {:<14} {:<12} {:<12} {}",
        "GUEST", "ROOM TYPE", "FROM", "UNTIL", "STATUS"
    );
    for row in rows {
        println!(
            "{:<24} {:<14} {:<12} {:<12} {}",
            row.guest_name, row.room_kind, row.start_date, row.end_date, row.status
        );
    }
}

pub fn income_report(report: &IncomeReport) {
    for line in &report.by_method {
        println!("{:<16} {:>12.2}", line.method.to_string(), line.total);
    }
    println!("{:<16} {:>12.2}", "TOTAL", report.total);
}
