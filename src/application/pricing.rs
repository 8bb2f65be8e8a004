//! Stay pricing for the payment form
//!
//! The amount owed for a reservation is `nights × nightly rate`, where
//! `nights` is the whole-day difference between end and start rounded up.
//! Anything that prevents a trustworthy value (unknown room, unparsable
//! date, empty or inverted stay, missing or negative rate) yields no amount
//! at all rather than zero.
//!
//! Nights are counted on naive wall-clock timestamps. No timezone is
//! applied, so a daylight-saving change inside the stay cannot shift the
//! night count. When both dates carry an explicit offset they must also be
//! in order as real instants.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

use crate::domain::{Reservation, RoomIndex};

const MILLIS_PER_NIGHT: i64 = 86_400_000;

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Why no amount could be derived
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Unpriceable {
    #[error("room {0} not found")]
    UnknownRoom(i64),
    #[error("invalid start date '{0}'")]
    InvalidStartDate(String),
    #[error("invalid end date '{0}'")]
    InvalidEndDate(String),
    #[error("end date must be after start date")]
    EmptyStay,
    #[error("room {0} has no valid nightly rate")]
    MissingRate(i64),
    #[error("room {0} has a negative nightly rate")]
    NegativeRate(i64),
    #[error("amount out of range")]
    Overflow,
}

/// A derived stay price
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StayQuote {
    pub nights: i64,
    pub nightly_rate: Decimal,
    /// Always two decimal places
    pub amount: Decimal,
}

/// A parsed reservation date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StayInstant {
    /// No offset given
    WallClock(NaiveDateTime),
    /// RFC 3339 value with an explicit offset
    Fixed(DateTime<FixedOffset>),
}

impl StayInstant {
    /// Wall-clock reading, in the value's own offset when it has one
    pub fn wall_clock(&self) -> NaiveDateTime {
        match self {
            Self::WallClock(dt) => *dt,
            Self::Fixed(dt) => dt.naive_local(),
        }
    }
}

/// Parse a reservation date as sent by the backend.
///
/// Accepts `YYYY-MM-DD` (midnight), `YYYY-MM-DDTHH:MM[:SS[.fff]]` and
/// RFC 3339 with an offset.
pub fn parse_stay_instant(raw: &str) -> Option<StayInstant> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(StayInstant::WallClock);
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(StayInstant::WallClock(dt));
        }
    }

    DateTime::parse_from_rfc3339(raw).ok().map(StayInstant::Fixed)
}

/// Nights between two dates, partial days rounded up.
///
/// `None` when `end` is not after `start` on the wall clock, or, for two
/// offset-carrying dates, as real instants.
pub fn nights_between(start: StayInstant, end: StayInstant) -> Option<i64> {
    if let (StayInstant::Fixed(s), StayInstant::Fixed(e)) = (start, end) {
        if e <= s {
            return None;
        }
    }
    let millis = (end.wall_clock() - start.wall_clock()).num_milliseconds();
    if millis <= 0 {
        return None;
    }
    Some((millis + MILLIS_PER_NIGHT - 1) / MILLIS_PER_NIGHT)
}

/// Price a reservation against the rooms it may refer to.
pub fn quote(reservation: &Reservation, rooms: &RoomIndex) -> Result<StayQuote, Unpriceable> {
    let room = rooms
        .get(&reservation.room_id)
        .ok_or(Unpriceable::UnknownRoom(reservation.room_id))?;

    let start = parse_stay_instant(&reservation.start_date)
        .ok_or_else(|| Unpriceable::InvalidStartDate(reservation.start_date.clone()))?;
    let end = parse_stay_instant(&reservation.end_date)
        .ok_or_else(|| Unpriceable::InvalidEndDate(reservation.end_date.clone()))?;

    let nights = nights_between(start, end).ok_or(Unpriceable::EmptyStay)?;

    let rate = room.nightly_rate.ok_or(Unpriceable::MissingRate(room.id))?;
    if rate.is_sign_negative() && !rate.is_zero() {
        return Err(Unpriceable::NegativeRate(room.id));
    }

    let mut amount = rate
        .checked_mul(Decimal::from(nights))
        .ok_or(Unpriceable::Overflow)?
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    amount.rescale(2);
    if amount.scale() != 2 {
        return Err(Unpriceable::Overflow);
    }

    Ok(StayQuote {
        nights,
        nightly_rate: rate,
        amount,
    })
}

/// Amount owed for a reservation, or `None` when it cannot be derived.
pub fn derive_amount(reservation: &Reservation, rooms: &RoomIndex) -> Option<Decimal> {
    quote(reservation, rooms).ok().map(|q| q.amount)
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{index_rooms, Room, RoomStatus};

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn rooms_with_rate(rate: &str) -> RoomIndex {
        index_rooms(&[Room::new(1, "double", RoomStatus::Available, dec(rate))])
    }

    fn stay(start: &str, end: &str) -> Reservation {
        Reservation::new(10, 5, 1, start, end)
    }

    #[test]
    fn two_nights_at_one_hundred() {
        let amount = derive_amount(&stay("2024-01-01", "2024-01-03"), &rooms_with_rate("100.00"));
        assert_eq!(amount, Some(dec("200.00")));
        assert_eq!(amount.unwrap().to_string(), "200.00");
    }

    #[test]
    fn same_day_is_absent() {
        let rooms = rooms_with_rate("100.00");
        assert_eq!(derive_amount(&stay("2024-01-01", "2024-01-01"), &rooms), None);
        assert_eq!(
            quote(&stay("2024-01-01", "2024-01-01"), &rooms),
            Err(Unpriceable::EmptyStay)
        );
    }

    #[test]
    fn partial_day_rounds_up_to_one_night() {
        let q = quote(&stay("2024-01-01", "2024-01-01T12:00"), &rooms_with_rate("100.00")).unwrap();
        assert_eq!(q.nights, 1);
        assert_eq!(q.amount, dec("100.00"));
    }

    #[test]
    fn inverted_range_is_absent() {
        assert_eq!(
            derive_amount(&stay("2024-01-05", "2024-01-01"), &rooms_with_rate("100.00")),
            None
        );
    }

    #[test]
    fn unknown_room_is_absent() {
        let mut r = stay("2024-01-01", "2024-01-03");
        r.room_id = 99;
        assert_eq!(
            quote(&r, &rooms_with_rate("100.00")),
            Err(Unpriceable::UnknownRoom(99))
        );
    }

    #[test]
    fn unparsable_dates_are_absent() {
        let rooms = rooms_with_rate("100.00");
        assert_eq!(
            quote(&stay("01/01/2024", "2024-01-03"), &rooms),
            Err(Unpriceable::InvalidStartDate("01/01/2024".into()))
        );
        assert_eq!(
            quote(&stay("2024-01-01", ""), &rooms),
            Err(Unpriceable::InvalidEndDate(String::new()))
        );
        assert_eq!(derive_amount(&stay("2024-02-30", "2024-03-02"), &rooms), None);
    }

    #[test]
    fn missing_rate_is_absent() {
        let mut room = Room::new(1, "double", RoomStatus::Available, Decimal::ZERO);
        room.nightly_rate = None;
        let rooms = index_rooms(&[room]);
        assert_eq!(
            quote(&stay("2024-01-01", "2024-01-03"), &rooms),
            Err(Unpriceable::MissingRate(1))
        );
    }

    #[test]
    fn negative_rate_is_absent() {
        assert_eq!(
            quote(&stay("2024-01-01", "2024-01-03"), &rooms_with_rate("-5")),
            Err(Unpriceable::NegativeRate(1))
        );
    }

    #[test]
    fn zero_rate_prices_at_zero() {
        let amount = derive_amount(&stay("2024-01-01", "2024-01-04"), &rooms_with_rate("0"));
        assert_eq!(amount.unwrap().to_string(), "0.00");
    }

    #[test]
    fn overflow_is_absent() {
        let rooms = index_rooms(&[Room::new(1, "palace", RoomStatus::Available, Decimal::MAX)]);
        assert_eq!(
            quote(&stay("2024-01-01", "2024-01-03"), &rooms),
            Err(Unpriceable::Overflow)
        );
    }

    #[test]
    fn amount_too_large_for_cents_is_absent() {
        let rooms = rooms_with_rate("5000000000000000000000000000");
        assert_eq!(
            quote(&stay("2024-01-01", "2024-01-02"), &rooms),
            Err(Unpriceable::Overflow)
        );
    }

    #[test]
    fn rounds_half_up_to_cents() {
        let q = quote(&stay("2024-01-01", "2024-01-02"), &rooms_with_rate("33.335")).unwrap();
        assert_eq!(q.amount.to_string(), "33.34");

        let q = quote(&stay("2024-01-01", "2024-01-04"), &rooms_with_rate("10.005")).unwrap();
        assert_eq!(q.amount.to_string(), "30.02");
    }

    #[test]
    fn matches_nights_times_rate_for_forward_ranges() {
        let cases = [
            ("2024-01-01", "2024-01-02", "80", 1),
            ("2024-01-30", "2024-02-02", "120.50", 3),
            ("2023-12-31", "2024-01-07", "99.99", 7),
            ("2024-02-28", "2024-03-01", "45", 2),
            ("2024-01-01T15:00", "2024-01-03T11:00", "60", 2),
            ("2024-01-01T10:00:00", "2024-01-03T10:00:01", "60", 3),
        ];
        for (start, end, rate, nights) in cases {
            let q = quote(&stay(start, end), &rooms_with_rate(rate)).unwrap();
            assert_eq!(q.nights, nights, "{} -> {}", start, end);
            let expected = (dec(rate) * Decimal::from(nights))
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            assert_eq!(q.amount, expected, "{} -> {}", start, end);
            assert_eq!(q.amount.scale(), 2);
        }
    }

    #[test]
    fn identical_inputs_give_identical_output() {
        let rooms = rooms_with_rate("87.40");
        let r = stay("2024-05-01", "2024-05-04");
        assert_eq!(derive_amount(&r, &rooms), derive_amount(&r, &rooms));
        assert_eq!(quote(&r, &rooms), quote(&r, &rooms));
    }

    #[test]
    fn daylight_saving_change_does_not_shift_nights() {
        // US spring-forward (2024-03-10) and EU fall-back (2024-10-27) weekends
        let rooms = rooms_with_rate("100");
        assert_eq!(quote(&stay("2024-03-09", "2024-03-11"), &rooms).unwrap().nights, 2);
        assert_eq!(quote(&stay("2024-10-26", "2024-10-28"), &rooms).unwrap().nights, 2);
    }

    #[test]
    fn rfc3339_keeps_wall_clock_time() {
        let start = parse_stay_instant("2024-03-09T00:00:00-05:00").unwrap();
        let end = parse_stay_instant("2024-03-11T00:00:00-04:00").unwrap();
        assert_eq!(nights_between(start, end), Some(2));
    }

    #[test]
    fn offsets_out_of_order_as_instants_are_absent() {
        // 04:00Z to 01:00Z, although the wall clock reads forward
        let rooms = rooms_with_rate("100");
        assert_eq!(
            quote(&stay("2024-01-01T23:00:00-05:00", "2024-01-02T01:00:00+00:00"), &rooms),
            Err(Unpriceable::EmptyStay)
        );
    }

    #[test]
    fn fall_back_with_offsets_keeps_night_count() {
        // 49 real hours across the US fall-back change, two nights on the wall clock
        let rooms = rooms_with_rate("100");
        let q = quote(&stay("2024-11-02T00:00:00-04:00", "2024-11-04T00:00:00-05:00"), &rooms).unwrap();
        assert_eq!(q.nights, 2);
    }

    #[test]
    fn parse_accepts_supported_forms() {
        assert!(parse_stay_instant("2024-01-01").is_some());
        assert!(parse_stay_instant(" 2024-01-01 ").is_some());
        assert!(parse_stay_instant("2024-01-01T12:00").is_some());
        assert!(parse_stay_instant("2024-01-01T12:00:30").is_some());
        assert!(parse_stay_instant("2024-01-01T12:00:30.250").is_some());
        assert!(parse_stay_instant("2024-01-01 12:00").is_some());
        assert!(matches!(
            parse_stay_instant("2024-01-01T12:00:00Z"),
            Some(StayInstant::Fixed(_))
        ));
        assert!(parse_stay_instant("tomorrow").is_none());
        assert!(parse_stay_instant("").is_none());
    }

    #[test]
    fn nights_between_is_none_for_non_positive_spans() {
        let t = parse_stay_instant("2024-01-01").unwrap().wall_clock();
        let at = StayInstant::WallClock;
        assert_eq!(nights_between(at(t), at(t)), None);
        assert_eq!(nights_between(at(t), at(t - chrono::Duration::hours(1))), None);
        assert_eq!(nights_between(at(t), at(t + chrono::Duration::milliseconds(1))), Some(1));
    }
}
