use proptest::prelude::*;
use wallclock::{CivilTime, Span, SpanFormat, Timestamp, TimestampFormat, Unit, UtcOffset};

// 1900-01-01 through 2100-01-01, in epoch milliseconds.
const MS_MIN: i64 = -2_208_988_800_000;
const MS_MAX: i64 = 4_102_444_800_000;

fn arb_timestamp() -> impl Strategy<Value = Timestamp> {
    (MS_MIN..=MS_MAX).prop_map(Timestamp::from_epoch_ms)
}

fn arb_offset() -> impl Strategy<Value = UtcOffset> {
    (-14 * 60..=14 * 60).prop_map(UtcOffset::from_mins)
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

proptest! {
    #[test]
    fn epoch_ms_round_trip(ms in MS_MIN..=MS_MAX) {
        prop_assert_eq!(Timestamp::from_epoch_ms(ms).epoch_ms(), ms);
    }

    #[test]
    fn epoch_secs_construction_scales(secs in MS_MIN / 1_000..=MS_MAX / 1_000) {
        let ts = Timestamp::from_epoch_secs(secs);
        prop_assert_eq!(ts.epoch_ms(), secs * 1_000);
        prop_assert_eq!(ts.epoch_secs(), secs);
    }

    #[test]
    fn epoch_secs_floors(ms in MS_MIN..=MS_MAX) {
        prop_assert_eq!(
            Timestamp::from_epoch_ms(ms).epoch_secs(),
            ms.div_euclid(1_000)
        );
    }

    #[test]
    fn civil_round_trip(ts in arb_timestamp(), offset in arb_offset()) {
        prop_assert_eq!(ts.civil_at(offset).at(offset), ts);
    }

    #[test]
    fn civil_fields_are_valid(ts in arb_timestamp(), offset in arb_offset()) {
        let c = ts.civil_at(offset);
        prop_assert!(CivilTime::new(
            c.year(),
            c.month(),
            c.day(),
            c.hour(),
            c.minute(),
            c.second(),
            c.millisecond(),
        )
        .is_some());
    }

    /// Every total_* view is the same magnitude re-expressed in another unit.
    #[test]
    fn span_totals_consistent(ms in -9.0e12..9.0e12f64) {
        let span = Span::from_ms(ms);
        prop_assert!(close(span.total_secs() * 1_000.0, span.total_ms()));
        prop_assert!(close(span.total_mins() * 60_000.0, span.total_ms()));
        prop_assert!(close(span.total_hours() * 3_600_000.0, span.total_ms()));
        prop_assert!(close(span.total_days() * 86_400_000.0, span.total_ms()));
    }

    #[test]
    fn span_magnitude_and_sign(ms in -9.0e12..9.0e12f64) {
        let span = Span::from_ms(ms);
        prop_assert_eq!(span.total_ms(), ms.abs());
        prop_assert_eq!(span.is_negative(), ms < 0.0);
        prop_assert_eq!(span.signed_ms(), ms);
    }

    #[test]
    fn span_factories_agree(secs in -9.0e8..9.0e8f64) {
        let from_secs = Span::from_secs(secs);
        let from_ms = Span::from_ms(secs * 1_000.0);
        prop_assert_eq!(from_secs.total_ms(), from_ms.total_ms());
        prop_assert_eq!(from_secs.is_negative(), from_ms.is_negative());
    }

    #[test]
    fn diff_antisymmetry(a in arb_timestamp(), b in arb_timestamp()) {
        let forward = a.diff(&b);
        let backward = b.diff(&a);
        prop_assert_eq!(forward.total_ms(), backward.total_ms());
        prop_assert_eq!(forward.signed_ms(), -backward.signed_ms());
        prop_assert_eq!(forward.signed_ms(), (a.epoch_ms() - b.epoch_ms()) as f64);
    }

    /// Exactly one of before/equal/after holds, and the or-equal forms are
    /// the disjunctions they claim to be.
    #[test]
    fn comparisons_form_total_order(a in arb_timestamp(), b in arb_timestamp()) {
        let relations = [a.before(&b), a.equal(&b), a.after(&b)];
        prop_assert_eq!(relations.iter().filter(|r| **r).count(), 1);
        prop_assert_eq!(a.before_or_equal(&b), a.before(&b) || a.equal(&b));
        prop_assert_eq!(a.after_or_equal(&b), a.after(&b) || a.equal(&b));
    }

    #[test]
    fn add_then_diff_recovers_shift(
        ts in arb_timestamp(),
        shift_ms in -86_400_000i64..=86_400_000,
    ) {
        let shifted = ts.add(Span::from_ms(shift_ms as f64));
        prop_assert_eq!(shifted.epoch_ms(), ts.epoch_ms() + shift_ms);
        prop_assert_eq!(shifted.diff(&ts).signed_ms(), shift_ms as f64);
    }

    #[test]
    fn subtract_inverts_add(ts in arb_timestamp(), shift_ms in 0i64..=86_400_000) {
        let span = Span::from_ms(shift_ms as f64);
        prop_assert_eq!(ts.add(span).subtract(span), ts);
    }

    #[test]
    fn start_of_is_idempotent(ts in arb_timestamp(), offset in arb_offset()) {
        for unit in [Unit::Year, Unit::Month, Unit::Day] {
            let once = ts.start_of_at(unit, offset).unwrap();
            prop_assert_eq!(once.start_of_at(unit, offset).unwrap(), once);
        }
    }

    #[test]
    fn start_of_day_keeps_date_and_zeroes_time(ts in arb_timestamp(), offset in arb_offset()) {
        let floored = ts.start_of_at(Unit::Day, offset).unwrap().civil_at(offset);
        let original = ts.civil_at(offset);
        prop_assert_eq!(
            (floored.year(), floored.month(), floored.day()),
            (original.year(), original.month(), original.day())
        );
        prop_assert_eq!(
            (floored.hour(), floored.minute(), floored.second(), floored.millisecond()),
            (0, 0, 0, 0)
        );
    }

    #[test]
    fn start_of_never_moves_forward(ts in arb_timestamp(), offset in arb_offset()) {
        for unit in [Unit::Year, Unit::Month, Unit::Day] {
            prop_assert!(ts.start_of_at(unit, offset).unwrap().before_or_equal(&ts));
        }
    }

    #[test]
    fn start_of_hour_always_unsupported(ts in arb_timestamp(), offset in arb_offset()) {
        prop_assert!(ts.start_of_at(Unit::Hour, offset).is_err());
    }

    #[test]
    fn next_day_is_86400_seconds(ts in arb_timestamp(), offset in arb_offset()) {
        prop_assert_eq!(
            ts.next_at(Unit::Day, offset).epoch_ms(),
            ts.epoch_ms() + 86_400_000
        );
    }

    #[test]
    fn next_hour_is_3600_seconds(ts in arb_timestamp(), offset in arb_offset()) {
        prop_assert_eq!(
            ts.next_at(Unit::Hour, offset).epoch_ms(),
            ts.epoch_ms() + 3_600_000
        );
    }

    /// A month advance covers the source month's length; a year advance
    /// covers 365 or 366 days.
    #[test]
    fn next_month_and_year_bounds(ts in arb_timestamp(), offset in arb_offset()) {
        let month_ms = ts.next_at(Unit::Month, offset).epoch_ms() - ts.epoch_ms();
        prop_assert_eq!(month_ms % 86_400_000, 0);
        prop_assert!((28..=31).contains(&(month_ms / 86_400_000)));
        let year_ms = ts.next_at(Unit::Year, offset).epoch_ms() - ts.epoch_ms();
        prop_assert!(year_ms == 365 * 86_400_000 || year_ms == 366 * 86_400_000);
    }

    /// Iso8601 output is YYYY-MM-DDTHH:MM:SS.mmm±HHMM with fixed widths.
    #[test]
    fn iso8601_shape(ts in arb_timestamp(), offset in arb_offset()) {
        let s = ts.format_at(TimestampFormat::Iso8601, offset);
        let bytes = s.as_bytes();
        prop_assert_eq!(s.len(), 28);
        prop_assert_eq!(bytes[4], b'-');
        prop_assert_eq!(bytes[7], b'-');
        prop_assert_eq!(bytes[10], b'T');
        prop_assert_eq!(bytes[13], b':');
        prop_assert_eq!(bytes[16], b':');
        prop_assert_eq!(bytes[19], b'.');
        prop_assert!(bytes[23] == b'+' || bytes[23] == b'-');
    }

    #[test]
    fn parse_format_round_trip(ts in arb_timestamp(), offset in arb_offset()) {
        let rendered = ts.format_at(TimestampFormat::Iso8601, offset);
        prop_assert_eq!(Timestamp::parse(&rendered), Ok(ts));
    }

    /// The ±HHMM rendering carries the whole-minute offset exactly.
    #[test]
    fn timezone_format_encodes_hours_and_minutes(mins in -899i32..900) {
        let rendered = Span::from_mins(mins as f64).format(SpanFormat::TimeZone);
        let sign = if mins < 0 { '-' } else { '+' };
        let expected = format!("{}{:02}{:02}", sign, mins.abs() / 60, mins.abs() % 60);
        prop_assert_eq!(rendered, expected);
    }

    /// The Basic components always recombine to the floored magnitude, and
    /// the decomposition never degenerates (no NaN from a zero divisor).
    #[test]
    fn basic_span_components_recombine(ms in 0i64..30 * 86_400_000) {
        let rendered = Span::from_ms(ms as f64).format(SpanFormat::Basic);
        prop_assert!(!rendered.contains("NaN"));
        let (days, rest) = rendered.split_once('.').unwrap();
        let (time, millis) = rest.rsplit_once('.').unwrap();
        let fields: Vec<i64> = time.split(':').map(|f| f.parse().unwrap()).collect();
        prop_assert_eq!(fields.len(), 3);
        let days: i64 = days.parse().unwrap();
        let millis: i64 = millis.parse().unwrap();
        let total =
            ((days * 24 + fields[0]) * 60 + fields[1]) * 60_000 + fields[2] * 1_000 + millis;
        prop_assert_eq!(total, ms);
    }
}
