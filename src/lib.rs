use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;

// --- Platform FFI for the local UTC offset ---

#[cfg(unix)]
mod platform {
    use super::days_from_civil;

    #[repr(C)]
    struct Tm {
        tm_sec: i32,
        tm_min: i32,
        tm_hour: i32,
        tm_mday: i32,
        tm_mon: i32,
        tm_year: i32,
        _rest: [i32; 3],
        #[cfg(any(target_os = "linux", target_os = "macos"))]
        _extra: [i64; 2],
    }

    #[repr(C)]
    struct Timespec {
        tv_sec: i64,
        tv_nsec: i64,
    }

    const CLOCK_REALTIME: i32 = 0;

    extern "C" {
        fn localtime_r(time: *const i64, result: *mut Tm) -> *mut Tm;
        fn clock_gettime(clk_id: i32, tp: *mut Timespec) -> i32;
    }

    /// Seconds east of UTC for the host's current local time, 0 if the
    /// platform calls fail. Reconstructed from the broken-down local fields
    /// so it works wherever `localtime_r` does.
    pub fn utc_offset_secs() -> i32 {
        unsafe {
            let mut ts = std::mem::zeroed::<Timespec>();
            if clock_gettime(CLOCK_REALTIME, &mut ts) != 0 {
                return 0;
            }
            let mut tm = std::mem::zeroed::<Tm>();
            if localtime_r(&ts.tv_sec, &mut tm).is_null() {
                return 0;
            }
            let days = days_from_civil(
                tm.tm_year as i64 + 1900,
                tm.tm_mon as i64 + 1,
                tm.tm_mday as i64,
            );
            let local = days * 86_400
                + tm.tm_hour as i64 * 3_600
                + tm.tm_min as i64 * 60
                + tm.tm_sec as i64;
            (local - ts.tv_sec) as i32
        }
    }
}

#[cfg(windows)]
mod platform {
    use super::days_from_civil;

    #[repr(C)]
    struct SYSTEMTIME {
        w_year: u16,
        w_month: u16,
        w_day_of_week: u16,
        w_day: u16,
        w_hour: u16,
        w_minute: u16,
        w_second: u16,
        w_milliseconds: u16,
    }

    extern "system" {
        fn GetLocalTime(lp_system_time: *mut SYSTEMTIME);
        fn GetSystemTime(lp_system_time: *mut SYSTEMTIME);
    }

    fn epoch_ms(st: &SYSTEMTIME) -> i64 {
        let days = days_from_civil(st.w_year as i64, st.w_month as i64, st.w_day as i64);
        days * 86_400_000
            + st.w_hour as i64 * 3_600_000
            + st.w_minute as i64 * 60_000
            + st.w_second as i64 * 1_000
            + st.w_milliseconds as i64
    }

    pub fn utc_offset_secs() -> i32 {
        unsafe {
            let mut local = std::mem::zeroed::<SYSTEMTIME>();
            let mut utc = std::mem::zeroed::<SYSTEMTIME>();
            GetLocalTime(&mut local as *mut SYSTEMTIME);
            GetSystemTime(&mut utc as *mut SYSTEMTIME);
            // The two reads are not atomic; offsets are whole minutes, so
            // rounding to the minute absorbs the skew.
            let diff_ms = epoch_ms(&local) - epoch_ms(&utc);
            ((diff_ms as f64 / 60_000.0).round() as i32) * 60
        }
    }
}

// --- Calendar math ---

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

/// Converts days since 1970-01-01 to a civil date using Howard Hinnant's
/// civil_from_days algorithm.
fn civil_from_days(days: i64) -> (i32, u8, u8) {
    let z = days + 719_468; // shift epoch to 0000-03-01
    let era = if z >= 0 { z } else { z - 146_096 } / 146_097;
    let doe = z - era * 146_097; // day of era [0, 146096]
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365; // year of era [0, 399]
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100); // day of year [0, 365]
    let mp = (5 * doy + 2) / 153; // month proxy [0, 11]
    let day = (doy - (153 * mp + 2) / 5 + 1) as u8;
    let month = if mp < 10 { mp + 3 } else { mp - 9 } as u8;
    let year = if month <= 2 { y + 1 } else { y };
    (year as i32, month, day)
}

/// Reverse of `civil_from_days`, Hinnant's days_from_civil algorithm.
///
/// The formula is linear in `day` past the end of the month and in `month`
/// one step past December, which is exactly the field-overflow rule
/// [`Timestamp::next`] relies on.
fn days_from_civil(year: i64, month: i64, day: i64) -> i64 {
    let y = if month <= 2 { year - 1 } else { year };
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = y - era * 400; // [0, 399]
    let mp = if month > 2 { month - 3 } else { month + 9 };
    let doy = (153 * mp + 2) / 5 + day - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

// --- Errors ---

/// Input to [`Timestamp::parse`] that does not describe a calendar date or
/// date-time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot parse {input:?} as a date-time")]
pub struct ParseError {
    input: String,
}

impl ParseError {
    fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
        }
    }

    /// The rejected input.
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// A calendar unit outside the set [`Timestamp::start_of`] supports.
///
/// Truncation is defined for [`Unit::Year`], [`Unit::Month`], and
/// [`Unit::Day`] only; hitting this error is a bug at the call site, not a
/// runtime condition to recover from.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{0:?} is not a truncation unit (expected Year, Month, or Day)")]
pub struct UnsupportedUnitError(pub Unit);

/// Calendar units for truncation and advancement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Year,
    Month,
    Day,
    Hour,
}

// --- UtcOffset ---

/// A fixed offset from UTC in seconds, east positive.
///
/// Offset-sensitive operations on [`Timestamp`] read [`UtcOffset::local`]
/// fresh on every call; their `_at` twins take an explicit offset so callers
/// and tests can pin one deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UtcOffset {
    secs: i32,
}

impl UtcOffset {
    /// The zero offset.
    pub const UTC: UtcOffset = UtcOffset { secs: 0 };

    /// The host process's current local offset.
    pub fn local() -> Self {
        Self {
            secs: platform::utc_offset_secs(),
        }
    }

    pub fn from_secs(secs: i32) -> Self {
        Self { secs }
    }

    pub fn from_mins(mins: i32) -> Self {
        Self { secs: mins * 60 }
    }

    pub fn secs(&self) -> i32 {
        self.secs
    }

    fn ms(&self) -> i64 {
        self.secs as i64 * 1_000
    }

    /// The offset as a signed span, as rendered in ISO-8601 suffixes.
    pub fn to_span(&self) -> Span {
        Span::from_secs(self.secs as f64)
    }
}

// --- Span ---

/// Rendering styles for [`Span`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanFormat {
    /// `D.HH:MM:SS.mmm`, day count unpadded.
    Basic,
    /// `±HHMM`, the ISO-8601 timezone-offset suffix.
    TimeZone,
}

/// A signed elapsed-time quantity.
///
/// The magnitude is stored once, in milliseconds. Every `total_*` accessor
/// is an exact re-expression of that one magnitude in another unit,
/// fractional and independent of the others: `total_hours` of a 90-minute
/// span is 1.5, not 1. Integer day/hour/minute components exist only at
/// render time.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    ms: f64,
    negative: bool,
}

struct SpanParts {
    days: f64,
    hours: f64,
    minutes: f64,
    seconds: f64,
    millis: f64,
}

impl Span {
    pub fn from_ms(ms: f64) -> Self {
        Self {
            ms: ms.abs(),
            negative: ms < 0.0,
        }
    }

    pub fn from_secs(secs: f64) -> Self {
        Self::from_ms(secs * 1_000.0)
    }

    pub fn from_mins(mins: f64) -> Self {
        Self::from_ms(mins * 60_000.0)
    }

    pub fn from_hours(hours: f64) -> Self {
        Self::from_ms(hours * 3_600_000.0)
    }

    pub fn from_days(days: f64) -> Self {
        Self::from_ms(days * 86_400_000.0)
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    pub fn total_ms(&self) -> f64 {
        self.ms
    }

    pub fn total_secs(&self) -> f64 {
        self.ms / 1_000.0
    }

    pub fn total_mins(&self) -> f64 {
        self.ms / 60_000.0
    }

    pub fn total_hours(&self) -> f64 {
        self.ms / 3_600_000.0
    }

    pub fn total_days(&self) -> f64 {
        self.ms / 86_400_000.0
    }

    /// The magnitude with the sign applied, in milliseconds.
    pub fn signed_ms(&self) -> f64 {
        if self.negative {
            -self.ms
        } else {
            self.ms
        }
    }

    /// Integer components for display, derived from the floored totals.
    ///
    /// Each field is its floored total modulo everything the larger fields
    /// already account for. When every larger field is zero the divisor
    /// would be zero too; the floored raw total stands in for that field
    /// instead.
    fn parts(&self) -> SpanParts {
        let days = self.total_days().floor();
        let hours = if days == 0.0 {
            self.total_hours().floor()
        } else {
            self.total_hours().floor() % (days * 24.0)
        };
        let minutes = if hours == 0.0 && days == 0.0 {
            self.total_mins().floor()
        } else {
            self.total_mins().floor() % ((days * 24.0 + hours) * 60.0)
        };
        let seconds = if minutes == 0.0 && hours == 0.0 && days == 0.0 {
            self.total_secs().floor()
        } else {
            self.total_secs().floor() % (((days * 24.0 + hours) * 60.0 + minutes) * 60.0)
        };
        let millis = if seconds == 0.0 && minutes == 0.0 && hours == 0.0 && days == 0.0 {
            self.total_ms().floor()
        } else {
            self.total_ms().floor()
                % ((((days * 24.0 + hours) * 60.0 + minutes) * 60.0 + seconds) * 1_000.0)
        };
        SpanParts {
            days,
            hours,
            minutes,
            seconds,
            millis,
        }
    }

    /// Renders the span. `Basic` is `D.HH:MM:SS.mmm` over the magnitude;
    /// `TimeZone` is `±HHMM` with the sign taken from the sign flag.
    pub fn format(&self, format: SpanFormat) -> String {
        let p = self.parts();
        match format {
            SpanFormat::TimeZone => {
                let sign = if self.negative { '-' } else { '+' };
                format!("{}{:02}{:02}", sign, p.hours, p.minutes)
            }
            SpanFormat::Basic => format!(
                "{}.{:02}:{:02}:{:02}.{:03}",
                p.days, p.hours, p.minutes, p.seconds, p.millis
            ),
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(SpanFormat::Basic))
    }
}

// --- CivilTime ---

/// A validated wall-clock date-time with no offset attached.
///
/// This is the broken-down form behind [`Timestamp`]'s accessors, parser,
/// and renderer; [`CivilTime::at`] pins it to an offset to get back an
/// absolute instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CivilTime {
    year: i32,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
    millisecond: u16,
}

impl CivilTime {
    pub fn new(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        millisecond: u16,
    ) -> Option<Self> {
        if !(1..=12).contains(&month) {
            return None;
        }
        if day < 1 || day > days_in_month(year, month) {
            return None;
        }
        if hour > 23 {
            return None;
        }
        if minute > 59 {
            return None;
        }
        if second > 59 {
            return None;
        }
        if millisecond > 999 {
            return None;
        }
        Some(Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            millisecond,
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }
    pub fn month(&self) -> u8 {
        self.month
    }
    pub fn day(&self) -> u8 {
        self.day
    }
    pub fn hour(&self) -> u8 {
        self.hour
    }
    pub fn minute(&self) -> u8 {
        self.minute
    }
    pub fn second(&self) -> u8 {
        self.second
    }
    pub fn millisecond(&self) -> u16 {
        self.millisecond
    }

    /// The instant at which this wall-clock reading occurs in a zone with
    /// the given offset.
    pub fn at(&self, offset: UtcOffset) -> Timestamp {
        let days = days_from_civil(self.year as i64, self.month as i64, self.day as i64);
        let local_ms = days * 86_400_000
            + self.hour as i64 * 3_600_000
            + self.minute as i64 * 60_000
            + self.second as i64 * 1_000
            + self.millisecond as i64;
        Timestamp {
            ms: local_ms - offset.ms(),
        }
    }
}

// --- Timestamp ---

/// Rendering styles for [`Timestamp`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampFormat {
    /// Human-readable local form for diagnostics, e.g.
    /// `Wed Jan 01 2025 07:30:05 GMT+0700`. Not a wire format.
    Basic,
    /// `YYYY-MM-DDTHH:mm:ss.sss±HHMM`.
    Iso8601,
}

/// An absolute point in time: a signed count of milliseconds since
/// 1970-01-01T00:00:00Z.
///
/// Equality and ordering compare that count directly; no timezone
/// normalization happens at comparison time. Every transformation returns a
/// new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Timestamp {
    ms: i64,
}

impl Timestamp {
    /// The current wall-clock instant.
    ///
    /// Sequential calls are non-decreasing under a stable host clock, but
    /// carry only millisecond resolution.
    pub fn now() -> Self {
        let duration = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        Self {
            ms: duration.as_millis() as i64,
        }
    }

    /// Exact construction from *seconds* since the epoch.
    ///
    /// Bare integers are read as seconds throughout this crate's
    /// collaborators (database columns, decoded buffers);
    /// [`Timestamp::from_epoch_ms`] is the millisecond entry point.
    pub fn from_epoch_secs(secs: i64) -> Self {
        Self { ms: secs * 1_000 }
    }

    /// Exact construction from milliseconds since the epoch.
    pub fn from_epoch_ms(ms: i64) -> Self {
        Self { ms }
    }

    /// Parses a date or date-time string.
    ///
    /// Accepts `YYYY-MM-DD` and `YYYY-MM-DD[T ]HH:MM[:SS[.fff]]` with an
    /// optional trailing `Z`, `±HH`, `±HHMM`, or `±HH:MM` offset. A
    /// date-only string denotes UTC midnight; a date-time without an offset
    /// is read in the host's local offset; an explicit offset wins.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let s = input.trim();
        let (year, s) = take_digits(s, 4).ok_or_else(|| ParseError::new(input))?;
        let s = s.strip_prefix('-').ok_or_else(|| ParseError::new(input))?;
        let (month, s) = take_digits(s, 2).ok_or_else(|| ParseError::new(input))?;
        let s = s.strip_prefix('-').ok_or_else(|| ParseError::new(input))?;
        let (day, s) = take_digits(s, 2).ok_or_else(|| ParseError::new(input))?;

        if s.is_empty() {
            // Date-only strings denote UTC midnight.
            let civil = CivilTime::new(year as i32, month as u8, day as u8, 0, 0, 0, 0)
                .ok_or_else(|| ParseError::new(input))?;
            return Ok(civil.at(UtcOffset::UTC));
        }

        let s = s
            .strip_prefix('T')
            .or_else(|| s.strip_prefix(' '))
            .ok_or_else(|| ParseError::new(input))?;
        let (hour, s) = take_digits(s, 2).ok_or_else(|| ParseError::new(input))?;
        let s = s.strip_prefix(':').ok_or_else(|| ParseError::new(input))?;
        let (minute, mut s) = take_digits(s, 2).ok_or_else(|| ParseError::new(input))?;

        let mut second: u32 = 0;
        let mut milli: u32 = 0;
        if let Some(rest) = s.strip_prefix(':') {
            let (sec, rest) = take_digits(rest, 2).ok_or_else(|| ParseError::new(input))?;
            second = sec;
            s = rest;
            if let Some(rest) = s.strip_prefix('.') {
                let ndigits = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
                if ndigits == 0 {
                    return Err(ParseError::new(input));
                }
                // Millisecond precision; extra fraction digits are dropped.
                let frac = &rest[..ndigits.min(3)];
                let scale = 10u32.pow((3 - frac.len()) as u32);
                milli = frac.parse::<u32>().map_err(|_| ParseError::new(input))? * scale;
                s = &rest[ndigits..];
            }
        }

        let offset = if s.is_empty() {
            UtcOffset::local()
        } else if s == "Z" || s == "z" {
            UtcOffset::UTC
        } else {
            let (sign, rest) = if let Some(rest) = s.strip_prefix('+') {
                (1, rest)
            } else if let Some(rest) = s.strip_prefix('-') {
                (-1, rest)
            } else {
                return Err(ParseError::new(input));
            };
            let (oh, rest) = take_digits(rest, 2).ok_or_else(|| ParseError::new(input))?;
            let (om, rest) = if rest.is_empty() {
                (0, rest)
            } else {
                let rest = rest.strip_prefix(':').unwrap_or(rest);
                take_digits(rest, 2).ok_or_else(|| ParseError::new(input))?
            };
            if !rest.is_empty() || oh > 23 || om > 59 {
                return Err(ParseError::new(input));
            }
            UtcOffset::from_secs(sign * (oh as i32 * 3_600 + om as i32 * 60))
        };

        let civil = CivilTime::new(
            year as i32,
            month as u8,
            day as u8,
            hour as u8,
            minute as u8,
            second as u8,
            milli as u16,
        )
        .ok_or_else(|| ParseError::new(input))?;
        Ok(civil.at(offset))
    }

    /// Milliseconds since the epoch, exact.
    pub fn epoch_ms(&self) -> i64 {
        self.ms
    }

    /// Seconds since the epoch, floored (pre-epoch instants round down).
    pub fn epoch_secs(&self) -> i64 {
        self.ms.div_euclid(1_000)
    }

    /// The wall-clock decomposition in a zone with the given offset.
    pub fn civil_at(&self, offset: UtcOffset) -> CivilTime {
        let shifted = self.ms + offset.ms();
        let days = shifted.div_euclid(86_400_000);
        let rem = shifted.rem_euclid(86_400_000);
        let (year, month, day) = civil_from_days(days);
        CivilTime {
            year,
            month,
            day,
            hour: (rem / 3_600_000) as u8,
            minute: (rem / 60_000 % 60) as u8,
            second: (rem / 1_000 % 60) as u8,
            millisecond: (rem % 1_000) as u16,
        }
    }

    /// The wall-clock decomposition at the host's current local offset.
    pub fn civil(&self) -> CivilTime {
        self.civil_at(UtcOffset::local())
    }

    pub fn year(&self) -> i32 {
        self.civil().year
    }
    pub fn month(&self) -> u8 {
        self.civil().month
    }
    pub fn day(&self) -> u8 {
        self.civil().day
    }
    pub fn hour(&self) -> u8 {
        self.civil().hour
    }
    pub fn minute(&self) -> u8 {
        self.civil().minute
    }
    pub fn second(&self) -> u8 {
        self.civil().second
    }
    pub fn millisecond(&self) -> u16 {
        self.civil().millisecond
    }

    /// The elapsed span `self - other`; negative when `self` is earlier.
    pub fn diff(&self, other: &Timestamp) -> Span {
        Span::from_ms((self.ms - other.ms) as f64)
    }

    /// Shifts forward by the span's exact millisecond amount. No calendar
    /// semantics; fractional milliseconds truncate toward zero.
    pub fn add(&self, span: Span) -> Timestamp {
        Timestamp {
            ms: (self.ms as f64 + span.signed_ms()).trunc() as i64,
        }
    }

    /// Shifts backward by the span's exact millisecond amount.
    pub fn subtract(&self, span: Span) -> Timestamp {
        Timestamp {
            ms: (self.ms as f64 - span.signed_ms()).trunc() as i64,
        }
    }

    pub fn equal(&self, other: &Timestamp) -> bool {
        self.ms == other.ms
    }

    pub fn before(&self, other: &Timestamp) -> bool {
        self.ms < other.ms
    }

    pub fn before_or_equal(&self, other: &Timestamp) -> bool {
        self.ms <= other.ms
    }

    pub fn after(&self, other: &Timestamp) -> bool {
        self.ms > other.ms
    }

    pub fn after_or_equal(&self, other: &Timestamp) -> bool {
        self.ms >= other.ms
    }

    /// Floors to the first instant of the unit in the host's local
    /// wall-clock. Defined for Year, Month, and Day only.
    pub fn start_of(&self, unit: Unit) -> Result<Timestamp, UnsupportedUnitError> {
        self.start_of_at(unit, UtcOffset::local())
    }

    /// Floors to the first instant of the unit in the given offset's
    /// wall-clock.
    pub fn start_of_at(
        &self,
        unit: Unit,
        offset: UtcOffset,
    ) -> Result<Timestamp, UnsupportedUnitError> {
        let c = self.civil_at(offset);
        let (month, day) = match unit {
            Unit::Year => (1, 1),
            Unit::Month => (c.month, 1),
            Unit::Day => (c.month, c.day),
            Unit::Hour => return Err(UnsupportedUnitError(unit)),
        };
        let days = days_from_civil(c.year as i64, month as i64, day as i64);
        Ok(Timestamp {
            ms: days * 86_400_000 - offset.ms(),
        })
    }

    /// Advances by one unit in the host's local wall-clock.
    pub fn next(&self, unit: Unit) -> Timestamp {
        self.next_at(unit, UtcOffset::local())
    }

    /// Advances by one calendar unit with field-overflow semantics: the
    /// unit's field is incremented and any excess rolls into the larger
    /// units. One month past Jan 31 is Mar 3 (there is no Feb 31), and one
    /// year past Feb 29 lands on Mar 1 of the non-leap target year.
    pub fn next_at(&self, unit: Unit, offset: UtcOffset) -> Timestamp {
        let c = self.civil_at(offset);
        let (mut year, mut month, mut day, mut hour) =
            (c.year as i64, c.month as i64, c.day as i64, c.hour as i64);
        match unit {
            Unit::Year => year += 1,
            Unit::Month => month += 1,
            Unit::Day => day += 1,
            Unit::Hour => hour += 1,
        }
        // days_from_civil extends linearly past the end of any month and
        // one month past December, which is the overflow rule wanted here.
        let days = days_from_civil(year, month, day);
        let local_ms = days * 86_400_000
            + hour * 3_600_000
            + c.minute as i64 * 60_000
            + c.second as i64 * 1_000
            + c.millisecond as i64;
        Timestamp {
            ms: local_ms - offset.ms(),
        }
    }

    /// Renders at the host's current local offset.
    pub fn format(&self, format: TimestampFormat) -> String {
        self.format_at(format, UtcOffset::local())
    }

    /// Renders at the given offset. `Iso8601` is the byte-exact
    /// `YYYY-MM-DDTHH:mm:ss.sss±HHMM` wire form.
    pub fn format_at(&self, format: TimestampFormat, offset: UtcOffset) -> String {
        let c = self.civil_at(offset);
        let zone = offset.to_span().format(SpanFormat::TimeZone);
        match format {
            TimestampFormat::Iso8601 => format!(
                "{:02}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}{}",
                c.year, c.month, c.day, c.hour, c.minute, c.second, c.millisecond, zone
            ),
            TimestampFormat::Basic => {
                let days = days_from_civil(c.year as i64, c.month as i64, c.day as i64);
                let weekday = WEEKDAYS[(days + 4).rem_euclid(7) as usize];
                format!(
                    "{} {} {:02} {} {:02}:{:02}:{:02} GMT{}",
                    weekday,
                    MONTHS[(c.month - 1) as usize],
                    c.day,
                    c.year,
                    c.hour,
                    c.minute,
                    c.second,
                    zone
                )
            }
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(TimestampFormat::Iso8601))
    }
}

/// Splits exactly `n` ASCII digits off the front of `s`.
fn take_digits(s: &str, n: usize) -> Option<(u32, &str)> {
    if s.len() < n || !s.as_bytes()[..n].iter().all(u8::is_ascii_digit) {
        return None;
    }
    let value = s[..n].parse().ok()?;
    Some((value, &s[n..]))
}
