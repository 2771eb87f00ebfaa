//! Calendar-aware interval decomposition.
//!
//! [`diff`] splits the distance between two civil dates into whole years,
//! then whole months, then days, always moving forward from the start date.
//! Month arithmetic clamps to the last valid day of the target month, so
//! `Jan 31 + 1 month` is the last day of February and `Feb 29 + 1 year` is
//! `Feb 28`.
//!
//! Months never exceed 11: `2020-02-29 → 2024-02-28` is 3 years, 11 months
//! and 31 days, where a year-clamping library would report 3 years, 12 months.
use std::{fmt, str::FromStr};

use chrono::{Datelike, Days, Local, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A Gregorian calendar day with no time-of-day component.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CivilDate(NaiveDate);

impl CivilDate {
    /// Builds a date from its components, rejecting impossible days (Feb 30).
    pub fn new(year: i32, month: u32, day: u32) -> ResultEngine<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| EngineError::InvalidDate(format!("{year:04}-{month:02}-{day:02}")))
    }

    /// Today's date in the local timezone.
    #[must_use]
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    #[must_use]
    pub fn year(self) -> i32 {
        self.0.year()
    }

    /// Adds whole years, clamping Feb 29 to Feb 28 in non-leap years.
    pub fn add_years(self, years: u32) -> ResultEngine<Self> {
        let months = years
            .checked_mul(12)
            .ok_or_else(|| self.out_of_range(format!("+{years} years")))?;
        self.add_months(months)
    }

    /// Adds whole months, clamping to the last day of the target month.
    pub fn add_months(self, months: u32) -> ResultEngine<Self> {
        self.0
            .checked_add_months(Months::new(months))
            .map(Self)
            .ok_or_else(|| self.out_of_range(format!("+{months} months")))
    }

    pub fn add_days(self, days: u32) -> ResultEngine<Self> {
        self.0
            .checked_add_days(Days::new(u64::from(days)))
            .map(Self)
            .ok_or_else(|| self.out_of_range(format!("+{days} days")))
    }

    fn out_of_range(self, step: String) -> EngineError {
        EngineError::InvalidDate(format!("{self} {step} is out of the supported range"))
    }
}

impl From<NaiveDate> for CivilDate {
    fn from(value: NaiveDate) -> Self {
        Self(value)
    }
}

impl From<CivilDate> for NaiveDate {
    fn from(value: CivilDate) -> Self {
        value.0
    }
}

impl fmt::Display for CivilDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl FromStr for CivilDate {
    type Err = EngineError;

    /// Parses an ISO `YYYY-MM-DD` date.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
            .map(Self)
            .map_err(|err| EngineError::InvalidDate(format!("{s:?}: {err}")))
    }
}

/// Whole years, months and days between two dates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateInterval {
    pub years: u32,
    /// Always in `0..=11`.
    pub months: u32,
    pub days: u32,
}

impl DateInterval {
    pub const ZERO: DateInterval = DateInterval {
        years: 0,
        months: 0,
        days: 0,
    };

    /// Adds the interval to `start`: years, then months, then days.
    ///
    /// For an interval produced by [`diff`], this returns the original end date.
    pub fn apply_to(self, start: CivilDate) -> ResultEngine<CivilDate> {
        start
            .add_years(self.years)?
            .add_months(self.months)?
            .add_days(self.days)
    }
}

impl fmt::Display for DateInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn unit(n: u32, name: &str) -> String {
            if n == 1 {
                format!("{n} {name}")
            } else {
                format!("{n} {name}s")
            }
        }
        write!(
            f,
            "{}, {}, {}",
            unit(self.years, "year"),
            unit(self.months, "month"),
            unit(self.days, "day")
        )
    }
}

/// Decomposes `start..=end` into whole years, whole months and remaining days.
///
/// Greedy, largest unit first: the largest year count that keeps
/// `start + years <= end`, then the largest month count (at most 11) that
/// keeps the intermediate date `<= end`, then the day difference.
///
/// Returns [`EngineError::InvalidRange`] when `start > end`.
pub fn diff(start: CivilDate, end: CivilDate) -> ResultEngine<DateInterval> {
    if start > end {
        return Err(EngineError::InvalidRange(format!(
            "start {start} is after end {end}"
        )));
    }

    // end.year() >= start.year() because start <= end.
    let mut years = (end.year() - start.year()) as u32;
    while years > 0 && !not_after(start.add_years(years), end) {
        years -= 1;
    }
    let after_years = start.add_years(years)?;

    let mut months = 0;
    while months < 11 && not_after(after_years.add_months(months + 1), end) {
        months += 1;
    }
    let after_months = after_years.add_months(months)?;

    let days = (end.0 - after_months.0).num_days();
    let days = u32::try_from(days)
        .map_err(|_| EngineError::InvalidRange(format!("{days} days between {start} and {end}")))?;

    Ok(DateInterval {
        years,
        months,
        days,
    })
}

/// Age on `today` of someone born on `birth`.
///
/// A birth date in the future is [`EngineError::InvalidRange`].
pub fn age(birth: CivilDate, today: CivilDate) -> ResultEngine<DateInterval> {
    if birth > today {
        return Err(EngineError::InvalidRange(format!(
            "birth date {birth} is in the future"
        )));
    }
    diff(birth, today)
}

/// Length of service from `start` to `end`, or to today when `end` is `None`.
pub fn tenure(start: CivilDate, end: Option<CivilDate>) -> ResultEngine<DateInterval> {
    diff(start, end.unwrap_or_else(CivilDate::today))
}

fn not_after(candidate: ResultEngine<CivilDate>, end: CivilDate) -> bool {
    candidate.is_ok_and(|date| date <= end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> CivilDate {
        s.parse().unwrap()
    }

    fn interval(years: u32, months: u32, days: u32) -> DateInterval {
        DateInterval {
            years,
            months,
            days,
        }
    }

    #[test]
    fn same_day_is_zero() {
        let d = date("2024-02-29");
        assert_eq!(diff(d, d).unwrap(), DateInterval::ZERO);
    }

    #[test]
    fn reversed_range_is_rejected() {
        let err = diff(date("2024-01-02"), date("2024-01-01")).unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidRange("start 2024-01-02 is after end 2024-01-01".to_string())
        );
    }

    #[test]
    fn day_before_birthday() {
        assert_eq!(
            diff(date("1990-05-15"), date("2024-05-14")).unwrap(),
            interval(33, 11, 29)
        );
        assert_eq!(
            diff(date("1990-05-15"), date("2024-05-15")).unwrap(),
            interval(34, 0, 0)
        );
    }

    #[test]
    fn month_end_clamps_instead_of_overflowing() {
        // Jan 31 + 1 month = Feb 28, one day short of Mar 1.
        assert_eq!(
            diff(date("2021-01-31"), date("2021-03-01")).unwrap(),
            interval(0, 1, 1)
        );
        assert_eq!(
            diff(date("2021-01-31"), date("2021-02-28")).unwrap(),
            interval(0, 1, 0)
        );
    }

    #[test]
    fn leap_day_anniversary_clamps_to_feb_28() {
        assert_eq!(
            diff(date("2020-02-29"), date("2021-02-28")).unwrap(),
            interval(1, 0, 0)
        );
        assert_eq!(
            diff(date("2020-02-29"), date("2024-02-29")).unwrap(),
            interval(4, 0, 0)
        );
    }

    #[test]
    fn months_never_reach_twelve() {
        // 2020-02-29 + 3y = 2023-02-28; a 12th month would land on 2024-02-28
        // but the month count is capped at 11.
        let start = date("2020-02-29");
        let end = date("2024-02-28");
        let got = diff(start, end).unwrap();
        assert_eq!(got, interval(3, 11, 31));
        assert_eq!(got.apply_to(start).unwrap(), end);
    }

    #[test]
    fn reconstruction_reproduces_end() {
        let mut start = date("2019-12-01");
        let last_start = date("2021-03-31");
        while start <= last_start {
            for offset in (0..800).step_by(7) {
                let end = start.add_days(offset).unwrap();
                let got = diff(start, end).unwrap();
                assert!(got.months <= 11, "{start}..{end}: {got:?}");
                assert_eq!(got.apply_to(start).unwrap(), end, "{start}..{end}: {got:?}");
            }
            start = start.add_days(3).unwrap();
        }
    }

    #[test]
    fn age_rejects_future_birth() {
        assert!(matches!(
            age(date("2030-01-01"), date("2024-01-01")),
            Err(EngineError::InvalidRange(_))
        ));
        assert_eq!(
            age(date("2000-01-01"), date("2024-01-01")).unwrap(),
            interval(24, 0, 0)
        );
    }

    #[test]
    fn tenure_with_explicit_end() {
        assert_eq!(
            tenure(date("2015-09-01"), Some(date("2024-03-15"))).unwrap(),
            interval(8, 6, 14)
        );
    }

    #[test]
    fn tenure_defaults_to_today() {
        let start = CivilDate::today();
        let got = tenure(start, None).unwrap();
        // The clock may cross midnight between the two reads.
        assert_eq!((got.years, got.months), (0, 0));
        assert!(got.days <= 1);
    }

    #[test]
    fn invalid_components_are_rejected() {
        assert!(matches!(
            CivilDate::new(2023, 2, 29),
            Err(EngineError::InvalidDate(_))
        ));
        assert!(matches!(
            "2023-13-01".parse::<CivilDate>(),
            Err(EngineError::InvalidDate(_))
        ));
        assert_eq!(CivilDate::new(2024, 2, 29).unwrap().to_string(), "2024-02-29");
    }

    #[test]
    fn interval_display_pluralizes() {
        assert_eq!(interval(1, 0, 2).to_string(), "1 year, 0 months, 2 days");
    }
}
