//! Business-day calendar.
//!
//! A business day is a day that is neither a weekend day nor a holiday.
//! [`BusinessDayCalculator`] is bound to one calendar year and seeded with
//! the federal holidays of Ley Federal del Trabajo article 74:
//!
//! - Fixed: January 1, May 1, September 16, December 25
//! - Moveable: 1st Monday of February, 3rd Monday of March, 3rd Monday of
//!   November
//!
//! [`BusinessCalendar`] counts arbitrary ranges, building one calculator per
//! year the range touches and carrying custom holidays across all of them.

use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::BTreeSet;

use crate::config::RegionalConfig;
use crate::error::{EngineError, EngineResult};

/// Fixed-date federal holidays as `(month, day)`.
pub const FIXED_HOLIDAYS: [(u32, u32); 4] = [(1, 1), (5, 1), (9, 16), (12, 25)];

/// Moveable federal holidays as `(month, nth Monday)`.
pub const MONDAY_HOLIDAYS: [(u32, u32); 3] = [(2, 1), (3, 3), (11, 3)];

/// Returns the `n`th occurrence of `weekday` in a month.
///
/// Walks day by day from the 1st. Returns `None` when `n` is zero, the month
/// is invalid, or the month has fewer than `n` such weekdays.
///
/// # Example
///
/// ```
/// use nomina_engine::calculation::nth_weekday_of_month;
/// use chrono::{NaiveDate, Weekday};
///
/// let third_monday = nth_weekday_of_month(2025, 3, Weekday::Mon, 3);
/// assert_eq!(third_monday, NaiveDate::from_ymd_opt(2025, 3, 17));
/// ```
pub fn nth_weekday_of_month(year: i32, month: u32, weekday: Weekday, n: u32) -> Option<NaiveDate> {
    if n == 0 {
        return None;
    }

    let mut date = NaiveDate::from_ymd_opt(year, month, 1)?;
    let mut seen = 0;
    while date.month() == month {
        if date.weekday() == weekday {
            seen += 1;
            if seen == n {
                return Some(date);
            }
        }
        date = date.succ_opt()?;
    }
    None
}

/// Returns true for Saturdays and Sundays.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

fn federal_holidays(year: i32) -> EngineResult<BTreeSet<NaiveDate>> {
    let invalid_year = || EngineError::InvalidInput {
        field: "year".to_string(),
        message: format!("{} is outside the supported calendar range", year),
    };

    let mut holidays = BTreeSet::new();
    for (month, day) in FIXED_HOLIDAYS {
        holidays.insert(NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid_year)?);
    }
    for (month, n) in MONDAY_HOLIDAYS {
        holidays.insert(nth_weekday_of_month(year, month, Weekday::Mon, n).ok_or_else(invalid_year)?);
    }
    Ok(holidays)
}

/// Business-day calculator for a single calendar year.
///
/// The holiday set is seeded at construction and can be changed with
/// [`add_custom_holiday`](Self::add_custom_holiday) and
/// [`remove_holiday`](Self::remove_holiday). Set up holidays before sharing
/// the calculator; reads take `&self` and mutations take `&mut self`.
///
/// # Example
///
/// ```
/// use nomina_engine::calculation::BusinessDayCalculator;
/// use chrono::NaiveDate;
///
/// let calculator = BusinessDayCalculator::new(2025).unwrap();
/// let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2025, 1, 3).unwrap();
///
/// // New Year's Day is excluded
/// assert_eq!(calculator.business_day_count(start, end), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessDayCalculator {
    year: i32,
    holidays: BTreeSet<NaiveDate>,
}

impl BusinessDayCalculator {
    /// Creates a calculator for `year` seeded with the federal holidays.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the year is outside the supported date range.
    pub fn new(year: i32) -> EngineResult<Self> {
        Ok(Self {
            year,
            holidays: federal_holidays(year)?,
        })
    }

    /// Returns the year the calculator was built for.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Returns the holidays, in date order.
    pub fn holidays(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.holidays.iter().copied()
    }

    /// Returns true for Saturdays and Sundays.
    pub fn is_weekend(&self, date: NaiveDate) -> bool {
        is_weekend(date)
    }

    /// Returns true if the date is in the holiday set.
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date)
    }

    /// Returns true if the date is neither a weekend day nor a holiday.
    pub fn is_business_day(&self, date: NaiveDate) -> bool {
        !self.is_weekend(date) && !self.is_holiday(date)
    }

    /// Counts business days from `start` to `end`, both inclusive.
    ///
    /// Returns 0 when `end` is before `start`. Dates outside the
    /// calculator's year only have weekends excluded; use
    /// [`BusinessCalendar`] for ranges that cross a year boundary.
    pub fn business_day_count(&self, start: NaiveDate, end: NaiveDate) -> u32 {
        let mut count = 0;
        let mut date = start;
        while date <= end {
            if self.is_business_day(date) {
                count += 1;
            }
            match date.succ_opt() {
                Some(next) => date = next,
                None => break,
            }
        }
        count
    }

    /// Adds a holiday (company closure, local observance).
    ///
    /// Returns false if the date was already a holiday.
    pub fn add_custom_holiday(&mut self, date: NaiveDate) -> bool {
        self.holidays.insert(date)
    }

    /// Removes a holiday, federal or custom.
    ///
    /// Returns false if the date was not a holiday.
    pub fn remove_holiday(&mut self, date: NaiveDate) -> bool {
        self.holidays.remove(&date)
    }
}

/// Business-day calendar for ranges of any length.
///
/// Keeps custom additions and removals for any year and applies them to the
/// per-year calculators it builds while counting.
///
/// # Example
///
/// ```
/// use nomina_engine::calculation::BusinessCalendar;
/// use chrono::NaiveDate;
///
/// let calendar = BusinessCalendar::new();
/// let start = NaiveDate::from_ymd_opt(2024, 12, 23).unwrap();
/// let end = NaiveDate::from_ymd_opt(2025, 1, 3).unwrap();
///
/// // Christmas and New Year's Day fall in different years
/// assert_eq!(calendar.business_day_count(start, end).unwrap(), 8);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BusinessCalendar {
    added: BTreeSet<NaiveDate>,
    removed: BTreeSet<NaiveDate>,
}

impl BusinessCalendar {
    /// Creates a calendar with only the federal holidays.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a calendar that also observes the configured local holidays.
    pub fn with_local_holidays(regional: &RegionalConfig) -> Self {
        let mut calendar = Self::new();
        for holiday in &regional.local_holidays {
            calendar.add_custom_holiday(holiday.date);
        }
        calendar
    }

    /// Adds a holiday for whichever year it falls in.
    pub fn add_custom_holiday(&mut self, date: NaiveDate) {
        self.removed.remove(&date);
        self.added.insert(date);
    }

    /// Removes a holiday for whichever year it falls in.
    pub fn remove_holiday(&mut self, date: NaiveDate) {
        self.added.remove(&date);
        self.removed.insert(date);
    }

    /// Builds the calculator for one year with this calendar's changes applied.
    pub fn calculator_for_year(&self, year: i32) -> EngineResult<BusinessDayCalculator> {
        let mut calculator = BusinessDayCalculator::new(year)?;
        for date in self.added.iter().filter(|d| d.year() == year) {
            calculator.add_custom_holiday(*date);
        }
        for date in self.removed.iter().filter(|d| d.year() == year) {
            calculator.remove_holiday(*date);
        }
        Ok(calculator)
    }

    /// Returns true if the date is a holiday.
    pub fn is_holiday(&self, date: NaiveDate) -> EngineResult<bool> {
        Ok(self.calculator_for_year(date.year())?.is_holiday(date))
    }

    /// Returns true if the date is neither a weekend day nor a holiday.
    pub fn is_business_day(&self, date: NaiveDate) -> EngineResult<bool> {
        Ok(self.calculator_for_year(date.year())?.is_business_day(date))
    }

    /// Counts business days from `start` to `end`, both inclusive.
    ///
    /// The range is split at year boundaries and each part is counted
    /// against that year's holidays. Returns 0 when `end` is before `start`.
    pub fn business_day_count(&self, start: NaiveDate, end: NaiveDate) -> EngineResult<u32> {
        if end < start {
            return Ok(0);
        }

        let mut total = 0;
        for year in start.year()..=end.year() {
            let calculator = self.calculator_for_year(year)?;
            let year_start = start.max(year_bound(year, 1, 1)?);
            let year_end = end.min(year_bound(year, 12, 31)?);
            total += calculator.business_day_count(year_start, year_end);
        }
        Ok(total)
    }
}

fn year_bound(year: i32, month: u32, day: u32) -> EngineResult<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| EngineError::InvalidInput {
        field: "year".to_string(),
        message: format!("{} is outside the supported calendar range", year),
    })
}
