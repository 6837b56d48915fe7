//! Calendar domain logic for the feeding calendar.
//!
//! This module owns the month grid: which concrete dates appear on a month
//! page, how they are tagged for rendering, and how months are named and
//! parsed. Bars drawn over the grid live in `lanes` and `segments`.

use chrono::{Datelike, Days, NaiveDate};
use log::{debug, warn};
use shared::{CalendarDay, CalendarDayType, YearMonth};
use std::collections::HashMap;

/// Errors raised when a month comes from untrusted input
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    #[error("Invalid month: {0}. Must be between 1 and 12")]
    InvalidMonth(u32),
    #[error("Cannot parse '{0}' as YYYY-MM")]
    InvalidFormat(String),
    #[error("Month {0} is outside the supported date range")]
    DateOutOfRange(String),
}

/// Ordered days of one month page, Sunday-first, always whole weeks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayGrid {
    month: YearMonth,
    days: Vec<NaiveDate>,
}

impl DayGrid {
    /// A grid with nothing to render
    pub fn empty(month: YearMonth) -> Self {
        Self {
            month,
            days: Vec::new(),
        }
    }

    pub fn month(&self) -> YearMonth {
        self.month
    }

    pub fn days(&self) -> &[NaiveDate] {
        &self.days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.days.len() / 7
    }

    /// First visible day (padding included)
    pub fn first(&self) -> Option<NaiveDate> {
        self.days.first().copied()
    }

    /// Last visible day (padding included)
    pub fn last(&self) -> Option<NaiveDate> {
        self.days.last().copied()
    }

    /// Lookup from calendar day to its position in the grid
    pub fn index_by_day(&self) -> HashMap<NaiveDate, usize> {
        self.days
            .iter()
            .enumerate()
            .map(|(index, day)| (*day, index))
            .collect()
    }
}

/// Build the padded day grid for `month`.
///
/// Leading cells are the last days of the previous month so the 1st lands in
/// its weekday column (Sunday = 0); trailing cells are the first days of the
/// next month until the final week is complete. If chrono cannot represent a
/// date on the way the grid is empty.
pub fn generate_day_grid(month: YearMonth) -> DayGrid {
    match build_days(month) {
        Some(days) => {
            debug!("Generated {} day grid with {} cells", month, days.len());
            DayGrid { month, days }
        }
        None => {
            warn!("Could not build a day grid for {}, rendering an empty month", month);
            DayGrid::empty(month)
        }
    }
}

fn build_days(month: YearMonth) -> Option<Vec<NaiveDate>> {
    let first = month.first_day()?;
    let leading = first.weekday().num_days_from_sunday() as usize;
    let cell_count = (leading + month.days_in_month() as usize).div_ceil(7) * 7;

    let mut days = Vec::with_capacity(cell_count);
    let mut day = first.checked_sub_days(Days::new(leading as u64))?;
    days.push(day);
    while days.len() < cell_count {
        day = day.succ_opt()?;
        days.push(day);
    }
    Some(days)
}

/// Calendar service that handles month naming, parsing and cell tagging
#[derive(Debug, Clone, Default)]
pub struct CalendarService;

impl CalendarService {
    pub fn new() -> Self {
        Self
    }

    /// Day grid for a month; see [`generate_day_grid`]
    pub fn day_grid(&self, month: YearMonth) -> DayGrid {
        generate_day_grid(month)
    }

    /// Tag each grid cell as padding or a real month day
    pub fn calendar_days(&self, grid: &DayGrid, today: NaiveDate) -> Vec<CalendarDay> {
        let month = grid.month();
        let first_of_month = month.first_day();
        grid.days()
            .iter()
            .map(|&date| {
                let day_type = if month.contains(date) {
                    CalendarDayType::MonthDay
                } else if first_of_month.is_some_and(|first| date < first) {
                    CalendarDayType::PaddingBefore
                } else {
                    CalendarDayType::PaddingAfter
                };
                CalendarDay {
                    date,
                    day: date.day(),
                    day_type,
                    is_today: date == today,
                }
            })
            .collect()
    }

    /// Get the human-readable name for a month number
    pub fn month_name(&self, month: u32) -> &'static str {
        match month {
            1 => "January", 2 => "February", 3 => "March", 4 => "April",
            5 => "May", 6 => "June", 7 => "July", 8 => "August",
            9 => "September", 10 => "October", 11 => "November", 12 => "December",
            _ => "Invalid Month",
        }
    }

    /// Page header, e.g. "March 2024"
    pub fn month_title(&self, month: YearMonth) -> String {
        format!("{} {}", self.month_name(month.month), month.year)
    }

    /// Parse a `YYYY-MM` month
    pub fn parse_year_month(&self, value: &str) -> Result<YearMonth, CalendarError> {
        let (year, month) = value
            .trim()
            .split_once('-')
            .ok_or_else(|| CalendarError::InvalidFormat(value.to_string()))?;
        let year: i32 = year
            .parse()
            .map_err(|_| CalendarError::InvalidFormat(value.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| CalendarError::InvalidFormat(value.to_string()))?;
        let parsed = YearMonth::new(year, month).ok_or(CalendarError::InvalidMonth(month))?;
        if parsed.first_day().is_none() {
            return Err(CalendarError::DateOutOfRange(value.to_string()));
        }
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ym(y: i32, m: u32) -> YearMonth {
        YearMonth::new(y, m).unwrap()
    }

    #[test]
    fn test_march_2024_grid() {
        let grid = generate_day_grid(ym(2024, 3));

        // March 1st 2024 is a Friday: five Feb days lead, April fills the last week
        assert_eq!(grid.len(), 42);
        assert_eq!(grid.row_count(), 6);
        assert_eq!(grid.first(), Some(date(2024, 2, 25)));
        assert_eq!(grid.days()[5], date(2024, 3, 1));
        assert_eq!(grid.last(), Some(date(2024, 4, 6)));
    }

    #[test]
    fn test_month_starting_on_sunday_has_no_leading_padding() {
        // September 2024 starts on a Sunday
        let grid = generate_day_grid(ym(2024, 9));
        assert_eq!(grid.first(), Some(date(2024, 9, 1)));
        assert_eq!(grid.len(), 35);
    }

    #[test]
    fn test_february_exactly_four_weeks() {
        // February 2015 starts on Sunday and has 28 days
        let grid = generate_day_grid(ym(2015, 2));
        assert_eq!(grid.len(), 28);
        assert_eq!(grid.first(), Some(date(2015, 2, 1)));
        assert_eq!(grid.last(), Some(date(2015, 2, 28)));
    }

    #[test]
    fn test_grid_is_whole_weeks_over_many_months() {
        let mut month = ym(1999, 6);
        for _ in 0..240 {
            let grid = generate_day_grid(month);
            assert!(!grid.is_empty(), "{} produced an empty grid", month);
            assert_eq!(grid.len() % 7, 0, "{} grid is not whole weeks", month);

            let first = month.first_day().unwrap();
            let last = month.last_day().unwrap();
            assert!(grid.first().unwrap() <= first);
            assert!(grid.last().unwrap() >= last);
            assert_eq!(grid.first().unwrap().weekday().num_days_from_sunday(), 0);

            // consecutive days, no gaps
            for pair in grid.days().windows(2) {
                assert_eq!(pair[0].succ_opt(), Some(pair[1]));
            }
            month = month.next();
        }
    }

    #[test]
    fn test_unrepresentable_month_yields_empty_grid() {
        let grid = generate_day_grid(YearMonth { year: i32::MAX, month: 12 });
        assert!(grid.is_empty());
        assert_eq!(grid.row_count(), 0);
        assert_eq!(grid.first(), None);
    }

    #[test]
    fn test_calendar_days_tagging() {
        let service = CalendarService::new();
        let grid = generate_day_grid(ym(2024, 3));
        let days = service.calendar_days(&grid, date(2024, 3, 20));

        assert_eq!(days[0].day_type, CalendarDayType::PaddingBefore);
        assert_eq!(days[0].day, 25);
        assert_eq!(days[5].day_type, CalendarDayType::MonthDay);
        assert_eq!(days[41].day_type, CalendarDayType::PaddingAfter);

        let today: Vec<_> = days.iter().filter(|d| d.is_today).collect();
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].date, date(2024, 3, 20));
    }

    #[test]
    fn test_month_title() {
        let service = CalendarService::new();
        assert_eq!(service.month_title(ym(2024, 3)), "March 2024");
        assert_eq!(service.month_name(13), "Invalid Month");
    }

    #[test]
    fn test_parse_year_month() {
        let service = CalendarService::new();
        assert_eq!(service.parse_year_month("2024-03"), Ok(ym(2024, 3)));
        assert_eq!(service.parse_year_month("2024-13"), Err(CalendarError::InvalidMonth(13)));
        assert!(matches!(
            service.parse_year_month("March"),
            Err(CalendarError::InvalidFormat(_))
        ));
        assert!(matches!(
            service.parse_year_month("999999-01"),
            Err(CalendarError::DateOutOfRange(_))
        ));
    }
}
