// Date utility functions
// Calendar-day arithmetic shared by the grid, the layout engine and the board

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, TimeZone};

/// Anything that can be reduced to a local calendar day.
pub trait CalendarDay {
    fn calendar_day(&self) -> NaiveDate;
}

impl CalendarDay for NaiveDate {
    fn calendar_day(&self) -> NaiveDate {
        *self
    }
}

impl CalendarDay for NaiveDateTime {
    fn calendar_day(&self) -> NaiveDate {
        self.date()
    }
}

impl<Tz: TimeZone> CalendarDay for DateTime<Tz> {
    fn calendar_day(&self) -> NaiveDate {
        self.date_naive()
    }
}

/// Strip any time-of-day component, leaving the calendar day.
pub fn normalize<D: CalendarDay>(date: D) -> NaiveDate {
    date.calendar_day()
}

/// Whole days from `a` to `b`. Negative when `b` is before `a`.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use strip_calendar::utils::date::days_between;
///
/// let a = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let b = NaiveDate::from_ymd_opt(2024, 1, 4).unwrap();
/// assert_eq!(days_between(a, b), 3);
/// assert_eq!(days_between(b, a), -3);
/// ```
pub fn days_between<A: CalendarDay, B: CalendarDay>(a: A, b: B) -> i64 {
    (normalize(b) - normalize(a)).num_days()
}

/// Shift a date by `n` days, saturating at the representable range.
pub fn add_days(date: NaiveDate, n: i64) -> NaiveDate {
    match Duration::try_days(n).and_then(|delta| date.checked_add_signed(delta)) {
        Some(shifted) => shifted,
        None if n < 0 => NaiveDate::MIN,
        None => NaiveDate::MAX,
    }
}

/// Calculate the start of the week containing the given date.
///
/// # Arguments
/// * `date` - The date to find the week start for
/// * `first_day_of_week` - 0 = Sunday, 1 = Monday, etc.
pub fn get_week_start(date: NaiveDate, first_day_of_week: u8) -> NaiveDate {
    let weekday = date.weekday().num_days_from_sunday() as i64;
    let offset = (weekday - first_day_of_week as i64 + 7) % 7;
    add_days(date, -offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, NaiveTime};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_normalize_drops_time_of_day() {
        let late = date(2024, 3, 9).and_time(NaiveTime::from_hms_opt(23, 59, 59).unwrap());
        assert_eq!(normalize(late), date(2024, 3, 9));
    }

    #[test]
    fn test_normalize_local_datetime() {
        let stamp = Local.with_ymd_and_hms(2024, 6, 1, 8, 30, 0).unwrap();
        assert_eq!(normalize(stamp), date(2024, 6, 1));
    }

    #[test]
    fn test_days_between_ignores_time_component() {
        let morning = date(2024, 1, 1).and_hms_opt(6, 0, 0).unwrap();
        let evening = date(2024, 1, 2).and_hms_opt(1, 0, 0).unwrap();
        assert_eq!(days_between(morning, evening), 1);
    }

    #[test]
    fn test_days_between_across_month_and_leap_day() {
        assert_eq!(days_between(date(2024, 2, 28), date(2024, 3, 1)), 2);
        assert_eq!(days_between(date(2023, 2, 28), date(2023, 3, 1)), 1);
    }

    #[test]
    fn test_add_days_both_directions() {
        assert_eq!(add_days(date(2024, 1, 30), 3), date(2024, 2, 2));
        assert_eq!(add_days(date(2024, 1, 1), -1), date(2023, 12, 31));
        assert_eq!(add_days(date(2024, 1, 1), 0), date(2024, 1, 1));
    }

    #[test]
    fn test_add_days_saturates() {
        assert_eq!(add_days(NaiveDate::MAX, 1), NaiveDate::MAX);
        assert_eq!(add_days(NaiveDate::MIN, -1), NaiveDate::MIN);
        // Too large for a TimeDelta at all
        assert_eq!(add_days(date(2024, 1, 1), i64::MAX), NaiveDate::MAX);
        assert_eq!(add_days(date(2024, 1, 1), i64::MIN), NaiveDate::MIN);
    }

    #[test]
    fn test_get_week_start_sunday() {
        // Wednesday, Dec 4, 2024
        let start = get_week_start(date(2024, 12, 4), 0);
        assert_eq!(start, date(2024, 12, 1));
    }

    #[test]
    fn test_get_week_start_monday() {
        let start = get_week_start(date(2024, 12, 4), 1);
        assert_eq!(start, date(2024, 12, 2));
    }
}
