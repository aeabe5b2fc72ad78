//! Date helpers for race scheduling.

use chrono::{Datelike, Duration, NaiveDate, Utc, Weekday};

/// Current UTC date
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// First `weekday` on or after `from`
pub fn next_weekday(from: NaiveDate, weekday: Weekday) -> NaiveDate {
    let days_ahead = (7 + weekday.num_days_from_monday() as i64
        - from.weekday().num_days_from_monday() as i64)
        % 7;

    from + Duration::days(days_ahead)
}

/// League races run on Tuesdays
pub fn next_race_tuesday(from: NaiveDate) -> NaiveDate {
    next_weekday(from, Weekday::Tue)
}

/// `YYYYMMDD`, as used in lineup race identifiers
pub fn compact_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    /// Expected: the same day when `from` is already a Tuesday
    #[test]
    fn keeps_tuesday() {
        let tuesday = NaiveDate::from_ymd_opt(2025, 11, 4).unwrap();

        assert_eq!(next_race_tuesday(tuesday), tuesday);
    }

    /// Expected: Wednesday rolls over to the following Tuesday
    #[test]
    fn rolls_to_next_week() {
        let wednesday = NaiveDate::from_ymd_opt(2025, 11, 5).unwrap();

        assert_eq!(
            next_race_tuesday(wednesday),
            NaiveDate::from_ymd_opt(2025, 11, 11).unwrap()
        );
    }

    #[test]
    fn formats_compact_date() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 7).unwrap();

        assert_eq!(compact_date(date), "20250107");
    }
}
