use chrono::{Datelike, Duration, NaiveDate, Utc};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecencyWindow {
    today: NaiveDate,
}

impl RecencyWindow {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    pub fn today() -> Self {
        Self::new(Utc::now().date_naive())
    }

    pub fn date(&self) -> NaiveDate {
        self.today
    }

    pub fn current_year(&self) -> i32 {
        self.today.year()
    }

    /// True when `date` is no more than `days_ago` days before today.
    ///
    /// The boundary day itself counts. Dates that do not parse are never
    /// recent.
    pub fn is_recent(&self, date: &str, days_ago: i64) -> bool {
        match parse_date(date) {
            Some(d) => self.is_recent_date(d, days_ago),
            None => false,
        }
    }

    pub fn is_recent_date(&self, date: NaiveDate, days_ago: i64) -> bool {
        match Duration::try_days(days_ago).and_then(|d| self.today.checked_sub_signed(d)) {
            Some(cutoff) => date >= cutoff,
            None => true,
        }
    }
}

pub fn parse_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).ok()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window() -> RecencyWindow {
        RecencyWindow::new(NaiveDate::from_ymd_opt(2024, 6, 30).unwrap())
    }

    #[test]
    fn boundary_day_is_recent() {
        let w = window();
        assert!(w.is_recent("2024-05-31", 30));
        assert!(!w.is_recent("2024-05-30", 30));
    }

    #[test]
    fn today_and_future_are_recent() {
        let w = window();
        assert!(w.is_recent("2024-06-30", 0));
        assert!(w.is_recent("2024-07-15", 30));
    }

    #[test]
    fn malformed_dates_fail_closed() {
        let w = window();
        assert!(!w.is_recent("", 30));
        assert!(!w.is_recent("yesterday", 30));
        assert!(!w.is_recent("2024-13-01", 10_000));
    }

    #[test]
    fn huge_window_has_no_cutoff() {
        let w = window();
        assert!(w.is_recent("2024-06-01", 200_000_000_000_000));
        assert!(w.is_recent("1970-01-01", i64::MAX));
        assert!(!w.is_recent("not a date", i64::MAX));
    }

    #[test]
    fn surrounding_whitespace_is_tolerated() {
        assert_eq!(parse_date(" 2024-06-01 "), NaiveDate::from_ymd_opt(2024, 6, 1));
    }

    #[test]
    fn current_year_follows_today() {
        assert_eq!(window().current_year(), 2024);
        assert_eq!(format_date(window().date()), "2024-06-30");
    }
}
