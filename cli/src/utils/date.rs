use chrono::{Duration, NaiveDate, Utc};
use chrono_tz::Tz;

/// Exchange timezone for HOSE/HNX sessions.
pub const VIETNAM_TZ: Tz = chrono_tz::Asia::Ho_Chi_Minh;

/// Today's calendar date in Vietnam.
pub fn today_vietnam() -> NaiveDate {
    Utc::now().with_timezone(&VIETNAM_TZ).date_naive()
}

/// Calendar date `days` before `end`.
pub fn days_before(end: NaiveDate, days: u32) -> NaiveDate {
    end - Duration::days(i64::from(days))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn days_before_crosses_year() {
        assert_eq!(days_before(date(2024, 1, 10), 365), date(2023, 1, 10));
        assert_eq!(days_before(date(2024, 3, 1), 1), date(2024, 2, 29));
    }

    #[test]
    fn today_is_not_far_from_utc_today() {
        let diff = (today_vietnam() - Utc::now().date_naive()).num_days();
        assert!((0..=1).contains(&diff));
    }
}
