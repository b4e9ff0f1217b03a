use chrono::{NaiveDate, NaiveTime};

use super::error::{StoreError, StoreResult};

/// Dates are stored as ISO-8601 calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Reminder times are stored as 12-hour clock strings, e.g. "02:30 PM".
pub const REMINDER_TIME_FORMAT: &str = "%I:%M %p";

/// A day on which medication was taken. A missing record means "not taken".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TakenRecord {
    pub date: NaiveDate,
    pub taken: bool,
}

impl TakenRecord {
    /// The only kind of record ever written: `taken` is always true.
    pub fn taken_on(date: NaiveDate) -> Self {
        Self { date, taken: true }
    }

    pub fn date_key(&self) -> String {
        format_date(self.date)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderSetting {
    pub reminder_time: NaiveTime,
}

impl ReminderSetting {
    pub fn new(reminder_time: NaiveTime) -> Self {
        Self { reminder_time }
    }

    pub fn stored_value(&self) -> String {
        format_reminder_time(self.reminder_time)
    }

    pub fn from_stored(value: &str) -> StoreResult<Self> {
        parse_reminder_time(value)
            .map(Self::new)
            .ok_or_else(|| StoreError::InvalidTime(value.to_string()))
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_date(value: &str) -> StoreResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| StoreError::InvalidDate(value.to_string()))
}

pub fn format_reminder_time(time: NaiveTime) -> String {
    time.format(REMINDER_TIME_FORMAT).to_string()
}

pub fn parse_reminder_time(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), REMINDER_TIME_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reminder_time_uses_twelve_hour_clock() {
        let t = NaiveTime::from_hms_opt(14, 30, 0).unwrap();
        assert_eq!(format_reminder_time(t), "02:30 PM");

        let morning = NaiveTime::from_hms_opt(0, 5, 0).unwrap();
        assert_eq!(format_reminder_time(morning), "12:05 AM");
    }

    #[test]
    fn reminder_time_parses_stored_strings() {
        assert_eq!(
            parse_reminder_time("11:15 AM"),
            NaiveTime::from_hms_opt(11, 15, 0)
        );
        assert_eq!(
            parse_reminder_time("12:00 PM"),
            NaiveTime::from_hms_opt(12, 0, 0)
        );
        assert_eq!(parse_reminder_time("25:99"), None);
        assert_eq!(parse_reminder_time(""), None);
    }

    #[test]
    fn malformed_setting_is_an_error() {
        let err = ReminderSetting::from_stored("soon").unwrap_err();
        assert!(matches!(err, StoreError::InvalidTime(v) if v == "soon"));
    }

    #[test]
    fn dates_are_iso() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(TakenRecord::taken_on(d).date_key(), "2024-03-01");
        assert_eq!(parse_date("2024-03-01").unwrap(), d);
        assert!(parse_date("03/01/2024").is_err());
    }
}
