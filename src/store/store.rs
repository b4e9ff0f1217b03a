use std::collections::BTreeSet;
use std::path::Path;

use chrono::{NaiveDate, NaiveTime};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, error, info, warn};

use super::error::{StoreError, StoreResult};
use super::record::{parse_date, ReminderSetting, TakenRecord};

const CREATE_CALENDAR_TABLE: &str = "CREATE TABLE IF NOT EXISTS MedicationCalendar (
    Date DATE PRIMARY KEY,
    MedicationTaken BOOLEAN
)";

const CREATE_SETTINGS_TABLE: &str = "CREATE TABLE IF NOT EXISTS Settings (
    ReminderHour TEXT PRIMARY KEY
)";

/// Local SQLite store for taken records and the reminder setting.
///
/// Every public operation is best-effort: failures are logged and the caller
/// gets a default (`false`, `None`, empty set, or a skipped write). A store
/// whose file could not be opened stays usable in this degraded mode.
pub struct Store {
    conn: Option<Connection>,
}

impl Store {
    pub fn open(path: &Path) -> Self {
        match Self::try_open(path) {
            Ok(conn) => {
                info!(path = %path.display(), "opened medication database");
                Self { conn: Some(conn) }
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "couldn't open database");
                Self::disconnected()
            }
        }
    }

    pub fn open_in_memory() -> Self {
        match Connection::open_in_memory() {
            Ok(conn) => Self { conn: Some(conn) },
            Err(e) => {
                error!(error = %e, "couldn't open in-memory database");
                Self::disconnected()
            }
        }
    }

    /// A store with no backing database: reads find nothing, writes are dropped.
    pub fn disconnected() -> Self {
        Self { conn: None }
    }

    pub fn is_connected(&self) -> bool {
        self.conn.is_some()
    }

    fn try_open(path: &Path) -> StoreResult<Connection> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Ok(Connection::open(path)?)
    }

    fn conn(&self) -> StoreResult<&Connection> {
        self.conn.as_ref().ok_or(StoreError::Unavailable)
    }

    pub fn ensure_schema(&self) {
        if let Err(e) = self.try_ensure_schema() {
            warn!(error = %e, "couldn't create tables");
        }
    }

    fn try_ensure_schema(&self) -> StoreResult<()> {
        let conn = self.conn()?;
        conn.execute(CREATE_CALENDAR_TABLE, [])?;
        conn.execute(CREATE_SETTINGS_TABLE, [])?;
        Ok(())
    }

    /// The most recently saved reminder time, if any was ever saved.
    pub fn load_reminder_time(&self) -> Option<NaiveTime> {
        match self.try_load_reminder_time() {
            Ok(Some(setting)) => {
                debug!(time = %setting.stored_value(), "reminder time retrieved from database");
                Some(setting.reminder_time)
            }
            Ok(None) => {
                debug!("no reminder time found in the database");
                None
            }
            Err(e) => {
                warn!(error = %e, "couldn't load reminder time");
                None
            }
        }
    }

    fn try_load_reminder_time(&self) -> StoreResult<Option<ReminderSetting>> {
        let raw: Option<String> = self
            .conn()?
            .query_row(
                "SELECT ReminderHour FROM Settings ORDER BY rowid DESC LIMIT 1",
                [],
                |row| row.get(0),
            )
            .optional()?;

        raw.as_deref().map(ReminderSetting::from_stored).transpose()
    }

    pub fn save_reminder_time(&self, time: NaiveTime) {
        let setting = ReminderSetting::new(time);
        match self.try_save_reminder_time(&setting) {
            Ok(()) => info!(time = %setting.stored_value(), "reminder time saved"),
            Err(e) => warn!(error = %e, "error saving reminder time"),
        }
    }

    fn try_save_reminder_time(&self, setting: &ReminderSetting) -> StoreResult<()> {
        self.conn()?.execute(
            "INSERT OR REPLACE INTO Settings (ReminderHour) VALUES (?1)",
            params![setting.stored_value()],
        )?;
        Ok(())
    }

    /// Query failure is reported as "not taken".
    pub fn is_taken(&self, date: NaiveDate) -> bool {
        self.try_is_taken(date).unwrap_or_else(|e| {
            warn!(%date, error = %e, "couldn't query medication status");
            false
        })
    }

    fn try_is_taken(&self, date: NaiveDate) -> StoreResult<bool> {
        let taken: Option<bool> = self
            .conn()?
            .query_row(
                "SELECT MedicationTaken FROM MedicationCalendar WHERE Date = ?1",
                params![TakenRecord::taken_on(date).date_key()],
                |row| row.get::<_, Option<bool>>(0),
            )
            .optional()?
            .flatten();
        Ok(taken.unwrap_or(false))
    }

    pub fn mark_taken(&self, date: NaiveDate) {
        let record = TakenRecord::taken_on(date);
        match self.try_mark_taken(&record) {
            Ok(()) => info!(%date, "medication marked as taken"),
            Err(e) => warn!(%date, error = %e, "couldn't mark medication as taken"),
        }
    }

    fn try_mark_taken(&self, record: &TakenRecord) -> StoreResult<()> {
        self.conn()?.execute(
            "INSERT OR REPLACE INTO MedicationCalendar (Date, MedicationTaken) VALUES (?1, ?2)",
            params![record.date_key(), record.taken],
        )?;
        Ok(())
    }

    pub fn list_taken_dates(&self) -> BTreeSet<NaiveDate> {
        self.try_list_taken_dates().unwrap_or_else(|e| {
            warn!(error = %e, "couldn't list taken dates");
            BTreeSet::new()
        })
    }

    fn try_list_taken_dates(&self) -> StoreResult<BTreeSet<NaiveDate>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT Date FROM MedicationCalendar WHERE MedicationTaken = 1")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut dates = BTreeSet::new();
        for raw in rows {
            let raw = raw?;
            match parse_date(&raw) {
                Ok(date) => {
                    dates.insert(date);
                }
                Err(e) => warn!(error = %e, "skipping unreadable calendar row"),
            }
        }
        Ok(dates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> Store {
        let store = Store::open_in_memory();
        store.ensure_schema();
        store
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn unwritten_dates_are_not_taken() {
        let store = store();
        assert!(!store.is_taken(date(2024, 3, 1)));
        assert!(store.list_taken_dates().is_empty());
    }

    #[test]
    fn mark_taken_is_visible_and_idempotent() {
        let store = store();
        let d = date(2024, 3, 1);

        store.mark_taken(d);
        assert!(store.is_taken(d));

        store.mark_taken(d);
        assert!(store.is_taken(d));
        assert_eq!(store.list_taken_dates(), BTreeSet::from([d]));
        assert!(!store.is_taken(date(2024, 3, 2)));
    }

    #[test]
    fn taken_column_is_stored_as_true() {
        let store = store();
        store.mark_taken(date(2024, 1, 31));

        let raw: i64 = store
            .conn
            .as_ref()
            .unwrap()
            .query_row(
                "SELECT MedicationTaken FROM MedicationCalendar WHERE Date = '2024-01-31'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(raw, 1);
    }

    #[test]
    fn ensure_schema_is_idempotent() {
        let store = store();
        store.mark_taken(date(2024, 5, 5));
        store.ensure_schema();
        assert!(store.is_taken(date(2024, 5, 5)));
    }

    #[test]
    fn most_recent_reminder_time_wins() {
        let store = store();
        assert_eq!(store.load_reminder_time(), None);

        let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        let quarter_past = NaiveTime::from_hms_opt(11, 15, 0).unwrap();

        store.save_reminder_time(nine);
        store.save_reminder_time(quarter_past);
        assert_eq!(store.load_reminder_time(), Some(quarter_past));

        // Re-saving an older value moves it back to the front.
        store.save_reminder_time(nine);
        assert_eq!(store.load_reminder_time(), Some(nine));
    }

    #[test]
    fn malformed_reminder_time_loads_as_none() {
        let store = store();
        store
            .conn
            .as_ref()
            .unwrap()
            .execute("INSERT INTO Settings (ReminderHour) VALUES ('quarter past')", [])
            .unwrap();
        assert_eq!(store.load_reminder_time(), None);
    }

    #[test]
    fn unreadable_dates_are_skipped() {
        let store = store();
        store.mark_taken(date(2024, 2, 29));
        store
            .conn
            .as_ref()
            .unwrap()
            .execute(
                "INSERT INTO MedicationCalendar (Date, MedicationTaken) VALUES ('yesterday', 1)",
                [],
            )
            .unwrap();
        assert_eq!(store.list_taken_dates(), BTreeSet::from([date(2024, 2, 29)]));
    }

    #[test]
    fn missing_tables_read_as_not_taken() {
        let store = Store::open_in_memory();
        assert!(!store.is_taken(date(2024, 3, 1)));
        assert!(store.list_taken_dates().is_empty());
        assert_eq!(store.load_reminder_time(), None);
    }

    #[test]
    fn disconnected_store_degrades_quietly() {
        let store = Store::disconnected();
        assert!(!store.is_connected());

        store.ensure_schema();
        store.mark_taken(date(2024, 3, 1));
        store.save_reminder_time(NaiveTime::from_hms_opt(8, 0, 0).unwrap());

        assert!(!store.is_taken(date(2024, 3, 1)));
        assert!(store.list_taken_dates().is_empty());
        assert_eq!(store.load_reminder_time(), None);
    }
}
