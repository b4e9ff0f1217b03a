#![allow(dead_code)]
use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use medication_reminder::store::Store;
use tempfile::TempDir;

/// A throwaway directory holding one database file; removed on drop.
pub struct TestDb {
    pub dir: TempDir,
    pub path: PathBuf,
}

pub fn setup_test_db() -> TestDb {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("medication.db");
    TestDb { dir, path }
}

/// Open a fresh session on the database, as a restart would.
pub fn open_session(db: &TestDb) -> Store {
    let store = Store::open(&db.path);
    store.ensure_schema();
    store
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).expect("valid time")
}

pub fn at(d: NaiveDate, h: u32, m: u32, s: u32) -> NaiveDateTime {
    d.and_hms_opt(h, m, s).expect("valid time")
}
