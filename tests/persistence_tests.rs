use std::collections::BTreeSet;

use medication_reminder::store::Store;

mod common;
use common::{date, open_session, setup_test_db, time};

#[test]
fn taken_dates_survive_restart() {
    let db = setup_test_db();
    {
        let store = open_session(&db);
        store.mark_taken(date(2024, 3, 1));
        store.mark_taken(date(2024, 3, 2));
    }

    let store = open_session(&db);
    assert!(store.is_taken(date(2024, 3, 1)));
    assert!(store.is_taken(date(2024, 3, 2)));
    assert!(!store.is_taken(date(2024, 3, 3)));
}

#[test]
fn remarking_is_idempotent_across_sessions() {
    let db = setup_test_db();
    open_session(&db).mark_taken(date(2024, 3, 1));
    open_session(&db).mark_taken(date(2024, 3, 1));

    let store = open_session(&db);
    assert_eq!(store.list_taken_dates(), BTreeSet::from([date(2024, 3, 1)]));
}

#[test]
fn reminder_time_survives_restart() {
    let db = setup_test_db();
    open_session(&db).save_reminder_time(time(11, 15));

    assert_eq!(open_session(&db).load_reminder_time(), Some(time(11, 15)));
}

#[test]
fn latest_reminder_time_wins_across_sessions() {
    let db = setup_test_db();
    open_session(&db).save_reminder_time(time(8, 0));
    open_session(&db).save_reminder_time(time(20, 45));

    assert_eq!(open_session(&db).load_reminder_time(), Some(time(20, 45)));
}

#[test]
fn stored_layout_matches_expected_text_formats() {
    let db = setup_test_db();
    {
        let store = open_session(&db);
        store.mark_taken(date(2024, 3, 1));
        store.save_reminder_time(time(14, 30));
    }

    let conn = rusqlite::Connection::open(&db.path).expect("open db");
    let stored_date: String = conn
        .query_row("SELECT Date FROM MedicationCalendar", [], |row| row.get(0))
        .expect("calendar row");
    let stored_time: String = conn
        .query_row("SELECT ReminderHour FROM Settings", [], |row| row.get(0))
        .expect("settings row");

    assert_eq!(stored_date, "2024-03-01");
    assert_eq!(stored_time, "02:30 PM");
}

#[test]
fn missing_parent_directory_is_created() {
    let db = setup_test_db();
    let nested = db.dir.path().join("nested").join("medication.db");

    let store = Store::open(&nested);
    store.ensure_schema();
    assert!(store.is_connected());
    store.mark_taken(date(2024, 3, 1));
    assert!(nested.exists());
}

#[test]
fn unopenable_path_degrades_to_not_found() {
    let db = setup_test_db();
    // A directory can't be opened as a database file.
    let store = Store::open(db.dir.path());
    store.ensure_schema();
    store.mark_taken(date(2024, 3, 1));

    assert!(!store.is_taken(date(2024, 3, 1)));
    assert!(store.list_taken_dates().is_empty());
}
