//! Errors raised inside the persistence layer.
//!
//! These never leave [`Store`](super::Store): every public store operation
//! logs them and falls back to a "not found" / no-op result.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database is not available")]
    Unavailable,

    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("invalid stored date: {0}")]
    InvalidDate(String),

    #[error("invalid stored reminder time: {0}")]
    InvalidTime(String),

    #[error("cannot create database directory: {0}")]
    Io(#[from] std::io::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
