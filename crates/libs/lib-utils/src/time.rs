//! # Time Utilities
//!
//! Current time and epoch-second conversion using chrono.

use chrono::{DateTime, Utc};

/// Get current UTC time.
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Whole seconds since the Unix epoch. Sub-second precision is dropped.
pub fn to_epoch_secs(time: DateTime<Utc>) -> i64 {
    time.timestamp()
}

/// Convert epoch seconds back to a UTC DateTime.
pub fn from_epoch_secs(secs: i64) -> Result<DateTime<Utc>, Error> {
    DateTime::from_timestamp(secs, 0).ok_or(Error::EpochOutOfRange(secs))
}

// region:    --- Error
#[derive(Debug)]
pub enum Error {
    EpochOutOfRange(i64),
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt, "{self:?}")
    }
}

impl std::error::Error for Error {}
// endregion: --- Error
