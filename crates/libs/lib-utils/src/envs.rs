//! # Environment Variables
//!
//! Utilities for reading and parsing environment variables.

use std::env;
use std::str::FromStr;

/// Get an environment variable, treating an unset or empty value as `None`.
pub fn get_env_opt(name: &'static str) -> Option<String> {
    env::var(name).ok().filter(|val| !val.trim().is_empty())
}

/// Parse an optional environment variable. Unset is `Ok(None)`, unparsable is an error.
pub fn get_env_parse_opt<T: FromStr>(name: &'static str) -> Result<Option<T>, Error> {
    match get_env_opt(name) {
        Some(val) => val
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| Error::WrongFormat(name)),
        None => Ok(None),
    }
}

// region:    --- Error
#[derive(Debug)]
pub enum Error {
    WrongFormat(&'static str),
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt, "{self:?}")
    }
}

impl std::error::Error for Error {}
// endregion: --- Error
