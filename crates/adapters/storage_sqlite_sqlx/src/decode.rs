//! Column decoding helpers shared by the repositories.
//!
//! Identifiers and timestamps are stored as text; failures to parse them are
//! reported as [`sqlx::Error::Decode`] so they surface like any other row error.

use std::str::FromStr;

use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use roomhub_domain::time::Timestamp;

/// Read a text column and parse it with [`FromStr`].
pub(crate) fn parsed<T>(row: &SqliteRow, column: &str) -> Result<T, sqlx::Error>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw: String = row.try_get(column)?;
    T::from_str(&raw).map_err(|err| sqlx::Error::Decode(Box::new(err)))
}

/// Read an RFC 3339 text column as a UTC timestamp.
pub(crate) fn timestamp(row: &SqliteRow, column: &str) -> Result<Timestamp, sqlx::Error> {
    let raw: String = row.try_get(column)?;
    chrono::DateTime::parse_from_rfc3339(&raw)
        .map(|ts| ts.to_utc())
        .map_err(|err| sqlx::Error::Decode(Box::new(err)))
}
